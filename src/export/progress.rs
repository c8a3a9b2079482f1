//! Progress tracking for export operations
//!
//! One tracker per collection: a spinner naming the collection and the
//! number of documents fetched so far. Document totals are unknown up
//! front, so there is no bounded bar variant.

use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

/// Progress tracker for a single collection scan
pub struct ProgressTracker {
    /// Number of documents fetched so far
    processed: AtomicU64,
    /// Spinner (optional, can be disabled)
    bar: Option<ProgressBar>,
}

impl ProgressTracker {
    /// Create a new progress tracker
    ///
    /// # Arguments
    /// * `collection` - Collection name shown next to the spinner
    /// * `enable_bar` - Whether to display a spinner
    pub fn new(collection: &str, enable_bar: bool) -> Self {
        let bar = if enable_bar {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}: {pos} documents")
                    .unwrap(),
            );
            pb.set_message(collection.to_string());
            Some(pb)
        } else {
            None
        };

        Self {
            processed: AtomicU64::new(0),
            bar,
        }
    }

    /// Update progress with new count
    ///
    /// # Arguments
    /// * `count` - Total number of documents fetched so far
    pub fn update(&self, count: u64) {
        self.processed.store(count, Ordering::Relaxed);

        if let Some(ref bar) = self.bar {
            bar.set_position(count);
        }
    }

    /// Documents fetched so far
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    /// Finish and clear the spinner
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_tracker_disabled_bar() {
        let tracker = ProgressTracker::new("entradas", false);
        tracker.update(500);
        assert_eq!(tracker.processed(), 500);
    }

    #[test]
    fn test_progress_tracker_finish_is_idempotent() {
        let tracker = ProgressTracker::new("users", false);
        tracker.finish();
        tracker.finish();
    }
}
