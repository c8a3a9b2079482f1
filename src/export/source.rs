//! Streaming source abstractions for export operations
//!
//! This module provides a unified interface for draining documents from a
//! collection in batches without holding the driver cursor logic in the
//! exporter itself.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Cursor;
use mongodb::bson::Document;
use tracing::{debug, info};

use crate::error::Result;

/// Trait for streaming collection documents in batches
///
/// This is the seam the exporter consumes; tests substitute mock sources
/// for the cursor-backed implementation.
#[async_trait]
pub trait DocumentSource: Send {
    /// Fetch the next batch of documents
    ///
    /// # Returns
    /// * `Result<Option<Vec<Document>>>` - Next batch of documents, or None if exhausted
    async fn next_batch(&mut self) -> Result<Option<Vec<Document>>>;

    /// Close the source and cleanup resources
    async fn close(&mut self) -> Result<()>;
}

/// Cursor-backed document source
///
/// Drains a driver cursor in fixed-size batches. The cursor is released
/// eagerly on error, exhaustion, and drop.
pub struct CursorDocumentSource {
    cursor: Option<Cursor<Document>>,
    batch_size: u32,
    total_fetched: u64,
    collection: String,
    closed: bool,
}

impl CursorDocumentSource {
    /// Create a new cursor document source
    ///
    /// # Arguments
    /// * `cursor` - Cursor from a collection scan
    /// * `batch_size` - Number of documents to fetch per batch
    /// * `collection` - Collection name for logging
    pub fn new(cursor: Cursor<Document>, batch_size: u32, collection: String) -> Self {
        Self {
            cursor: Some(cursor),
            batch_size,
            total_fetched: 0,
            collection,
            closed: false,
        }
    }
}

#[async_trait]
impl DocumentSource for CursorDocumentSource {
    async fn next_batch(&mut self) -> Result<Option<Vec<Document>>> {
        if self.closed {
            return Ok(None);
        }

        let cursor = match self.cursor.as_mut() {
            Some(c) => c,
            None => return Ok(None),
        };

        let mut batch = Vec::with_capacity(self.batch_size as usize);

        for _ in 0..self.batch_size {
            match cursor.try_next().await {
                Ok(Some(doc)) => batch.push(doc),
                Ok(None) => break,
                Err(e) => {
                    // On error, close cursor to release resources
                    self.cursor = None;
                    self.closed = true;
                    return Err(e.into());
                }
            }
        }

        if batch.is_empty() {
            debug!(
                "Collection '{}' exhausted after {} documents",
                self.collection, self.total_fetched
            );
            self.cursor = None;
            self.closed = true;
            Ok(None)
        } else {
            self.total_fetched += batch.len() as u64;
            debug!(
                "Fetched batch of {} documents from '{}' (total: {})",
                batch.len(),
                self.collection,
                self.total_fetched
            );
            Ok(Some(batch))
        }
    }

    async fn close(&mut self) -> Result<()> {
        if !self.closed {
            // Explicitly drop cursor to release server resources
            self.cursor = None;
            self.closed = true;
            info!(
                "Closed source for '{}' after fetching {} documents",
                self.collection, self.total_fetched
            );
        }
        Ok(())
    }
}

impl Drop for CursorDocumentSource {
    fn drop(&mut self) {
        if !self.closed {
            debug!("CursorDocumentSource dropped without explicit close");
            self.cursor = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_source_trait_object() {
        // Verify we can use DocumentSource as a trait object
        fn _accepts_document_source(_source: Box<dyn DocumentSource>) {}
    }
}
