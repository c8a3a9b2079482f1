//! Exporter orchestrating the per-collection scan
//!
//! Collections are processed one at a time, in list order. Each collection
//! is drained through a [`DocumentSource`] into memory first, producing
//! `Ok(documents)` or `Err(reason)`; the writer then branches on the
//! variant, so a failed collection yields exactly one inline error line
//! and no partial document blocks. A single collection's failure never
//! aborts the run; only writer failures (output file problems) do.

use std::time::Instant;

use mongodb::Database;
use mongodb::bson::{Document, doc};
use tracing::{debug, info, warn};

use crate::error::Result;

use super::progress::ProgressTracker;
use super::source::{CursorDocumentSource, DocumentSource};
use super::writer::TextReportWriter;

/// Outcome of a single collection scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// Collection was read and written in full
    Exported {
        /// Number of documents in the section
        documents: u64,
    },

    /// Collection could not be read; an inline error line was written
    Failed {
        /// Single-line failure reason, as written to the output
        reason: String,
    },
}

/// Per-collection record in the export summary
#[derive(Debug, Clone)]
pub struct CollectionReport {
    /// Collection name
    pub name: String,
    /// What happened to it
    pub outcome: CollectionOutcome,
}

/// Result of an export run
#[derive(Debug)]
pub struct ExportSummary {
    /// Per-collection outcomes, in processing order
    pub reports: Vec<CollectionReport>,
    /// Total documents exported across all collections
    pub total_documents: u64,
    /// Output file size in bytes
    pub file_size_bytes: u64,
    /// Time taken for the run
    pub elapsed_ms: u64,
}

impl ExportSummary {
    /// Number of collections that failed to read.
    pub fn failed_collections(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, CollectionOutcome::Failed { .. }))
            .count()
    }
}

/// Exporter for a connected database
///
/// Holds the database handle and scan settings; [`Exporter::run`] performs
/// the sequential export into a [`TextReportWriter`].
pub struct Exporter {
    /// Database to read from
    database: Database,
    /// Documents fetched per cursor batch
    batch_size: u32,
    /// Show per-collection spinners
    show_progress: bool,
}

impl Exporter {
    /// Create a new exporter
    ///
    /// # Arguments
    /// * `database` - Connected database handle
    /// * `batch_size` - Documents fetched per cursor batch
    /// * `show_progress` - Show per-collection spinners
    pub fn new(database: Database, batch_size: u32, show_progress: bool) -> Self {
        Self {
            database,
            batch_size,
            show_progress,
        }
    }

    /// Execute the export run
    ///
    /// Processes `collections` in order, writes each outcome through
    /// `writer`, finalizes the file and returns the run summary.
    ///
    /// # Returns
    /// * `Result<ExportSummary>` - Run statistics or a writer/global error
    pub async fn run(
        &self,
        collections: &[String],
        writer: &mut TextReportWriter,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();

        info!(
            "Starting export of {} collection(s) to {}",
            collections.len(),
            writer.path().display()
        );

        let mut reports = Vec::with_capacity(collections.len());
        let mut total_documents = 0u64;

        for name in collections {
            let tracker = ProgressTracker::new(name, self.show_progress);
            let fetched = self.fetch_collection(name, &tracker).await;
            tracker.finish();

            let outcome = Self::record_outcome(writer, name, fetched).await?;
            if let CollectionOutcome::Exported { documents } = outcome {
                total_documents += documents;
            }

            reports.push(CollectionReport {
                name: name.clone(),
                outcome,
            });
        }

        writer.finalize().await?;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        let file_size_bytes = writer.file_size().await?;

        info!(
            "Export completed: {} documents, {} bytes, {} ms",
            total_documents, file_size_bytes, elapsed_ms
        );

        Ok(ExportSummary {
            reports,
            total_documents,
            file_size_bytes,
            elapsed_ms,
        })
    }

    /// Write one collection's fetch result and classify the outcome.
    ///
    /// Writer errors propagate; fetch errors are contained as
    /// [`CollectionOutcome::Failed`].
    pub(crate) async fn record_outcome(
        writer: &mut TextReportWriter,
        name: &str,
        fetched: Result<Vec<Document>>,
    ) -> Result<CollectionOutcome> {
        match fetched {
            Ok(docs) => {
                let documents = writer.write_collection(name, &docs).await?;
                Ok(CollectionOutcome::Exported { documents })
            }
            Err(e) => {
                let reason = e.inline_message();
                warn!("Failed to read collection '{}': {}", name, reason);
                writer.write_collection_error(name, &reason).await?;
                Ok(CollectionOutcome::Failed { reason })
            }
        }
    }

    /// Fetch an entire collection through a cursor-backed source.
    ///
    /// Nonexistent collections are not an error; they yield an empty
    /// cursor and therefore an empty section.
    async fn fetch_collection(
        &self,
        name: &str,
        tracker: &ProgressTracker,
    ) -> Result<Vec<Document>> {
        debug!("Scanning collection '{}'", name);

        let collection = self.database.collection::<Document>(name);
        let cursor = collection.find(doc! {}).await?;

        let mut source = CursorDocumentSource::new(cursor, self.batch_size, name.to_string());
        Self::drain_source(&mut source, tracker).await
    }

    /// Drain a source to completion, in batches.
    pub(crate) async fn drain_source(
        source: &mut dyn DocumentSource,
        tracker: &ProgressTracker,
    ) -> Result<Vec<Document>> {
        let mut documents = Vec::new();

        loop {
            match source.next_batch().await? {
                Some(batch) => {
                    documents.extend(batch);
                    tracker.update(documents.len() as u64);
                }
                None => break,
            }
        }

        source.close().await?;
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConnectionError, DocdumpError};
    use async_trait::async_trait;
    use tempfile::tempdir;

    // Mock document source for testing
    struct MockSource {
        batches: Vec<Vec<Document>>,
        current: usize,
        fail_after: Option<usize>,
    }

    impl MockSource {
        fn new(batches: Vec<Vec<Document>>) -> Self {
            Self {
                batches,
                current: 0,
                fail_after: None,
            }
        }

        fn failing_after(batches: Vec<Vec<Document>>, after: usize) -> Self {
            Self {
                batches,
                current: 0,
                fail_after: Some(after),
            }
        }
    }

    #[async_trait]
    impl DocumentSource for MockSource {
        async fn next_batch(&mut self) -> Result<Option<Vec<Document>>> {
            if self.fail_after == Some(self.current) {
                return Err(ConnectionError::ConnectionFailed("stream broken".to_string()).into());
            }
            if self.current < self.batches.len() {
                let batch = self.batches[self.current].clone();
                self.current += 1;
                Ok(Some(batch))
            } else {
                Ok(None)
            }
        }

        async fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_drain_source_preserves_order() {
        let mut source = MockSource::new(vec![
            vec![doc! { "_id": 1 }, doc! { "_id": 2 }],
            vec![doc! { "_id": 3 }],
        ]);
        let tracker = ProgressTracker::new("a", false);

        let docs = Exporter::drain_source(&mut source, &tracker).await.unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].get_i32("_id").unwrap(), 1);
        assert_eq!(docs[2].get_i32("_id").unwrap(), 3);
        assert_eq!(tracker.processed(), 3);
    }

    #[tokio::test]
    async fn test_drain_source_empty() {
        let mut source = MockSource::new(vec![]);
        let tracker = ProgressTracker::new("b", false);

        let docs = Exporter::drain_source(&mut source, &tracker).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_drain_source_mid_stream_failure() {
        let mut source = MockSource::failing_after(vec![vec![doc! { "_id": 1 }]], 1);
        let tracker = ProgressTracker::new("c", false);

        let result = Exporter::drain_source(&mut source, &tracker).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_record_outcome_contains_fetch_failures() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut writer = TextReportWriter::create(&path).await.unwrap();

        // First collection succeeds, second fails mid-fetch, third succeeds:
        // the failure is contained and later collections still get sections.
        let ok = Exporter::record_outcome(
            &mut writer,
            "a",
            Ok(vec![doc! { "_id": "x1", "f": "1" }]),
        )
        .await
        .unwrap();
        assert_eq!(ok, CollectionOutcome::Exported { documents: 1 });

        let err: DocdumpError =
            ConnectionError::ConnectionFailed("stream broken".to_string()).into();
        let failed = Exporter::record_outcome(&mut writer, "b", Err(err))
            .await
            .unwrap();
        assert!(matches!(failed, CollectionOutcome::Failed { .. }));

        let ok = Exporter::record_outcome(&mut writer, "c", Ok(vec![]))
            .await
            .unwrap();
        assert_eq!(ok, CollectionOutcome::Exported { documents: 0 });

        writer.finalize().await.unwrap();
        let content = tokio::fs::read_to_string(&path).await.unwrap();

        assert!(content.contains("--- Colección: a ---"));
        assert!(
            content.contains("Error al leer la colección 'b': Connection error: Failed to connect: stream broken")
        );
        assert!(!content.contains("--- Colección: b ---"));
        assert!(content.contains("--- Colección: c ---"));
    }

    #[test]
    fn test_summary_failed_count() {
        let summary = ExportSummary {
            reports: vec![
                CollectionReport {
                    name: "a".to_string(),
                    outcome: CollectionOutcome::Exported { documents: 2 },
                },
                CollectionReport {
                    name: "b".to_string(),
                    outcome: CollectionOutcome::Failed {
                        reason: "boom".to_string(),
                    },
                },
            ],
            total_documents: 2,
            file_size_bytes: 0,
            elapsed_ms: 0,
        };
        assert_eq!(summary.failed_collections(), 1);
    }
}
