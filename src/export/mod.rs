//! Export pipeline for the one-shot collection dump
//!
//! The pipeline is built from three components:
//!
//! 1. **DocumentSource**: batched draining of a collection cursor behind a
//!    trait, so the exporter logic is testable without a live database
//! 2. **ProgressTracker**: per-collection spinner feedback
//! 3. **TextReportWriter**: the plain-text output file with its exact
//!    section format
//!
//! The **Exporter** orchestrates them: collections are scanned one at a
//! time in list order, each producing `Ok(documents)` or `Err(reason)`,
//! and the writer branches on the variant: an error line for a failed
//! collection, a full section otherwise.

pub mod exporter;
pub mod progress;
pub mod source;
pub mod writer;

pub use exporter::{CollectionOutcome, CollectionReport, ExportSummary, Exporter};
pub use progress::ProgressTracker;
pub use source::{CursorDocumentSource, DocumentSource};
pub use writer::TextReportWriter;
