//! Output formatting for the export pipeline
//!
//! Two concerns live here:
//!
//! - `value`: rendering opaque BSON field values as single-line plain text
//!   for the export file
//! - `summary`: rendering the end-of-run per-collection summary table for
//!   the terminal

pub mod summary;
pub mod value;

pub use summary::SummaryFormatter;
pub use value::TextValueFormatter;
