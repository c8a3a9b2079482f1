//! Error handling module for export operations.
//!
//! This module provides error handling for the export pipeline with:
//! - Structured error information extraction from MongoDB driver errors
//! - Consistent JSON error formatting for terminal display
//! - Application-specific error types
//!
//! # Example
//!
//! ```rust,no_run
//! use docdump::error::{Result, DocdumpError};
//! use docdump::error::mongo::extract_error_info;
//!
//! fn example_operation() -> Result<()> {
//!     // Driver errors convert into DocdumpError via `?`
//!     Ok(())
//! }
//!
//! fn handle_error(err: &mongodb::error::Error) {
//!     let info = extract_error_info(err);
//!     println!("{}", info.one_line());
//! }
//! ```

pub mod kinds;
pub mod mongo;

// Re-export commonly used types
pub use kinds::{
    ConfigError, ConnectionError, CredentialError, DocdumpError, ExportError, Result,
};
pub use mongo::ErrorInfo;
