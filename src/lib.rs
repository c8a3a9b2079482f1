//! docdump library
//!
//! This library provides the core functionality for the docdump collection
//! export tool. It can be used as a standalone library to build export
//! tooling around a MongoDB deployment.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `connection`: MongoDB connection management
//! - `credentials`: Service-credential file handling
//! - `error`: Error types and handling
//! - `export`: Export pipeline (source, writer, exporter)
//! - `formatter`: Field value rendering and run summary formatting
//!
//! # Example
//!
//! ```no_run
//! use docdump::{config::Config, connection::ConnectionManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let mut manager = ConnectionManager::new(
//!         "mongodb://localhost:27017".to_string(),
//!         config.connection,
//!     );
//!
//!     manager.connect().await?;
//!     println!("Connected to MongoDB");
//!
//!     manager.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod credentials;
pub mod error;
pub mod export;
pub mod formatter;

// Re-export commonly used types
pub use config::Config;
pub use connection::ConnectionManager;
pub use credentials::ServiceCredentials;
pub use error::{DocdumpError, Result};
pub use export::{ExportSummary, Exporter, TextReportWriter};
pub use formatter::SummaryFormatter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
