//! docdump - one-shot collection export
//!
//! Authenticates to MongoDB with a JSON service-credential file, scans an
//! ordered list of collections and writes every document as indented
//! plain text into a single output file, one section per collection.
//!
//! # Features
//!
//! - Explicit connection lifecycle (connect, verify with ping, disconnect)
//! - Per-collection error containment: a failing collection becomes one
//!   inline error line, the run continues
//! - Truncate-on-open output: each run replaces the previous file
//! - TOML configuration with CLI overrides
//! - Per-collection progress spinners and an end-of-run summary table
//!
//! # Usage
//!
//! ```bash
//! # Export the configured collections using ./cred.json
//! docdump
//!
//! # Pick collections and output explicitly
//! docdump -k cred.json -o dump.txt --collection users --collection tickets
//! ```

use mongodb::Database;
use tracing::Level;

mod cli;
mod config;
mod connection;
mod credentials;
mod error;
mod export;
mod formatter;

use cli::CliInterface;
use connection::ConnectionManager;
use credentials::ServiceCredentials;
use error::{CredentialError, Result};
use export::{Exporter, TextReportWriter};
use formatter::SummaryFormatter;

/// Application entry point
#[tokio::main]
async fn main() {
    // Initialize the application and handle any errors
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or run the export
///
/// # Returns
/// * `Result<()>` - Success or error
async fn run() -> Result<()> {
    // Parse command-line arguments and load configuration
    let cli = CliInterface::new()?;

    // Initialize logging based on verbosity
    initialize_logging(&cli);

    // Handle subcommands (version, completion, config)
    if cli.handle_subcommand()? {
        return Ok(());
    }

    run_export(&cli).await
}

/// Run the export end to end
///
/// Credentials and the connection come first: a global failure there must
/// abort before the previous output file is truncated.
async fn run_export(cli: &CliInterface) -> Result<()> {
    let credentials = ServiceCredentials::load(cli.credentials_path())?;

    cli.print_banner(&credentials.sanitized_uri());

    let (mut manager, database) = setup_connection(cli, &credentials).await?;

    let mut writer = TextReportWriter::create(cli.output_path()).await?;
    let exporter = Exporter::new(
        database,
        cli.config().export.batch_size,
        cli.config().export.show_progress,
    );
    let summary = exporter.run(cli.collections(), &mut writer).await?;

    if !cli.args().quiet {
        let formatter = SummaryFormatter::new(true);
        println!("{}", formatter.format(&summary));
        println!("Export written to: {}", cli.output_path().display());
    }

    manager.disconnect().await?;
    Ok(())
}

/// Connect and resolve the database to export from
async fn setup_connection(
    cli: &CliInterface,
    credentials: &ServiceCredentials,
) -> Result<(ConnectionManager, Database)> {
    let mut manager = ConnectionManager::new(
        credentials.connection_uri(),
        cli.config().connection.clone(),
    );

    manager.connect().await?;

    let database_name = cli
        .args()
        .database
        .clone()
        .or_else(|| credentials.database_name())
        .ok_or_else(|| CredentialError::MissingField("database".to_string()))?;

    let database = manager.database(&database_name)?;
    Ok((manager, database))
}

/// Initialize logging system based on verbosity level
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    // Build subscriber with level filter
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    // Configure timestamps
    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
