//! Command-line interface for docdump
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - CLI-over-config precedence
//! - Subcommand dispatch (version, completion, config)

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{Config, LogLevel};
use crate::error::Result;

pub mod completion;

/// One-shot collection export tool for MongoDB
#[derive(Parser, Debug)]
#[command(
    name = "docdump",
    version,
    about = "Export named collections to a plain-text report",
    long_about = "Authenticates to MongoDB with a JSON service-credential file, scans an
ordered list of collections and writes every document as indented plain
text into a single output file, one section per collection."
)]
pub struct CliArgs {
    /// Path to the JSON service-credential file
    #[arg(short = 'k', long, value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    /// Output file path (truncated on each run)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Collection to export; repeatable, replaces the configured list
    ///
    /// Example: docdump --collection users --collection tickets
    #[arg(long = "collection", value_name = "NAME")]
    pub collections: Vec<String>,

    /// Database name (overrides the credential file)
    #[arg(long, value_name = "NAME")]
    pub database: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Documents fetched per cursor batch
    #[arg(long, value_name = "N")]
    pub batch_size: Option<u32>,

    /// Connection timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Disable progress spinners
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for docdump
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration with CLI overrides applied
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let config_path = args.config_file.as_deref();
        let mut config = Config::load_from_file(config_path)?;

        config.validate()?;

        Self::apply_args_to_config(&mut config, args);

        // Re-validate: CLI overrides can introduce bad values too
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_export_args(config, args);
        Self::apply_logging_args(config, args);
        Self::apply_connection_args(config, args);
    }

    /// Apply export-related CLI arguments to configuration
    fn apply_export_args(config: &mut Config, args: &CliArgs) {
        if let Some(ref credentials) = args.credentials {
            config.export.credentials_path = credentials.clone();
        }

        if let Some(ref output) = args.output {
            config.export.output_path = output.clone();
        }

        if !args.collections.is_empty() {
            config.export.collections = args.collections.clone();
        }

        if let Some(batch_size) = args.batch_size {
            config.export.batch_size = batch_size;
        }

        if args.no_progress || args.quiet {
            config.export.show_progress = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Apply connection-related CLI arguments to configuration
    fn apply_connection_args(config: &mut Config, args: &CliArgs) {
        if let Some(timeout) = args.timeout {
            config.connection.timeout = timeout;
        }
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if a subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("docdump version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file()?;
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) -> Result<()> {
        let path = self.config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("❌ Configuration file does not exist");
            return Ok(());
        }

        match Config::load_from_file(self.args.config_file.as_deref()) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("✅ Configuration is valid"),
                Err(e) => println!("❌ Configuration validation failed: {}", e),
            },
            Err(e) => println!("❌ Failed to load configuration: {}", e),
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn config_path(&self) -> PathBuf {
        self.args
            .config_file
            .as_ref()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Config::default_config_path)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Path to the credential file
    pub fn credentials_path(&self) -> &Path {
        &self.config.export.credentials_path
    }

    /// Path to the output file
    pub fn output_path(&self) -> &Path {
        &self.config.export.output_path
    }

    /// Ordered collection list for this run
    pub fn collections(&self) -> &[String] {
        &self.config.export.collections
    }

    /// Print banner with version and target info
    ///
    /// # Arguments
    /// * `target` - Sanitized connection target (no credentials)
    pub fn print_banner(&self, target: &str) {
        if !self.args.quiet {
            println!("Exporting from: {}", target);
            println!("Using docdump: {}", env!("CARGO_PKG_VERSION"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_defaults() {
        let args = CliArgs::try_parse_from(vec!["docdump"]).unwrap();
        assert!(args.credentials.is_none());
        assert!(args.output.is_none());
        assert!(args.collections.is_empty());
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args =
            CliArgs::try_parse_from(vec!["docdump", "--no-progress", "--quiet"]).unwrap();
        assert!(args.no_progress);
        assert!(args.quiet);
    }

    #[test]
    fn test_repeatable_collection_flag() {
        let args = CliArgs::try_parse_from(vec![
            "docdump",
            "--collection",
            "users",
            "--collection",
            "tickets",
        ])
        .unwrap();
        assert_eq!(args.collections, vec!["users", "tickets"]);
    }

    #[test]
    fn test_args_override_config() {
        let args = CliArgs::try_parse_from(vec![
            "docdump",
            "--credentials",
            "other.json",
            "--output",
            "dump.txt",
            "--collection",
            "users",
            "--batch-size",
            "100",
            "--timeout",
            "5",
        ])
        .unwrap();

        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);

        assert_eq!(config.export.credentials_path, PathBuf::from("other.json"));
        assert_eq!(config.export.output_path, PathBuf::from("dump.txt"));
        assert_eq!(config.export.collections, vec!["users"]);
        assert_eq!(config.export.batch_size, 100);
        assert_eq!(config.connection.timeout, 5);
    }

    #[test]
    fn test_config_keeps_defaults_without_args() {
        let args = CliArgs::try_parse_from(vec!["docdump"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);

        assert_eq!(config.export.collections.len(), 12);
        assert!(config.export.show_progress);
    }

    #[test]
    fn test_quiet_disables_progress_and_raises_log_threshold() {
        let args = CliArgs::try_parse_from(vec!["docdump", "--quiet"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);

        assert!(!config.export.show_progress);
        assert_eq!(config.logging.level, LogLevel::Error);
    }

    #[test]
    fn test_verbosity_flags() {
        let args = CliArgs::try_parse_from(vec!["docdump", "-v"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Debug);

        let args = CliArgs::try_parse_from(vec!["docdump", "--vv"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Trace);
    }
}
