//! Configuration management for docdump
//!
//! This module handles loading, parsing, and managing configuration from
//! various sources:
//! - Configuration file (TOML format)
//! - Command-line arguments (applied by the CLI layer)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values
//!
//! The defaults reproduce the fixed inputs of the original one-shot
//! script: credential file `cred.json`, the twelve-collection list, and a
//! fixed output path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Connection configuration
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Path to the JSON service-credential file
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Path to the text output file (truncated each run)
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Ordered list of collections to export
    #[serde(default = "default_collections")]
    pub collections: Vec<String>,

    /// Documents fetched per cursor batch
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Show per-collection progress spinners
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

/// Connection-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Maximum pool size
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,

    /// Minimum pool size
    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_credentials_path() -> PathBuf {
    PathBuf::from("cred.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("collections_output.txt")
}

fn default_collections() -> Vec<String> {
    [
        "beneficiarios",
        "certificados",
        "documentos",
        "entradas",
        "mensajesProgramados",
        "notifications",
        "pdfs",
        "sessions",
        "solicitudes",
        "testigos",
        "tickets",
        "users",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_batch_size() -> u32 {
    500
}

fn default_show_progress() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_max_pool_size() -> u32 {
    10
}

fn default_min_pool_size() -> u32 {
    2
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            connection: ConnectionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            output_path: default_output_path(),
            collections: default_collections(),
            batch_size: default_batch_size(),
            show_progress: default_show_progress(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            max_pool_size: default_max_pool_size(),
            min_pool_size: default_min_pool_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Load configuration from an explicit path or the default location
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file just means defaults.
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Self::default_config_path();
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".docdump")
            .join("config.toml")
    }

    /// Serialize the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Generic(format!("serialization failed: {e}")).into())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.export.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "export.batch_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if self.export.collections.is_empty() {
            return Err(ConfigError::Generic(
                "export.collections must not be empty".to_string(),
            )
            .into());
        }

        if let Some(blank) = self.export.collections.iter().find(|c| c.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "export.collections".to_string(),
                value: blank.clone(),
            }
            .into());
        }

        if self.connection.min_pool_size > self.connection.max_pool_size {
            return Err(ConfigError::InvalidValue {
                field: "connection.min_pool_size".to_string(),
                value: self.connection.min_pool_size.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Get connection timeout as Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection.timeout)
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export.credentials_path, PathBuf::from("cred.json"));
        assert_eq!(
            config.export.output_path,
            PathBuf::from("collections_output.txt")
        );
        assert_eq!(config.export.collections.len(), 12);
        assert_eq!(config.export.collections[0], "beneficiarios");
        assert_eq!(config.export.collections[11], "users");
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_parse_overrides_defaults() {
        let config = Config::parse(
            r#"
            [export]
            output_path = "dump.txt"
            collections = ["a", "b"]

            [connection]
            timeout = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.export.output_path, PathBuf::from("dump.txt"));
        assert_eq!(config.export.collections, vec!["a", "b"]);
        assert_eq!(config.connection.timeout, 5);
        // Untouched sections keep their defaults
        assert_eq!(config.export.batch_size, 500);
        assert_eq!(config.connection.max_pool_size, 10);
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(Config::parse("export = not toml").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_batch_size() {
        let mut config = Config::default();
        config.export.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_collection_list() {
        let mut config = Config::default();
        config.export.collections.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_collection_name() {
        let mut config = Config::default();
        config.export.collections.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = Config::parse(&toml_str).unwrap();
        assert_eq!(parsed.export.collections, config.export.collections);
        assert_eq!(parsed.connection.timeout, config.connection.timeout);
    }

    #[test]
    fn test_connection_timeout() {
        let config = Config::default();
        assert_eq!(config.connection_timeout(), Duration::from_secs(30));
    }
}
