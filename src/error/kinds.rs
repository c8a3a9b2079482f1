use std::{fmt, io};

use crate::error::mongo::{extract_error_info, format_mongodb_error};

/// Crate-wide `Result` type using [`DocdumpError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, DocdumpError>;

/// Top-level error type for docdump operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum DocdumpError {
    /// Credential file errors.
    Credential(CredentialError),

    /// Connection-related errors.
    Connection(ConnectionError),

    /// Configuration errors.
    Config(ConfigError),

    /// Export pipeline errors.
    Export(ExportError),

    /// I/O errors.
    Io(io::Error),

    /// MongoDB driver errors.
    MongoDb(mongodb::error::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Credential-file-specific errors.
///
/// Any of these is a global failure: the run aborts before the output
/// file is created.
#[derive(Debug)]
pub enum CredentialError {
    /// Credential file not found.
    FileNotFound(String),

    /// Credential file could not be parsed.
    InvalidFormat(String),

    /// Required credential field missing or empty.
    MissingField(String),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectionFailed(String),

    /// Invalid connection URI.
    InvalidUri(String),

    /// Not currently connected to the database.
    NotConnected,

    /// Ping command failed.
    PingFailed(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Generic configuration error.
    Generic(String),
}

/// Export-pipeline-specific errors.
#[derive(Debug)]
pub enum ExportError {
    /// Output path is not usable (missing directory, not writable).
    InvalidOutputPath(String),

    /// Failed to write to the output file.
    WriteFailed(String),
}

impl DocdumpError {
    /// Single-line form of the error, for embedding in the output file.
    ///
    /// Driver errors are condensed to code/name/message instead of the
    /// multi-line JSON used for terminal display.
    pub fn inline_message(&self) -> String {
        match self {
            DocdumpError::MongoDb(e) => extract_error_info(e).one_line(),
            other => other.to_string(),
        }
    }
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for DocdumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocdumpError::Credential(e) => write!(f, "Credential error: {e}"),
            DocdumpError::Connection(e) => write!(f, "Connection error: {e}"),
            DocdumpError::Config(e) => write!(f, "Configuration error: {e}"),
            DocdumpError::Export(e) => write!(f, "Export error: {e}"),
            DocdumpError::Io(e) => write!(f, "I/O error: {e}"),
            DocdumpError::MongoDb(e) => format_mongodb_error(f, e),
            DocdumpError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::FileNotFound(path) => {
                write!(f, "Credential file not found: {path}")
            }
            CredentialError::InvalidFormat(msg) => {
                write!(f, "Invalid credential file: {msg}")
            }
            CredentialError::MissingField(field) => {
                write!(f, "Missing required credential field: {field}")
            }
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::InvalidUri(uri) => write!(f, "Invalid connection URI: {uri}"),
            ConnectionError::NotConnected => write!(f, "Not connected to MongoDB"),
            ConnectionError::PingFailed(msg) => write!(f, "Ping failed: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::InvalidOutputPath(msg) => write!(f, "Invalid output path: {msg}"),
            ExportError::WriteFailed(msg) => write!(f, "Failed to write output: {msg}"),
        }
    }
}

impl std::error::Error for DocdumpError {}
impl std::error::Error for CredentialError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ExportError {}

/* ========================= Conversions to DocdumpError ========================= */

impl From<io::Error> for DocdumpError {
    fn from(err: io::Error) -> Self {
        DocdumpError::Io(err)
    }
}

impl From<mongodb::error::Error> for DocdumpError {
    fn from(err: mongodb::error::Error) -> Self {
        DocdumpError::MongoDb(err)
    }
}

impl From<CredentialError> for DocdumpError {
    fn from(err: CredentialError) -> Self {
        DocdumpError::Credential(err)
    }
}

impl From<ConnectionError> for DocdumpError {
    fn from(err: ConnectionError) -> Self {
        DocdumpError::Connection(err)
    }
}

impl From<ConfigError> for DocdumpError {
    fn from(err: ConfigError) -> Self {
        DocdumpError::Config(err)
    }
}

impl From<ExportError> for DocdumpError {
    fn from(err: ExportError) -> Self {
        DocdumpError::Export(err)
    }
}

impl From<String> for DocdumpError {
    fn from(msg: String) -> Self {
        DocdumpError::Generic(msg)
    }
}

impl From<&str> for DocdumpError {
    fn from(msg: &str) -> Self {
        DocdumpError::Generic(msg.to_owned())
    }
}
