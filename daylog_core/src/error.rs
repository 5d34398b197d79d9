//! Error types for the daylog_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for daylog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A timestamp could not be parsed under any accepted format
    #[error("Malformed timestamp {value:?}: {reason}")]
    MalformedTimestamp { value: String, reason: String },

    /// An input file does not exist
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn malformed(value: &str, reason: impl Into<String>) -> Self {
        Error::MalformedTimestamp {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
