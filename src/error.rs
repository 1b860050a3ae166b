//! Error types for receipt extraction

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and normalizing archived messages
#[derive(Error, Debug)]
pub enum ParseError {
    /// The record is not a parseable mail message
    #[error("Failed to parse email structure: {0}")]
    Structure(String),

    /// Failed to decode a transfer-encoded body
    #[error("Failed to decode content: {0}")]
    Decode(String),

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// I/O error while reading an archive
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ParseError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for receipt extraction operations
pub type Result<T> = std::result::Result<T, ParseError>;
