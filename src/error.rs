//! Error types for netfence.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for netfence operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A token or query string is not a valid IP address or CIDR range
    #[error("invalid address or CIDR: {0}")]
    InvalidAddress(String),

    /// A list file or directory could not be read
    #[error("failed to load {path}: {source}")]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unknown export format name
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Malformed structured document
    #[error("invalid structured document: {0}")]
    Structured(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for netfence operations.
pub type Result<T> = std::result::Result<T, Error>;
