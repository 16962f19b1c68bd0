//! Error types for archive operations.

use thiserror::Error;

/// Errors that can occur while reading or writing the archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// IO error while touching the archive or the tracking file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delivery record could not be encoded
    #[error("Failed to encode delivery record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;
