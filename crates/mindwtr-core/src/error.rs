//! Error types for mindwtr-core

use thiserror::Error;

/// Result type alias using mindwtr-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mindwtr-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local data failed structural validation and must not be merged
    #[error("Corrupted local data: {0}")]
    CorruptedData(String),

    /// Sync backend transport error
    #[error("Backend error: {0}")]
    Backend(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A sync cycle is already running
    #[error("A sync cycle is already in progress")]
    SyncInProgress,
}
