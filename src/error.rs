//! Error types for the findex crate.

use thiserror::Error;

/// Error type for all findex operations.
#[derive(Error, Debug)]
pub enum FindexError {
    /// Invalid index configuration, detected at construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot encoding or decoding failure.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// The worker thread is gone or rejected the request.
    #[error("Worker error: {0}")]
    Worker(String),

    /// I/O error while reading or writing a snapshot.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FindexError {
    /// Create a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        FindexError::Config(message.into())
    }

    /// Create a snapshot error.
    pub fn snapshot<S: Into<String>>(message: S) -> Self {
        FindexError::Snapshot(message.into())
    }

    /// Create a worker error.
    pub fn worker<S: Into<String>>(message: S) -> Self {
        FindexError::Worker(message.into())
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FindexError>;
