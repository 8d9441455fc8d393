//! Vivavoce Error Types
//!
//! Centralized error handling for the interview engine.

use thiserror::Error;

/// Central error type for Vivavoce
#[derive(Error, Debug)]
pub enum VivaError {
    #[error("Speech source error: {0}")]
    Source(String),

    #[error("Speech sink error: {0}")]
    Sink(String),

    #[error("Reply oracle error: {0}")]
    Oracle(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session already ended")]
    Ended,

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Vivavoce operations
pub type VivaResult<T> = Result<T, VivaError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for VivaError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        VivaError::Lock(err.to_string())
    }
}
