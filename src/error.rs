//! Error types for Palaver.

use thiserror::Error;

/// Common error type for Palaver.
#[derive(Error, Debug)]
pub enum PalaverError {
    /// Database error.
    ///
    /// Wraps errors from the database backend; sqlx errors are converted
    /// automatically.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for PalaverError {
    fn from(e: sqlx::Error) -> Self {
        PalaverError::Database(e.to_string())
    }
}

/// Result type alias for Palaver operations.
pub type Result<T> = std::result::Result<T, PalaverError>;
