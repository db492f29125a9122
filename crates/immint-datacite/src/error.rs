//! Error types for DataCite submission runs

use thiserror::Error;

/// Errors that can occur while loading credentials, reading input and
/// talking to the DataCite API
#[derive(Debug, Error)]
pub enum DataCiteError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid credentials file: {0}")]
    Credentials(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Core(#[from] immint_core::Error),
}

/// Result type for submission operations
pub type Result<T> = std::result::Result<T, DataCiteError>;
