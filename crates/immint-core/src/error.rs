//! Error types for core transforms

use thiserror::Error;

/// Errors that can occur during mapping, merging and statistics runs
#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid type mapping: {0}")]
    InvalidMapping(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
