//! Error types for table exports.

use thiserror::Error;

/// Errors that can occur when exporting a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for table exports.
pub type Result<T> = std::result::Result<T, TableError>;
