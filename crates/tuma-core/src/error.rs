//! Error types for row assembly.

use thiserror::Error;

/// Errors raised while setting up a writer or committing rows.
#[derive(Debug, Error)]
pub enum TupleError {
    /// A required argument was absent or malformed.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A column with this name is already declared.
    #[error("duplicate column: {name}")]
    DuplicateColumn { name: String },

    /// A producer with this name is already registered on the writer.
    #[error("duplicate producer: {name}")]
    DuplicateProducer { name: String },

    /// The destination already holds rows and refuses new columns.
    #[error("cannot declare column {name}: {rows} row(s) already committed")]
    ColumnsFrozen { name: String, rows: usize },

    /// At least one producer was neither filled nor cleared.
    #[error(
        "incomplete row: {} producer(s) neither filled nor cleared: {}",
        .missing.len(),
        .missing.join(", ")
    )]
    IncompleteRow { missing: Vec<String> },

    /// The storage destination failed to append a row.
    #[error("storage error: {message}")]
    Storage { message: String },
}

/// Result type alias for row assembly.
pub type Result<T> = std::result::Result<T, TupleError>;

impl TupleError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a DuplicateColumn error.
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumn { name: name.into() }
    }

    /// Create a DuplicateProducer error.
    pub fn duplicate_producer(name: impl Into<String>) -> Self {
        Self::DuplicateProducer { name: name.into() }
    }

    /// Create a ColumnsFrozen error.
    pub fn columns_frozen(name: impl Into<String>, rows: usize) -> Self {
        Self::ColumnsFrozen {
            name: name.into(),
            rows,
        }
    }

    /// Create a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Names of the producers that blocked the row, if this is an incomplete-row error.
    pub fn missing_producers(&self) -> Option<&[String]> {
        match self {
            Self::IncompleteRow { missing } => Some(missing),
            _ => None,
        }
    }
}
