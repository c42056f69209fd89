//! Error types for prodo store operations.

use prodo_core::TaskId;
use thiserror::Error;

/// Errors that can occur during `SqliteStore` operations.
#[derive(Error, Debug)]
pub enum SqliteStoreError {
    /// Task was not found in the table.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// A stored date column did not parse.
    #[error("Invalid due date value: {0}")]
    InvalidDate(String),

    /// A stored timestamp column did not parse.
    #[error("Invalid created_at value: {0}")]
    InvalidTimestamp(String),

    /// A stored enumeration column held an unknown token.
    #[error("Invalid {field} value: {value}")]
    InvalidField {
        /// Column name.
        field: &'static str,
        /// Offending stored value.
        value: String,
    },

    /// SQLite error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other unclassified error.
    #[error("Other error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for SqliteStoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
