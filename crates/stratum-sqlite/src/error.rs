//! Error types for the SQLite backend.

use stratum_core::storage::StorageError;
use thiserror::Error;

/// SQLite backend error type.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Database open or directory creation error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Worker task failed before the statement ran.
    #[error("task error: {0}")]
    Task(String),

    /// Underlying rusqlite error.
    #[error("sqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

/// Result type for SQLite operations.
pub type SqliteStoreResult<T> = Result<T, SqliteStoreError>;

impl From<SqliteStoreError> for StorageError {
    fn from(err: SqliteStoreError) -> Self {
        match err {
            SqliteStoreError::Connection(msg) => Self::Connection(msg),
            SqliteStoreError::Task(msg) => Self::Io(msg),
            SqliteStoreError::Rusqlite(e) => Self::Query(e.to_string()),
        }
    }
}
