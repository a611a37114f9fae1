//! Error types for the MySQL backend.

use stratum_core::storage::StorageError;
use thiserror::Error;

/// MySQL backend error type.
#[derive(Debug, Error)]
pub enum MySqlStoreError {
    /// Pool or connection setup error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Underlying driver error.
    #[error("mysql error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Result type for MySQL operations.
pub type MySqlStoreResult<T> = Result<T, MySqlStoreError>;

impl From<MySqlStoreError> for StorageError {
    fn from(err: MySqlStoreError) -> Self {
        match err {
            MySqlStoreError::Connection(msg) => Self::Connection(msg),
            MySqlStoreError::Sqlx(e) => Self::Query(e.to_string()),
        }
    }
}
