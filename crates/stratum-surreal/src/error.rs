//! Error types for the SurrealDB backend.

use stratum_core::storage::StorageError;
use thiserror::Error;

/// SurrealDB backend error type.
#[derive(Debug, Error)]
pub enum SurrealStoreError {
    /// Engine could not be opened or namespace selection failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Underlying database error.
    #[error("surrealdb error: {0}")]
    Db(#[from] surrealdb::Error),
}

/// Result type for SurrealDB operations.
pub type SurrealStoreResult<T> = Result<T, SurrealStoreError>;

impl From<SurrealStoreError> for StorageError {
    fn from(err: SurrealStoreError) -> Self {
        match err {
            SurrealStoreError::Connection(msg) => Self::Connection(msg),
            SurrealStoreError::Db(e) => Self::Query(e.to_string()),
        }
    }
}
