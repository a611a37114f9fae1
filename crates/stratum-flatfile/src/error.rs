//! Error types for the flat-file backends.

use stratum_core::storage::StorageError;
use thiserror::Error;

/// Flat-file backend error type.
#[derive(Debug, Error)]
pub enum FlatFileError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML encode/decode failure.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON encode/decode failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for flat-file operations.
pub type FlatFileResult<T> = Result<T, FlatFileError>;

impl From<FlatFileError> for StorageError {
    fn from(err: FlatFileError) -> Self {
        match err {
            FlatFileError::Io(e) => Self::Io(e.to_string()),
            FlatFileError::Yaml(e) => Self::Serialization(e.to_string()),
            FlatFileError::Json(e) => Self::Serialization(e.to_string()),
        }
    }
}
