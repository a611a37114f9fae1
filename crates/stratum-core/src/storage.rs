//! Storage abstraction for progression records.
//!
//! Five interchangeable backends implement this contract (MySQL, embedded
//! SurrealDB, SQLite, YAML flat files, JSON flat files). Backends return
//! honest `Result`s; the availability policy of the system - load failures
//! degrade to "absent", save failures are logged and swallowed - lives in
//! the cache and engine layers, not here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::progress::PlayerProgress;

/// Common result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage operation errors.
///
/// Backend crates define their own error enums around their native driver
/// errors and convert into this type at the contract boundary.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum StorageError {
    /// Backend unreachable or connection setup failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// A query or statement failed.
    #[error("query error: {0}")]
    Query(String),

    /// Schema creation or migration failed.
    #[error("schema error: {0}")]
    Schema(String),

    /// Record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Filesystem-level failure.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Async persistence contract for progression records.
///
/// Implementations must be `Send + Sync`; every operation performs its I/O
/// off the caller's context (a driver pool, `spawn_blocking`, or async fs)
/// and returns a future rather than blocking.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Create schema objects or directories. Idempotent.
    ///
    /// A failure here is fatal to startup: no progression data can be
    /// served without a working store, so callers propagate it.
    async fn initialize(&self) -> StorageResult<()>;

    /// Release connections and drain in-flight writes.
    ///
    /// Must be awaited before process exit so the last grant issued before
    /// shutdown is not dropped.
    async fn shutdown(&self) -> StorageResult<()>;

    /// Load the record for `id`, or `None` if no record exists.
    ///
    /// `Ok(None)` is the normal absent case; `Err` is reserved for real
    /// I/O failures.
    async fn load(&self, id: Uuid) -> StorageResult<Option<PlayerProgress>>;

    /// Upsert keyed by `progress.id`: insert if new, overwrite name, level
    /// and xp if existing. Safe to call repeatedly with the same id.
    async fn save(&self, progress: &PlayerProgress) -> StorageResult<()>;

    /// Presence check, independent of `load`.
    async fn exists(&self, id: Uuid) -> StorageResult<bool>;
}
