//! Embedded SurrealDB storage backend.
//!
//! The default backend: runs in-process over RocksDB for durable storage
//! or the in-memory engine for tests, with no external service to reach.

mod error;
mod store;

pub use error::{SurrealStoreError, SurrealStoreResult};
pub use store::SurrealProgressStore;
