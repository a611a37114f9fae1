//! SQLite storage backend.
//!
//! rusqlite is synchronous, so the store holds a single
//! `Arc<Mutex<Connection>>` and marshals every call through
//! `tokio::task::spawn_blocking`. WAL mode gives multiple readers and one
//! writer, which matches the engine's per-player write serialization.

mod error;
mod store;

pub use error::{SqliteStoreError, SqliteStoreResult};
pub use store::SqliteProgressStore;
