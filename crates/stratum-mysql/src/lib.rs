//! MySQL storage backend.
//!
//! Backed by a sqlx connection pool sized from configuration. The pool is
//! created lazily; the first real network round-trip happens in
//! `initialize`, so an unreachable server surfaces as a fatal startup
//! error rather than a constructor failure.

mod error;
mod store;

pub use error::{MySqlStoreError, MySqlStoreResult};
pub use store::MySqlProgressStore;
