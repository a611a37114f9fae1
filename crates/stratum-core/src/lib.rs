//! Core progression engine for Stratum.
//!
//! This crate owns everything with real concurrency or consistency hazards:
//! the level arithmetic, the in-process cache, the write-through grant
//! sequence, and the storage contract the backend crates implement.
//!
//! The layering is strictly leaf-first:
//!
//! - [`curve`] - pure level/XP arithmetic, no I/O
//! - [`progress`] - the persistent record type
//! - [`storage`] - the async contract backends implement
//! - [`cache`] - lazy in-memory view over a store
//! - [`engine`] - the grant orchestration (read, mutate, write through, notify)
//! - [`notify`] - the event channel between engine and presentation
//! - [`grants`] - trigger policy for automatic grants (join/chat/command/playtime)
//! - [`placeholders`] - bounded synchronous-style query facade

pub mod cache;
pub mod curve;
pub mod engine;
pub mod grants;
pub mod notify;
pub mod placeholders;
pub mod progress;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::ProgressCache;
pub use curve::{CurveError, LevelCurve};
pub use engine::{GrantOutcome, ProgressEngine};
pub use grants::{AutoGrant, GrantAmounts};
pub use notify::{EventReceiver, EventSender, ProgressEvent};
pub use placeholders::PlaceholderResolver;
pub use progress::PlayerProgress;
pub use storage::{ProgressStore, StorageError, StorageResult};
