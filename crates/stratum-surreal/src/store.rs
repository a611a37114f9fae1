//! Embedded SurrealDB implementation of the progress store contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stratum_core::progress::PlayerProgress;
use stratum_core::storage::{ProgressStore, StorageResult};
use surrealdb::engine::local::{Db, Mem, RocksDb};
use surrealdb::Surreal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{SurrealStoreError, SurrealStoreResult};

const TABLE: &str = "player_progress";

/// Stored shape of a record. The record id carries the player id, so only
/// the mutable fields live in the content.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredProgress {
    player_name: String,
    level: u32,
    xp: i64,
}

impl StoredProgress {
    fn from_progress(progress: &PlayerProgress) -> Self {
        Self {
            player_name: progress.name.clone(),
            level: progress.level,
            xp: progress.xp,
        }
    }

    fn into_progress(self, id: Uuid) -> PlayerProgress {
        PlayerProgress {
            id,
            name: self.player_name,
            level: self.level,
            xp: self.xp,
        }
    }
}

/// Progress store over an embedded SurrealDB engine.
pub struct SurrealProgressStore {
    db: Surreal<Db>,
}

impl SurrealProgressStore {
    /// Open a RocksDB-backed database at `path`, or the in-memory engine
    /// for `:memory:`.
    pub async fn open(path: &str) -> SurrealStoreResult<Self> {
        let db = if path.is_empty() || path == ":memory:" {
            Surreal::new::<Mem>(())
                .await
                .map_err(|e| SurrealStoreError::Connection(e.to_string()))?
        } else {
            Surreal::new::<RocksDb>(path).await.map_err(|e| {
                SurrealStoreError::Connection(format!("failed to open database at {path}: {e}"))
            })?
        };

        db.use_ns("stratum")
            .use_db("progress")
            .await
            .map_err(|e| SurrealStoreError::Connection(e.to_string()))?;

        Ok(Self { db })
    }

    /// In-memory store for testing.
    pub async fn memory() -> SurrealStoreResult<Self> {
        Self::open(":memory:").await
    }
}

#[async_trait]
impl ProgressStore for SurrealProgressStore {
    async fn initialize(&self) -> StorageResult<()> {
        self.db
            .query(format!("DEFINE TABLE IF NOT EXISTS {TABLE} SCHEMALESS"))
            .await
            .map_err(SurrealStoreError::from)?
            .check()
            .map_err(SurrealStoreError::from)?;
        info!("surrealdb storage initialized");
        Ok(())
    }

    async fn shutdown(&self) -> StorageResult<()> {
        // The embedded engine flushes on drop; operations complete before
        // their futures resolve, so there is no queue left to drain.
        debug!("surrealdb storage shut down");
        Ok(())
    }

    async fn load(&self, id: Uuid) -> StorageResult<Option<PlayerProgress>> {
        let record: Option<StoredProgress> = self
            .db
            .select((TABLE, id.to_string()))
            .await
            .map_err(SurrealStoreError::from)?;
        Ok(record.map(|r| r.into_progress(id)))
    }

    async fn save(&self, progress: &PlayerProgress) -> StorageResult<()> {
        let _: Option<StoredProgress> = self
            .db
            .upsert((TABLE, progress.id.to_string()))
            .content(StoredProgress::from_progress(progress))
            .await
            .map_err(SurrealStoreError::from)?;
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> StorageResult<bool> {
        let record: Option<StoredProgress> = self
            .db
            .select((TABLE, id.to_string()))
            .await
            .map_err(SurrealStoreError::from)?;
        Ok(record.is_some())
    }
}
