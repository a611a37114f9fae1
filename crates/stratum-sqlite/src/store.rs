//! Blocking-pool SQLite implementation of the progress store contract.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use stratum_core::progress::PlayerProgress;
use stratum_core::storage::{ProgressStore, StorageResult};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{SqliteStoreError, SqliteStoreResult};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS player_progress (
    player_id TEXT PRIMARY KEY,
    player_name TEXT NOT NULL,
    level INTEGER NOT NULL DEFAULT 1,
    xp INTEGER NOT NULL DEFAULT 0
)";

/// Progress store over a single mutex-guarded SQLite connection.
#[derive(Clone)]
pub struct SqliteProgressStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProgressStore {
    /// Open (or create) the database at `path`. `:memory:` opens the
    /// in-memory database.
    pub fn open(path: &Path) -> SqliteStoreResult<Self> {
        let conn = if path.to_str() == Some(":memory:") {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        SqliteStoreError::Connection(format!("failed to create directory: {e}"))
                    })?;
                }
            }
            let conn = Connection::open(path)?;
            conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            conn
        };
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory store for testing.
    pub fn memory() -> SqliteStoreResult<Self> {
        Self::open(Path::new(":memory:"))
    }

    /// Run a closure against the connection on the blocking pool.
    async fn call<F, T>(&self, f: F) -> SqliteStoreResult<T>
    where
        F: FnOnce(&Connection) -> SqliteStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            f(&conn)
        })
        .await
        .map_err(|e| SqliteStoreError::Task(e.to_string()))?
    }
}

#[async_trait]
impl ProgressStore for SqliteProgressStore {
    async fn initialize(&self) -> StorageResult<()> {
        self.call(|conn| {
            conn.execute_batch(CREATE_TABLE)?;
            Ok(())
        })
        .await?;
        info!("sqlite storage initialized");
        Ok(())
    }

    async fn shutdown(&self) -> StorageResult<()> {
        // Taking the connection lock once means every write submitted
        // before shutdown has committed by the time this resolves.
        self.call(|_conn| Ok(())).await?;
        debug!("sqlite storage shut down");
        Ok(())
    }

    async fn load(&self, id: Uuid) -> StorageResult<Option<PlayerProgress>> {
        let record = self
            .call(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT player_name, level, xp FROM player_progress WHERE player_id = ?1",
                        [id.to_string()],
                        |row| {
                            Ok(PlayerProgress {
                                id,
                                name: row.get(0)?,
                                level: row.get(1)?,
                                xp: row.get(2)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;
        Ok(record)
    }

    async fn save(&self, progress: &PlayerProgress) -> StorageResult<()> {
        let progress = progress.clone();
        self.call(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO player_progress (player_id, player_name, level, xp) \
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    progress.id.to_string(),
                    progress.name,
                    progress.level,
                    progress.xp
                ],
            )?;
            Ok(())
        })
        .await?;
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> StorageResult<bool> {
        let present = self
            .call(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT 1 FROM player_progress WHERE player_id = ?1",
                        [id.to_string()],
                        |_| Ok(()),
                    )
                    .optional()?;
                Ok(row.is_some())
            })
            .await?;
        Ok(present)
    }
}
