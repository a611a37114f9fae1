//! Storage backend selection.
//!
//! Maps the configured backend selector to a concrete [`ProgressStore`]
//! and runs its initialization. Selection never aborts (unknown selectors
//! fall back to the embedded database), but a backend that cannot
//! initialize is fatal: no progression data can be served without a
//! working store.

use std::sync::Arc;

use anyhow::Context;
use stratum_config::{Config, StorageKind};
use stratum_core::storage::ProgressStore;
use stratum_flatfile::FlatFileProgressStore;
use stratum_mysql::MySqlProgressStore;
use stratum_sqlite::SqliteProgressStore;
use stratum_surreal::SurrealProgressStore;
use tracing::info;

/// Construct and initialize the configured storage backend.
pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn ProgressStore>> {
    let kind = config.storage.kind();
    info!(backend = ?kind, "opening storage backend");

    let store: Arc<dyn ProgressStore> = match kind {
        StorageKind::Mysql => Arc::new(
            MySqlProgressStore::connect(&config.storage.mysql)
                .context("failed to configure mysql pool")?,
        ),
        StorageKind::Surreal => Arc::new(
            SurrealProgressStore::open(&config.storage.surreal.path)
                .await
                .context("failed to open embedded database")?,
        ),
        StorageKind::Sqlite => Arc::new(
            SqliteProgressStore::open(&config.storage.sqlite.path)
                .context("failed to open sqlite database")?,
        ),
        StorageKind::Yaml => Arc::new(FlatFileProgressStore::yaml(&config.storage.data_dir)),
        StorageKind::Json => Arc::new(FlatFileProgressStore::json(&config.storage.data_dir)),
    };

    store
        .initialize()
        .await
        .context("storage initialization failed")?;
    Ok(store)
}
