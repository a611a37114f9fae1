//! In-memory store doubles shared by the crate's tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::curve::LevelCurve;
use crate::progress::PlayerProgress;
use crate::storage::{ProgressStore, StorageError, StorageResult};

/// The worked-example curve: {1: 100, 2: 150}, increment 100.
pub(crate) fn test_curve() -> LevelCurve {
    let costs: BTreeMap<u32, i64> = [(1, 100), (2, 150)].into_iter().collect();
    LevelCurve::new(costs, 100)
}

/// Store backed by a concurrent map, with a load counter for cache tests.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    records: DashMap<Uuid, PlayerProgress>,
    loads: AtomicUsize,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put(&self, progress: PlayerProgress) {
        self.records.insert(progress.id, progress);
    }

    pub(crate) fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn shutdown(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn load(&self, id: Uuid) -> StorageResult<Option<PlayerProgress>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.get(&id).map(|entry| entry.clone()))
    }

    async fn save(&self, progress: &PlayerProgress) -> StorageResult<()> {
        self.records.insert(progress.id, progress.clone());
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> StorageResult<bool> {
        Ok(self.records.contains_key(&id))
    }
}

/// Store whose saves take time to commit, for eviction race tests.
#[derive(Debug, Default)]
pub(crate) struct SlowStore {
    inner: MemoryStore,
    save_delay: Duration,
}

impl SlowStore {
    pub(crate) fn new(save_delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            save_delay,
        }
    }
}

#[async_trait]
impl ProgressStore for SlowStore {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn shutdown(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn load(&self, id: Uuid) -> StorageResult<Option<PlayerProgress>> {
        self.inner.load(id).await
    }

    async fn save(&self, progress: &PlayerProgress) -> StorageResult<()> {
        tokio::time::sleep(self.save_delay).await;
        self.inner.save(progress).await
    }

    async fn exists(&self, id: Uuid) -> StorageResult<bool> {
        self.inner.exists(id).await
    }
}

/// Store that fails on demand, for degradation tests.
pub(crate) struct FailingStore {
    pub(crate) fail_load: bool,
    pub(crate) fail_save: bool,
}

impl Default for FailingStore {
    fn default() -> Self {
        Self {
            fail_load: true,
            fail_save: true,
        }
    }
}

#[async_trait]
impl ProgressStore for FailingStore {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn shutdown(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn load(&self, _id: Uuid) -> StorageResult<Option<PlayerProgress>> {
        if self.fail_load {
            Err(StorageError::Query("injected load failure".into()))
        } else {
            Ok(None)
        }
    }

    async fn save(&self, _progress: &PlayerProgress) -> StorageResult<()> {
        if self.fail_save {
            Err(StorageError::Io("injected save failure".into()))
        } else {
            Ok(())
        }
    }

    async fn exists(&self, _id: Uuid) -> StorageResult<bool> {
        if self.fail_load {
            Err(StorageError::Query("injected exists failure".into()))
        } else {
            Ok(false)
        }
    }
}
