//! In-process cache of recently-touched progression records.
//!
//! The durable store is the system of record; this cache is the engine's
//! authoritative fast path, populated lazily and invalidated only on
//! explicit disconnect. Entries are never time-expired.

use dashmap::DashMap;
use tracing::warn;
use uuid::Uuid;

use crate::progress::PlayerProgress;
use crate::storage::ProgressStore;

/// Concurrent id -> progress map with lazy store-backed population.
#[derive(Debug, Default)]
pub struct ProgressCache {
    entries: DashMap<Uuid, PlayerProgress>,
}

impl ProgressCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached record for `id`, without touching the store.
    pub fn get(&self, id: Uuid) -> Option<PlayerProgress> {
        self.entries.get(&id).map(|entry| entry.clone())
    }

    /// Cached record for `id`, loading from `store` on a miss.
    ///
    /// A successful load populates the cache. A storage miss is a valid
    /// absent result and is not cached negatively: every later call for an
    /// unknown id re-queries the store until a record exists. A load error
    /// is logged and degrades to absent.
    pub async fn get_or_load(
        &self,
        id: Uuid,
        store: &dyn ProgressStore,
    ) -> Option<PlayerProgress> {
        if let Some(cached) = self.get(id) {
            return Some(cached);
        }

        match store.load(id).await {
            Ok(Some(progress)) => {
                self.entries.insert(id, progress.clone());
                Some(progress)
            }
            Ok(None) => None,
            Err(error) => {
                warn!(player = %id, %error, "failed to load progress, treating as absent");
                None
            }
        }
    }

    /// Insert or replace the entry for `progress.id`.
    pub fn insert(&self, progress: PlayerProgress) {
        self.entries.insert(progress.id, progress);
    }

    /// Drop the entry for `id` without touching durable storage.
    pub fn invalidate(&self, id: Uuid) {
        self.entries.remove(&id);
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingStore, MemoryStore};

    #[tokio::test]
    async fn get_or_load_populates_from_store() {
        let store = MemoryStore::new();
        let progress = PlayerProgress::fresh(Uuid::new_v4(), "alex");
        store.put(progress.clone());

        let cache = ProgressCache::new();
        assert!(cache.get(progress.id).is_none());

        let loaded = cache.get_or_load(progress.id, &store).await;
        assert_eq!(loaded, Some(progress.clone()));

        // Second call is served from cache.
        cache.get_or_load(progress.id, &store).await;
        assert_eq!(store.load_count(), 1);
    }

    #[tokio::test]
    async fn storage_miss_is_not_cached_negatively() {
        let store = MemoryStore::new();
        let cache = ProgressCache::new();
        let id = Uuid::new_v4();

        assert!(cache.get_or_load(id, &store).await.is_none());
        assert!(cache.get_or_load(id, &store).await.is_none());
        // Each miss re-queries the store.
        assert_eq!(store.load_count(), 2);

        let progress = PlayerProgress::fresh(id, "alex");
        store.put(progress.clone());
        assert_eq!(cache.get_or_load(id, &store).await, Some(progress));
    }

    #[tokio::test]
    async fn load_failure_degrades_to_absent() {
        let store = FailingStore::default();
        let cache = ProgressCache::new();

        assert!(cache.get_or_load(Uuid::new_v4(), &store).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_and_clear_drop_entries() {
        let cache = ProgressCache::new();
        let a = PlayerProgress::fresh(Uuid::new_v4(), "a");
        let b = PlayerProgress::fresh(Uuid::new_v4(), "b");
        cache.insert(a.clone());
        cache.insert(b.clone());
        assert_eq!(cache.len(), 2);

        cache.invalidate(a.id);
        assert!(cache.get(a.id).is_none());
        assert!(cache.get(b.id).is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
