//! Grant orchestration: read, mutate, write through, notify.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::ProgressCache;
use crate::curve::LevelCurve;
use crate::notify::{EventSender, ProgressEvent};
use crate::progress::PlayerProgress;
use crate::storage::ProgressStore;

/// Result of a single grant.
#[derive(Debug, Clone)]
pub struct GrantOutcome {
    /// Record as written by this grant.
    pub progress: PlayerProgress,
    /// Whether this grant crossed a level boundary upward.
    pub leveled_up: bool,
}

/// Orchestrates XP grants over a cache and a durable store.
///
/// Grants for the same player are serialized through a per-id lane so two
/// concurrent grants can never lose an update: each one sees the other's
/// write. Grants for different players proceed in parallel.
///
/// Durability is best-effort: the cache write is unconditional and a store
/// failure is logged, never surfaced to the caller.
pub struct ProgressEngine {
    curve: LevelCurve,
    cache: ProgressCache,
    store: Arc<dyn ProgressStore>,
    events: EventSender,
    lanes: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl ProgressEngine {
    pub fn new(curve: LevelCurve, store: Arc<dyn ProgressStore>, events: EventSender) -> Self {
        Self {
            curve,
            cache: ProgressCache::new(),
            store,
            events,
            lanes: Mutex::new(HashMap::new()),
        }
    }

    /// Exclusive execution lane for `id`.
    fn lane(&self, id: Uuid) -> Arc<AsyncMutex<()>> {
        Arc::clone(self.lanes.lock().entry(id).or_default())
    }

    /// Grant `amount` XP to a player, creating a fresh record on first
    /// contact. The display name is overwritten last-write-wins.
    ///
    /// Negative amounts are accepted and decrease cumulative XP, which can
    /// decrease the level; callers that want XP to stay monotone validate
    /// the sign themselves.
    pub async fn grant_xp(&self, id: Uuid, name: &str, amount: i64) -> GrantOutcome {
        let lane = self.lane(id);
        let _guard = lane.lock().await;

        let mut progress = self
            .cache
            .get_or_load(id, self.store.as_ref())
            .await
            .unwrap_or_else(|| PlayerProgress::fresh(id, name));

        let old_level = progress.level;
        progress.xp += amount;
        progress.level = self.curve.level_for(progress.xp);
        progress.name = name.to_string();
        let leveled_up = progress.level > old_level;

        self.cache.insert(progress.clone());

        if let Err(error) = self.store.save(&progress).await {
            warn!(player = %id, %error, "failed to persist progress");
        }

        // Published under the lane guard so per-player events stay ordered.
        let event = ProgressEvent {
            id,
            progress: progress.clone(),
            leveled_up,
        };
        if self.events.send(event).await.is_err() {
            debug!(player = %id, "progress event receiver dropped");
        }

        GrantOutcome {
            progress,
            leveled_up,
        }
    }

    /// Current record for a player, if one exists in cache or store.
    pub async fn progress(&self, id: Uuid) -> Option<PlayerProgress> {
        self.cache.get_or_load(id, self.store.as_ref()).await
    }

    /// Current level; 1 for unknown players.
    pub async fn level(&self, id: Uuid) -> u32 {
        self.progress(id).await.map_or(1, |p| p.level)
    }

    /// Cumulative XP; 0 for unknown players.
    pub async fn xp(&self, id: Uuid) -> i64 {
        self.progress(id).await.map_or(0, |p| p.xp)
    }

    /// XP still needed to reach the next level.
    pub async fn xp_to_next_level(&self, id: Uuid) -> i64 {
        let progress = self
            .progress(id)
            .await
            .unwrap_or_else(|| PlayerProgress::fresh(id, ""));
        self.curve.xp_to_next_level(&progress)
    }

    /// Fraction of the current level already earned; 0.0 for unknown players.
    pub async fn progress_fraction(&self, id: Uuid) -> f64 {
        match self.progress(id).await {
            Some(progress) => self.curve.progress_fraction(&progress),
            None => 0.0,
        }
    }

    /// Evict a player from the cache on disconnect. Durable storage is
    /// untouched.
    ///
    /// The lane is dropped only when idle. An in-flight grant holds a clone
    /// of the lane `Arc`, and `lane()` clones under the same map lock, so a
    /// grant racing this call still serializes against it instead of
    /// getting a fresh lane.
    pub fn invalidate(&self, id: Uuid) {
        self.cache.invalidate(id);
        let mut lanes = self.lanes.lock();
        if lanes.get(&id).is_some_and(|lane| Arc::strong_count(lane) == 1) {
            lanes.remove(&id);
        }
    }

    /// Evict everything; used at system shutdown. Busy lanes are retained
    /// for the same reason as in [`ProgressEngine::invalidate`].
    pub fn clear(&self) {
        self.cache.clear();
        self.lanes.lock().retain(|_, lane| Arc::strong_count(lane) > 1);
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }
}
