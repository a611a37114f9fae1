//! Trigger policy for automatic XP grants.
//!
//! The host process wires its own event sources (connect, chat, command
//! handlers, a periodic timer) to these methods; the policy itself - which
//! triggers grant, how much, and on what cooldown - lives here so every
//! host variant behaves identically.

use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use stratum_config::GrantsConfig;
use tokio::time::Instant;
use uuid::Uuid;

use crate::engine::ProgressEngine;

/// Minimum gap between two chat grants for the same player.
pub const CHAT_COOLDOWN: Duration = Duration::from_secs(10);

/// Playtime is granted once per elapsed minute of a tracked session.
pub const PLAYTIME_INTERVAL: Duration = Duration::from_secs(60);

/// XP amounts for the named triggers. Zero disables a trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrantAmounts {
    pub join: i64,
    pub chat: i64,
    pub command: i64,
    pub time_played: i64,
}

impl From<&GrantsConfig> for GrantAmounts {
    /// Map the configured task table onto trigger amounts. A disabled
    /// section or an absent task resolves to zero, which disables the
    /// trigger.
    fn from(config: &GrantsConfig) -> Self {
        Self {
            join: config.amount_for("join"),
            chat: config.amount_for("chat"),
            command: config.amount_for("command"),
            time_played: config.amount_for("time-played"),
        }
    }
}

struct Session {
    name: String,
    marker: Instant,
}

/// Automatic grant dispatcher over a [`ProgressEngine`].
pub struct AutoGrant {
    engine: Arc<ProgressEngine>,
    amounts: GrantAmounts,
    last_chat: DashMap<Uuid, Instant>,
    sessions: DashMap<Uuid, Session>,
}

impl AutoGrant {
    pub fn new(engine: Arc<ProgressEngine>, amounts: GrantAmounts) -> Self {
        Self {
            engine,
            amounts,
            last_chat: DashMap::new(),
            sessions: DashMap::new(),
        }
    }

    /// Join grant, and start of playtime tracking for this session.
    pub async fn on_join(&self, id: Uuid, name: &str) {
        self.sessions.insert(
            id,
            Session {
                name: name.to_string(),
                marker: Instant::now(),
            },
        );
        if self.amounts.join > 0 {
            self.engine.grant_xp(id, name, self.amounts.join).await;
        }
    }

    /// Chat grant, rate-limited to one per [`CHAT_COOLDOWN`] per player.
    pub async fn on_chat(&self, id: Uuid, name: &str) {
        if self.amounts.chat <= 0 {
            return;
        }
        let now = Instant::now();
        // Test-and-update under the entry lock, so two concurrent chat
        // events inside the window can't both claim the grant. The lock is
        // released before the await below.
        let claimed = match self.last_chat.entry(id) {
            Entry::Occupied(mut entry) => {
                if now.duration_since(*entry.get()) < CHAT_COOLDOWN {
                    false
                } else {
                    entry.insert(now);
                    true
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        };
        if claimed {
            self.engine.grant_xp(id, name, self.amounts.chat).await;
        }
    }

    /// Command grant, no cooldown.
    pub async fn on_command(&self, id: Uuid, name: &str) {
        if self.amounts.command > 0 {
            self.engine.grant_xp(id, name, self.amounts.command).await;
        }
    }

    /// Periodic playtime check; the host drives this once per tick.
    ///
    /// Each tracked session whose marker is at least a minute old is
    /// granted the playtime amount and its marker reset.
    pub async fn tick(&self) {
        if self.amounts.time_played <= 0 {
            return;
        }
        let now = Instant::now();
        let mut due = Vec::new();
        for mut entry in self.sessions.iter_mut() {
            let id = *entry.key();
            let session = entry.value_mut();
            if now.duration_since(session.marker) >= PLAYTIME_INTERVAL {
                session.marker = now;
                due.push((id, session.name.clone()));
            }
        }
        for (id, name) in due {
            self.engine
                .grant_xp(id, &name, self.amounts.time_played)
                .await;
        }
    }

    /// Drop per-session trackers and evict the cache entry on disconnect.
    pub fn on_disconnect(&self, id: Uuid) {
        self.sessions.remove(&id);
        self.last_chat.remove(&id);
        self.engine.invalidate(id);
    }
}
