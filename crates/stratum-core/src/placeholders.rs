//! Bounded query facade for external token integrations.
//!
//! Query integrations expect an answer within a short bound; each token
//! resolves through the async engine API under a timeout and substitutes a
//! safe default (level 1, zero XP, zero progress) when the bound is
//! exceeded. The fallback is this facade's policy, not an engine guarantee.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use uuid::Uuid;

use crate::engine::ProgressEngine;

/// Default resolution bound.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Resolves progression tokens against the engine.
pub struct PlaceholderResolver {
    engine: Arc<ProgressEngine>,
    timeout: Duration,
}

impl PlaceholderResolver {
    pub fn new(engine: Arc<ProgressEngine>) -> Self {
        Self::with_timeout(engine, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(engine: Arc<ProgressEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    /// Resolve a token for a player. Unknown tokens return `None`.
    ///
    /// Recognized tokens (with `-`/`_`/joined alias spellings):
    /// `level`, `xp`, `xp_needed`, `next_level`, `level_progress`.
    pub async fn resolve(&self, id: Uuid, token: &str) -> Option<String> {
        match token {
            "level" => Some(self.level(id).await.to_string()),
            "xp" => Some(self.xp(id).await.to_string()),
            "xp_needed" | "xp-needed" | "xpneeded" => {
                Some(self.xp_needed(id).await.to_string())
            }
            "next_level" | "next-level" | "nextlevel" => {
                Some((self.level(id).await + 1).to_string())
            }
            "level_progress" | "level-progress" | "levelprogress" => {
                Some(format!("{:.1}%", self.progress(id).await * 100.0))
            }
            _ => None,
        }
    }

    async fn level(&self, id: Uuid) -> u32 {
        timeout(self.timeout, self.engine.level(id))
            .await
            .unwrap_or(1)
    }

    async fn xp(&self, id: Uuid) -> i64 {
        timeout(self.timeout, self.engine.xp(id))
            .await
            .unwrap_or(0)
    }

    async fn xp_needed(&self, id: Uuid) -> i64 {
        timeout(self.timeout, self.engine.xp_to_next_level(id))
            .await
            .unwrap_or(0)
    }

    async fn progress(&self, id: Uuid) -> f64 {
        timeout(self.timeout, self.engine.progress_fraction(id))
            .await
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify;
    use crate::test_support::{test_curve, FailingStore, MemoryStore};
    use crate::ProgressEngine;

    fn resolver_with(
        store: Arc<dyn crate::ProgressStore>,
    ) -> (PlaceholderResolver, Arc<ProgressEngine>, notify::EventReceiver) {
        let (tx, rx) = notify::channel(64);
        let engine = Arc::new(ProgressEngine::new(test_curve(), store, tx));
        (
            PlaceholderResolver::new(Arc::clone(&engine)),
            engine,
            rx,
        )
    }

    #[tokio::test]
    async fn resolves_all_tokens_for_known_player() {
        let (resolver, engine, _events) = resolver_with(Arc::new(MemoryStore::new()));
        let id = Uuid::new_v4();
        // 150 XP: level 2, 50/150 into it, 250 needed for level 3.
        engine.grant_xp(id, "steve", 150).await;

        assert_eq!(resolver.resolve(id, "level").await.as_deref(), Some("2"));
        assert_eq!(resolver.resolve(id, "xp").await.as_deref(), Some("150"));
        assert_eq!(
            resolver.resolve(id, "xp_needed").await.as_deref(),
            Some("200")
        );
        assert_eq!(
            resolver.resolve(id, "next_level").await.as_deref(),
            Some("3")
        );
        assert_eq!(
            resolver.resolve(id, "level_progress").await.as_deref(),
            Some("33.3%")
        );
    }

    #[tokio::test]
    async fn alias_spellings_resolve() {
        let (resolver, _engine, _events) = resolver_with(Arc::new(MemoryStore::new()));
        let id = Uuid::new_v4();

        assert!(resolver.resolve(id, "xp-needed").await.is_some());
        assert!(resolver.resolve(id, "nextlevel").await.is_some());
        assert!(resolver.resolve(id, "level-progress").await.is_some());
    }

    #[tokio::test]
    async fn unknown_token_is_none() {
        let (resolver, _engine, _events) = resolver_with(Arc::new(MemoryStore::new()));
        assert!(resolver.resolve(Uuid::new_v4(), "bogus").await.is_none());
    }

    #[tokio::test]
    async fn unknown_player_gets_safe_defaults() {
        let (resolver, _engine, _events) = resolver_with(Arc::new(MemoryStore::new()));
        let id = Uuid::new_v4();

        assert_eq!(resolver.resolve(id, "level").await.as_deref(), Some("1"));
        assert_eq!(resolver.resolve(id, "xp").await.as_deref(), Some("0"));
        assert_eq!(
            resolver.resolve(id, "level_progress").await.as_deref(),
            Some("0.0%")
        );
    }

    #[tokio::test]
    async fn store_failure_still_answers_with_defaults() {
        let (resolver, _engine, _events) = resolver_with(Arc::new(FailingStore::default()));
        let id = Uuid::new_v4();

        assert_eq!(resolver.resolve(id, "level").await.as_deref(), Some("1"));
        assert_eq!(resolver.resolve(id, "xp").await.as_deref(), Some("0"));
    }
}
