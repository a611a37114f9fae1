//! The persistent per-entity progression record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Level and cumulative XP for a single player.
///
/// `level` is always derived from `xp` through the [`LevelCurve`]; the two
/// fields are recomputed together on every mutation and never persisted in
/// an inconsistent pairing.
///
/// [`LevelCurve`]: crate::curve::LevelCurve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    /// Stable unique identifier of the player.
    pub id: Uuid,
    /// Last-known display name, overwritten on every grant.
    pub name: String,
    /// Current level, always >= 1.
    pub level: u32,
    /// Cumulative lifetime XP. 64-bit: sustained play overflows 32 bits.
    pub xp: i64,
}

impl PlayerProgress {
    /// Record for a player with no stored history: level 1, zero XP.
    pub fn fresh(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            level: 1,
            xp: 0,
        }
    }
}
