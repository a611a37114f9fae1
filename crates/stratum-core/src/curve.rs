//! Level curve: per-level XP costs with linear extrapolation.
//!
//! The curve maps a level to the XP cost of completing it. Levels beyond
//! the configured table extrapolate linearly from the highest configured
//! entry; the same formula covers gaps inside the table.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::progress::PlayerProgress;

/// Errors from level curve queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurveError {
    /// Levels are numbered from 1.
    #[error("invalid level {0}: levels start at 1")]
    InvalidLevel(u32),
}

/// Cost-per-level function plus extrapolation rule.
#[derive(Debug, Clone)]
pub struct LevelCurve {
    costs: BTreeMap<u32, i64>,
    default_increment: i64,
}

impl LevelCurve {
    /// Build a curve from an explicit cost table and the extrapolation step.
    pub fn new(costs: BTreeMap<u32, i64>, default_increment: i64) -> Self {
        Self {
            costs,
            default_increment,
        }
    }

    /// XP cost of completing `level`.
    ///
    /// Returns the configured value when present, otherwise
    /// `cost(highest) + (level - highest) * default_increment`. An empty
    /// table extrapolates from level 0 at cost 0.
    pub fn cost_of(&self, level: u32) -> Result<i64, CurveError> {
        if level == 0 {
            return Err(CurveError::InvalidLevel(level));
        }
        Ok(self.cost(level))
    }

    /// Cost lookup for levels known to be >= 1.
    fn cost(&self, level: u32) -> i64 {
        if let Some(&cost) = self.costs.get(&level) {
            return cost;
        }
        let (highest, highest_cost) = self
            .costs
            .last_key_value()
            .map(|(&l, &c)| (l, c))
            .unwrap_or((0, 0));
        highest_cost + (level as i64 - highest as i64) * self.default_increment
    }

    /// Largest level whose cumulative cost does not exceed `total_xp`.
    ///
    /// Negative input clamps to level 1. A non-positive cost terminates the
    /// walk; a well-formed curve has costs >= 1, so the loop always makes
    /// strictly positive progress.
    pub fn level_for(&self, total_xp: i64) -> u32 {
        if total_xp < 0 {
            return 1;
        }

        let mut level = 1u32;
        let mut accumulated = 0i64;
        loop {
            let cost = self.cost(level);
            if cost <= 0 || accumulated + cost > total_xp {
                break;
            }
            accumulated += cost;
            level += 1;
        }
        level
    }

    /// Total cost of all levels strictly below `level`.
    fn cost_below(&self, level: u32) -> i64 {
        (1..level).map(|l| self.cost(l)).sum()
    }

    /// XP still needed to reach the level after the current one.
    pub fn xp_to_next_level(&self, progress: &PlayerProgress) -> i64 {
        let within = progress.xp - self.cost_below(progress.level);
        self.cost(progress.level + 1) - within
    }

    /// Fraction of the current level's cost already earned, in `[0.0, 1.0]`.
    ///
    /// Denominator is the cost of the current level; a non-positive cost
    /// yields 1.0.
    pub fn progress_fraction(&self, progress: &PlayerProgress) -> f64 {
        let needed = self.cost(progress.level);
        if needed <= 0 {
            return 1.0;
        }
        let within = progress.xp - self.cost_below(progress.level);
        (within as f64 / needed as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn curve(entries: &[(u32, i64)], increment: i64) -> LevelCurve {
        LevelCurve::new(entries.iter().copied().collect(), increment)
    }

    fn at(curve: &LevelCurve, xp: i64) -> PlayerProgress {
        let mut p = PlayerProgress::fresh(Uuid::new_v4(), "test");
        p.xp = xp;
        p.level = curve.level_for(xp);
        p
    }

    #[test]
    fn cost_of_rejects_level_zero() {
        let c = curve(&[(1, 100)], 100);
        assert_eq!(c.cost_of(0), Err(CurveError::InvalidLevel(0)));
    }

    #[test]
    fn cost_of_uses_configured_values() {
        let c = curve(&[(1, 100), (2, 150)], 100);
        assert_eq!(c.cost_of(1).unwrap(), 100);
        assert_eq!(c.cost_of(2).unwrap(), 150);
    }

    #[test]
    fn cost_of_extrapolates_beyond_table() {
        // Only level 1 configured at 100, increment 100: cost(5) = 100 + 4*100.
        let c = curve(&[(1, 100)], 100);
        assert_eq!(c.cost_of(5).unwrap(), 500);
    }

    #[test]
    fn cost_of_extrapolates_from_empty_table() {
        let c = curve(&[], 50);
        assert_eq!(c.cost_of(1).unwrap(), 50);
        assert_eq!(c.cost_of(4).unwrap(), 200);
    }

    #[test]
    fn level_for_zero_and_negative_is_one() {
        let c = curve(&[(1, 100)], 100);
        assert_eq!(c.level_for(0), 1);
        assert_eq!(c.level_for(-500), 1);
    }

    #[test]
    fn level_for_worked_example() {
        // Table {1: 100, 2: 150}, increment 100. 250 XP clears levels 1 and 2
        // exactly; cost(3) extrapolates to 250 which exceeds the remainder.
        let c = curve(&[(1, 100), (2, 150)], 100);
        assert_eq!(c.level_for(250), 3);
        assert_eq!(c.level_for(249), 2);
        assert_eq!(c.level_for(499), 3);
        assert_eq!(c.level_for(500), 4);
    }

    #[test]
    fn level_for_is_monotone() {
        let c = curve(&[(1, 100), (2, 150), (5, 700)], 100);
        let mut previous = 0;
        for xp in 0..2_000 {
            let level = c.level_for(xp);
            assert!(level >= previous, "level dropped at xp={xp}");
            previous = level;
        }
    }

    #[test]
    fn level_for_terminates_on_malformed_curve() {
        let c = curve(&[(1, 0)], 0);
        assert_eq!(c.level_for(1_000_000), 1);
    }

    #[test]
    fn xp_to_next_level_counts_remaining_cost() {
        let c = curve(&[(1, 100), (2, 150)], 100);
        // 120 XP: level 2, 20 XP into it, cost(3) = 250.
        let p = at(&c, 120);
        assert_eq!(p.level, 2);
        assert_eq!(c.xp_to_next_level(&p), 230);
    }

    #[test]
    fn progress_fraction_stays_in_unit_interval() {
        let c = curve(&[(1, 100), (2, 150)], 100);
        for xp in -50..1_000 {
            let p = at(&c, xp.max(0));
            let fraction = c.progress_fraction(&p);
            assert!((0.0..=1.0).contains(&fraction), "out of range at xp={xp}");
        }
    }

    #[test]
    fn progress_fraction_uses_current_level_cost() {
        let c = curve(&[(1, 100), (2, 150)], 100);
        // 150 XP: level 2, 50 of 150 earned.
        let p = at(&c, 150);
        assert!((c.progress_fraction(&p) - 50.0 / 150.0).abs() < 1e-9);
    }

    #[test]
    fn progress_fraction_clamps_non_positive_cost() {
        let c = curve(&[(1, -5)], 0);
        let p = PlayerProgress::fresh(Uuid::new_v4(), "test");
        assert_eq!(c.progress_fraction(&p), 1.0);
    }
}
