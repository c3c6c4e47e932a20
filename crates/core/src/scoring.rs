//! Scoring module - score, level and speed progression
//!
//! - A lock that clears `n` rows scores `n * points_per_row * level`, using the
//!   level in effect before the clear.
//! - `level = 1 + score / level_score_step`.
//! - `interval = max(min, base - (level - 1) * step)` milliseconds.
//!
//! All arithmetic saturates, so very long games settle on the interval floor
//! instead of wrapping.

use crate::config::EngineConfig;

/// Points for clearing `rows` rows in one lock at `level`.
pub fn line_clear_points(rows: u32, level: u32, points_per_row: u32) -> u32 {
    rows.saturating_mul(points_per_row).saturating_mul(level)
}

/// Level reached at `score`. Non-decreasing in `score`, and 1 at 0.
pub fn level_for_score(score: u32, level_score_step: u32) -> u32 {
    let step = level_score_step.max(1);
    1u32.saturating_add(score / step)
}

/// Gravity interval at `level`, never below `min_interval_ms`.
pub fn tick_interval_ms(
    level: u32,
    base_interval_ms: u32,
    interval_step_ms: u32,
    min_interval_ms: u32,
) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(interval_step_ms);
    base_interval_ms
        .saturating_sub(reduction)
        .max(min_interval_ms)
        .max(1)
}

/// Scoring helpers bound to one config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    points_per_row: u32,
    level_score_step: u32,
    base_interval_ms: u32,
    interval_step_ms: u32,
    min_interval_ms: u32,
}

impl Progression {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            points_per_row: config.points_per_row,
            level_score_step: config.level_score_step,
            base_interval_ms: config.base_interval_ms,
            interval_step_ms: config.interval_step_ms,
            min_interval_ms: config.min_interval_ms,
        }
    }

    pub fn points(&self, rows: u32, level: u32) -> u32 {
        line_clear_points(rows, level, self.points_per_row)
    }

    pub fn level(&self, score: u32) -> u32 {
        level_for_score(score, self.level_score_step)
    }

    pub fn interval_ms(&self, level: u32) -> u32 {
        tick_interval_ms(
            level,
            self.base_interval_ms,
            self.interval_step_ms,
            self.min_interval_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(1, 1, 10), 10);
        assert_eq!(line_clear_points(2, 1, 10), 20);
        assert_eq!(line_clear_points(4, 3, 10), 120);
        assert_eq!(line_clear_points(0, 5, 10), 0);
        assert_eq!(line_clear_points(u32::MAX, 2, 10), u32::MAX);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_score(0, 100), 1);
        assert_eq!(level_for_score(99, 100), 1);
        assert_eq!(level_for_score(100, 100), 2);
        assert_eq!(level_for_score(250, 100), 3);
        assert_eq!(level_for_score(u32::MAX, 1), u32::MAX);
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut last = level_for_score(0, 100);
        for score in (0..10_000).step_by(7) {
            let level = level_for_score(score, 100);
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn test_tick_intervals() {
        assert_eq!(tick_interval_ms(1, 500, 50, 100), 500);
        assert_eq!(tick_interval_ms(2, 500, 50, 100), 450);
        assert_eq!(tick_interval_ms(9, 500, 50, 100), 100);
        assert_eq!(tick_interval_ms(10, 500, 50, 100), 100);
        assert_eq!(tick_interval_ms(u32::MAX, 500, 50, 100), 100);
    }

    #[test]
    fn test_interval_never_reaches_zero() {
        assert_eq!(tick_interval_ms(1000, 500, 50, 0), 1);
    }

    #[test]
    fn progression_reads_config() {
        let config = EngineConfig {
            points_per_row: 25,
            level_score_step: 50,
            ..EngineConfig::default()
        };
        let p = Progression::new(&config);
        assert_eq!(p.points(2, 3), 150);
        assert_eq!(p.level(150), 4);
        assert_eq!(p.interval_ms(4), 350);
    }
}
