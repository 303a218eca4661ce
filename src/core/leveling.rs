//! Score and level progression.

use super::config::LevelingConfig;
use super::types::Progression;
use serde::{Deserialize, Serialize};

/// Difficulty after a level transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelUp {
    pub level: u32,
    pub game_speed: f64,
    pub gap: f64,
}

/// Count one passed pipe and apply a level transition if the new score is
/// exactly the threshold for the current level.
///
/// Score only ever grows by one here, so each threshold is hit exactly once.
pub fn record_pass(progression: &mut Progression, leveling: &LevelingConfig) -> Option<LevelUp> {
    progression.score += 1;

    let threshold = leveling
        .thresholds
        .get(progression.level as usize - 1)
        .copied()?;
    if progression.score != threshold {
        return None;
    }

    progression.level += 1;
    progression.game_speed += leveling.speed_step;
    progression.gap = (progression.gap - leveling.gap_step).max(leveling.min_gap);

    Some(LevelUp {
        level: progression.level,
        game_speed: progression.game_speed,
        gap: progression.gap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::types::initial_progression;

    fn setup() -> (Progression, LevelingConfig) {
        let config = GameConfig::default();
        (initial_progression(&config), config.leveling)
    }

    #[test]
    fn test_score_increments_by_one() {
        let (mut p, leveling) = setup();
        assert!(record_pass(&mut p, &leveling).is_none());
        assert_eq!(p.score, 1);
        assert_eq!(p.level, 1);
    }

    #[test]
    fn test_first_threshold_fires_once() {
        let (mut p, leveling) = setup();
        let mut level_ups = Vec::new();
        for _ in 0..10 {
            if let Some(up) = record_pass(&mut p, &leveling) {
                level_ups.push((p.score, up));
            }
        }
        assert_eq!(level_ups.len(), 1);
        let (score, up) = level_ups[0];
        assert_eq!(score, 10);
        assert_eq!(up.level, 2);
        assert!((up.game_speed - 3.0).abs() < f64::EPSILON);
        assert!((up.gap - 160.0).abs() < f64::EPSILON);
        assert_eq!(p.level, 2);
    }

    #[test]
    fn test_second_threshold_and_beyond() {
        let (mut p, leveling) = setup();
        let mut fired_at = Vec::new();
        for _ in 0..100 {
            if record_pass(&mut p, &leveling).is_some() {
                fired_at.push(p.score);
            }
        }
        assert_eq!(fired_at, vec![10, 25]);
        assert_eq!(p.level, 3);
        assert!((p.game_speed - 4.0).abs() < f64::EPSILON);
        assert!((p.gap - 140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gap_never_below_minimum() {
        let (mut p, mut leveling) = setup();
        leveling.thresholds = (1..=20).collect();
        for _ in 0..20 {
            record_pass(&mut p, &leveling);
        }
        assert_eq!(p.level, 21);
        assert!((p.gap - leveling.min_gap).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_thresholds_means_no_leveling() {
        let (mut p, mut leveling) = setup();
        leveling.thresholds.clear();
        for _ in 0..50 {
            assert!(record_pass(&mut p, &leveling).is_none());
        }
        assert_eq!(p.level, 1);
    }
}
