//! Distance and difficulty
//!
//! Two ramps run side by side: every tick each pool speed creeps up a
//! little, and every level threshold crossed adds a one-off boost.

use super::pool::EntityKind;
use super::state::{GameEvent, Progression};
use crate::tuning::GameConfig;

/// Per-tick speed creep, applied while unpaused
pub fn creep_speeds(progression: &mut Progression, config: &GameConfig) {
    for kind in EntityKind::ALL {
        *progression.speeds.get_mut(kind) += config.kind(kind).creep_per_tick;
    }
}

/// Level reached once `miles` have been covered (1-based)
pub fn level_for_miles(miles: u32, thresholds: &[u32]) -> u32 {
    thresholds.iter().take_while(|&&t| miles >= t).count() as u32 + 1
}

/// One mile further. Crossing the next level threshold bumps the level and
/// boosts every pool speed once.
pub fn advance_miles(progression: &mut Progression, config: &GameConfig, events: &mut Vec<GameEvent>) {
    progression.miles += 1;
    events.push(GameEvent::MileAdvanced {
        miles: progression.miles,
    });

    let next_threshold = config
        .level_thresholds
        .get(progression.level as usize - 1)
        .copied();
    if next_threshold.is_some_and(|t| progression.miles >= t) {
        progression.level += 1;
        for kind in EntityKind::ALL {
            *progression.speeds.get_mut(kind) += config.kind(kind).level_boost;
        }
        log::info!(
            "Level {} at {} miles (coin speed {:.1})",
            progression.level,
            progression.miles,
            progression.speeds.coin
        );
        events.push(GameEvent::LevelUp {
            level: progression.level,
        });
    }
}
