//! Lane Dash - a three-lane arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, pools, spawning, scoring, progression)
//! - `tuning`: Data-driven game balance and variant presets
//! - `platform`: Fixed-timestep frame clock and browser bindings
//! - `error`: Validation errors for geometry and tuning

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use tuning::{GameConfig, Preset};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per browser frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Number of lanes
    pub const LANE_COUNT: usize = 3;
    /// Lane the player starts in
    pub const START_LANE: usize = 1;

    /// Default viewport
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Collision box of the player car (pixels)
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 90.0;
    /// Collision box of an entity at visual scale 1.0 (pixels)
    pub const ENTITY_SIZE: f32 = 40.0;
}

/// Clamp a lane move of `delta` to the valid lane range.
///
/// Returns `None` when the move would leave the road.
#[inline]
pub fn step_lane(lane: usize, delta: i32) -> Option<usize> {
    let next = lane as i32 + delta;
    if (0..consts::LANE_COUNT as i32).contains(&next) {
        Some(next as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_lane_bounds() {
        assert_eq!(step_lane(1, -1), Some(0));
        assert_eq!(step_lane(1, 1), Some(2));
        assert_eq!(step_lane(0, -1), None);
        assert_eq!(step_lane(2, 1), None);
    }
}
