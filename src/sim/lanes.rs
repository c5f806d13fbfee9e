//! Lane geometry
//!
//! Everything on the road is stored by lane index. Absolute x positions are
//! derived from the current [`LaneSet`], so a resize only has to rebuild it.

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;
use crate::error::{Error, Result};

/// Lane centers for a viewport width: 1/4, 1/2 and 3/4 of the way across
pub fn lane_positions(viewport_width: f32) -> [f32; LANE_COUNT] {
    let step = viewport_width / (LANE_COUNT + 1) as f32;
    [step, step * 2.0, step * 3.0]
}

/// Validated viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(Error::InvalidViewport { width, height })
        }
    }
}

/// The three lane centers, strictly increasing for any valid viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneSet {
    xs: [f32; LANE_COUNT],
}

impl LaneSet {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        // A positive finite width always yields increasing centers
        Self {
            xs: lane_positions(viewport.width),
        }
    }

    /// X coordinate of a lane (index clamped to the road)
    #[inline]
    pub fn x(&self, lane: usize) -> f32 {
        self.xs[lane.min(LANE_COUNT - 1)]
    }

    pub fn positions(&self) -> [f32; LANE_COUNT] {
        self.xs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_positions_quarters() {
        assert_eq!(lane_positions(800.0), [200.0, 400.0, 600.0]);
        assert_eq!(lane_positions(1200.0), [300.0, 600.0, 900.0]);
    }

    #[test]
    fn test_lane_set_is_strictly_increasing() {
        for width in [1.0, 320.0, 800.0, 4096.0] {
            let xs = LaneSet::for_viewport(&Viewport::new(width, 600.0).unwrap()).positions();
            assert!(xs.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_viewport_rejects_bad_dimensions() {
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, -1.0).is_err());
        assert!(Viewport::new(f32::NAN, 600.0).is_err());
        assert!(Viewport::new(f32::INFINITY, 600.0).is_err());
        assert!(Viewport::new(800.0, 600.0).is_ok());
    }

    #[test]
    fn test_lane_x_clamps_index() {
        let lanes = LaneSet::for_viewport(&Viewport::new(800.0, 600.0).unwrap());
        assert_eq!(lanes.x(0), 200.0);
        assert_eq!(lanes.x(2), 600.0);
        assert_eq!(lanes.x(7), 600.0);
    }
}
