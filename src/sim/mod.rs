//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lanes;
pub mod pool;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, apply_score, find_overlaps, on_collision, resolve_collisions};
pub use lanes::{LaneSet, Viewport, lane_positions};
pub use pool::{Entity, EntityKind, Pool};
pub use progression::{advance_miles, creep_speeds, level_for_miles};
pub use spawn::try_spawn;
pub use state::{
    EntitySnapshot, GameEvent, GamePhase, GameState, Player, Pools, Progression, SpawnTimers,
    Speeds, Timer,
};
pub use tick::{TickInput, tick};
