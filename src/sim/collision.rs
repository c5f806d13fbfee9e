//! Collision detection and scoring
//!
//! The car and every entity are axis-aligned boxes centered on their lane.
//! Overlaps are resolved into score changes: coins pay out, obstacles and
//! missiles cost points, and the score never drops below zero.

use glam::Vec2;

use super::pool::EntityKind;
use super::spawn::try_spawn;
use super::state::{GameEvent, GameState};
use crate::consts::{ENTITY_SIZE, PLAYER_HEIGHT, PLAYER_WIDTH};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Touching edges do not count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Box around the player's car
pub fn player_box(state: &GameState) -> Aabb {
    Aabb::from_center_size(state.player_pos(), Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
}

/// Active entities currently touching the car, in kind then id order
pub fn find_overlaps(state: &GameState) -> Vec<(EntityKind, u32)> {
    let player = player_box(state);
    let mut hits = Vec::new();
    for kind in EntityKind::ALL {
        for e in state.pools.get(kind).active() {
            let center = Vec2::new(state.lanes.x(e.lane), e.y);
            let size = Vec2::splat(ENTITY_SIZE * e.scale);
            if player.overlaps(&Aabb::from_center_size(center, size)) {
                hits.push((kind, e.id));
            }
        }
    }
    hits
}

/// Resolve the car touching entity `id` of `kind`.
///
/// Unknown or already inactive entities are ignored, as are collisions while
/// paused. Returns the score change that was requested (before the floor at
/// zero is applied).
pub fn on_collision(
    state: &mut GameState,
    kind: EntityKind,
    id: u32,
    events: &mut Vec<GameEvent>,
) -> Option<i64> {
    if state.is_paused() {
        return None;
    }
    state.pools.get_mut(kind).deactivate(id)?;

    let delta = match kind {
        EntityKind::Coin => state.config.coin_reward as i64,
        EntityKind::Obstacle => -(state.config.obstacle_penalty as i64),
        EntityKind::Missile => -(state.config.missile_penalty as i64),
    };
    apply_score(&mut state.progression.score, delta);
    events.push(GameEvent::Collided {
        kind,
        id,
        delta,
        score: state.progression.score,
    });

    if kind == EntityKind::Coin && state.config.extra_spawn_on_collect {
        try_spawn(state, EntityKind::Coin, events);
    }
    Some(delta)
}

/// Add `delta` to `score`, flooring at zero
pub fn apply_score(score: &mut u64, delta: i64) {
    *score = if delta >= 0 {
        score.saturating_add(delta as u64)
    } else {
        score.saturating_sub(delta.unsigned_abs())
    };
}

/// Detect and resolve every overlap for this tick
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for (kind, id) in find_overlaps(state) {
        on_collision(state, kind, id, events);
    }
}
