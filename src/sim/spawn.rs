//! Spawn placement
//!
//! Lanes are picked by rejection sampling: draw a lane, throw it away if it
//! repeats the pool's previous lane or lands too close to something already
//! in the pool, and give up after a fixed number of draws. Giving up skips
//! the spawn for this cycle; entities never stack.

use glam::Vec2;

use super::pool::{Entity, EntityKind};
use super::state::{GameEvent, GameState};

/// Whether `lane` is a legal spawn lane for `kind` right now
fn lane_is_clear(state: &GameState, kind: EntityKind, lane: usize) -> bool {
    let pool = state.pools.get(kind);

    if kind.avoids_repeat_lane() && pool.previous_lane == Some(lane) {
        return false;
    }

    let spawn_point = Vec2::new(state.lanes.x(lane), 0.0);
    let separation = state.spawn_separation();
    pool.active().all(|e| {
        let pos = Vec2::new(state.lanes.x(e.lane), e.y);
        pos.distance(spawn_point) >= separation
    })
}

/// Draw lanes until one is clear or the attempt budget runs out
fn pick_lane(state: &mut GameState, kind: EntityKind) -> Option<usize> {
    for _ in 0..state.config.max_spawn_attempts {
        let lane = state.random_lane();
        if lane_is_clear(state, kind, lane) {
            return Some(lane);
        }
    }
    None
}

/// Try to put one new entity of `kind` at the top of the road.
///
/// Returns the new entity's id, or `None` if the game is paused, the pool is
/// full, the kind is disabled for this variant, or no lane passed the
/// placement rules.
pub fn try_spawn(state: &mut GameState, kind: EntityKind, events: &mut Vec<GameEvent>) -> Option<u32> {
    if state.is_paused() || !state.config.kind_enabled(kind) || state.pools.get(kind).is_full() {
        return None;
    }

    let Some(lane) = pick_lane(state, kind) else {
        log::debug!(
            "{:?} spawn skipped after {} attempts",
            kind,
            state.config.max_spawn_attempts
        );
        events.push(GameEvent::SpawnSkipped { kind });
        return None;
    };

    let id = state.next_entity_id();
    let tuning = state.config.kind(kind);
    let entity = Entity::new(id, kind, lane, 0.0, state.progression.speeds.get(kind), tuning.scale);
    if !state.pools.get_mut(kind).activate(entity) {
        return None;
    }
    events.push(GameEvent::Spawned { kind, id, lane });
    Some(id)
}

/// Place the opening batch of coins, staggered above the top edge so they
/// stream in one after another instead of arriving as a block.
pub fn seed_initial_coins(state: &mut GameState) {
    let count = state.config.initial_coins.min(state.config.coin.max_active);
    let spacing = state.spawn_separation();
    let speed = state.progression.speeds.coin;
    let scale = state.config.coin.scale;

    for i in 0..count {
        let previous = state.pools.coins.previous_lane;
        let mut lane = state.random_lane();
        for _ in 0..state.config.max_spawn_attempts {
            if Some(lane) != previous {
                break;
            }
            lane = state.random_lane();
        }

        let id = state.next_entity_id();
        let y = -(i as f32) * spacing;
        state
            .pools
            .coins
            .activate(Entity::new(id, EntityKind::Coin, lane, y, speed, scale));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::GameConfig;

    fn empty_state(config: GameConfig) -> GameState {
        let mut state = GameState::new(
            GameConfig {
                initial_coins: 0,
                ..config
            },
            4242,
        );
        state.pools.clear();
        state
    }

    #[test]
    fn test_spawn_places_entity_at_top() {
        let mut state = empty_state(GameConfig::default());
        let mut events = Vec::new();

        let id = try_spawn(&mut state, EntityKind::Coin, &mut events).unwrap();

        let coin = state.pools.coins.get(id).unwrap();
        assert_eq!(coin.y, 0.0);
        assert!(coin.active);
        assert_eq!(coin.velocity, state.progression.speeds.coin);
        assert_eq!(coin.scale, state.config.coin.scale);
        assert_eq!(state.pools.coins.previous_lane, Some(coin.lane));
        assert!(matches!(events[0], GameEvent::Spawned { kind: EntityKind::Coin, .. }));
    }

    #[test]
    fn test_spawn_never_repeats_previous_lane() {
        let mut state = empty_state(GameConfig::default());
        let mut events = Vec::new();

        let mut previous = None;
        for _ in 0..50 {
            // Clear the road so only the repeat rule matters
            state.pools.coins.entities.clear();
            if let Some(id) = try_spawn(&mut state, EntityKind::Coin, &mut events) {
                let lane = state.pools.coins.get(id).unwrap().lane;
                assert_ne!(Some(lane), previous);
                previous = Some(lane);
            }
        }
        assert!(previous.is_some());
    }

    #[test]
    fn test_missiles_may_repeat_lane() {
        let mut state = empty_state(GameConfig::default());
        let mut events = Vec::new();
        let mut repeated = false;
        let mut previous = None;
        for _ in 0..60 {
            state.pools.missiles.entities.clear();
            let id = try_spawn(&mut state, EntityKind::Missile, &mut events).unwrap();
            let lane = state.pools.missiles.get(id).unwrap().lane;
            repeated |= previous == Some(lane);
            previous = Some(lane);
        }
        assert!(repeated, "missile lanes are drawn without the repeat rule");
    }

    #[test]
    fn test_spawn_skipped_when_all_lanes_blocked() {
        let mut state = empty_state(GameConfig::default());
        for lane in 0..3 {
            let id = state.next_entity_id();
            state
                .pools
                .coins
                .activate(Entity::new(id, EntityKind::Coin, lane, 10.0, 100.0, 1.0));
        }
        let before = state.pools.coins.active_count();
        let mut events = Vec::new();

        assert_eq!(try_spawn(&mut state, EntityKind::Coin, &mut events), None);
        assert_eq!(state.pools.coins.active_count(), before);
        assert_eq!(events, vec![GameEvent::SpawnSkipped { kind: EntityKind::Coin }]);
    }

    #[test]
    fn test_spawn_avoids_crowded_lane() {
        let mut state = empty_state(GameConfig::default());
        // Lanes 0 and 1 are blocked near the top; lane 2 is the only choice
        for lane in 0..2 {
            let id = state.next_entity_id();
            state
                .pools
                .obstacles
                .activate(Entity::new(id, EntityKind::Obstacle, lane, 50.0, 100.0, 1.0));
        }
        state.pools.obstacles.previous_lane = None;
        let mut events = Vec::new();

        for _ in 0..20 {
            if let Some(id) = try_spawn(&mut state, EntityKind::Obstacle, &mut events) {
                assert_eq!(state.pools.obstacles.get(id).unwrap().lane, 2);
                return;
            }
        }
        panic!("lane 2 should have been found");
    }

    #[test]
    fn test_far_entities_do_not_block() {
        let mut state = empty_state(GameConfig::default());
        for lane in 0..3 {
            let id = state.next_entity_id();
            state
                .pools
                .coins
                .activate(Entity::new(id, EntityKind::Coin, lane, 300.0, 100.0, 1.0));
        }
        state.pools.coins.previous_lane = None;
        let mut events = Vec::new();
        assert!(try_spawn(&mut state, EntityKind::Coin, &mut events).is_some());
    }

    #[test]
    fn test_spawn_respects_pool_cap() {
        let mut state = empty_state(GameConfig::default());
        let mut events = Vec::new();
        for _ in 0..100 {
            try_spawn(&mut state, EntityKind::Obstacle, &mut events);
            // Push everything down so separation never blocks
            for e in state.pools.obstacles.entities.iter_mut() {
                e.y += 200.0;
            }
        }
        assert_eq!(state.pools.obstacles.active_count(), state.config.obstacle.max_active);
    }

    #[test]
    fn test_spawn_blocked_while_paused() {
        let mut state = empty_state(GameConfig::default());
        state.toggle_pause();
        let mut events = Vec::new();
        assert_eq!(try_spawn(&mut state, EntityKind::Coin, &mut events), None);
        assert!(events.is_empty());
        assert_eq!(state.pools.coins.active_count(), 0);
    }

    #[test]
    fn test_disabled_kind_never_spawns() {
        let mut state = empty_state(crate::Preset::CoinRush.config());
        let mut events = Vec::new();
        assert_eq!(try_spawn(&mut state, EntityKind::Missile, &mut events), None);
        assert_eq!(try_spawn(&mut state, EntityKind::Obstacle, &mut events), None);
    }

    #[test]
    fn test_initial_coins_are_staggered() {
        let state = GameState::new(GameConfig::default(), 99);
        let mut ys: Vec<f32> = state.pools.coins.active().map(|c| c.y).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(ys.len(), 4);
        for pair in ys.windows(2) {
            assert!((pair[1] - pair[0] - 100.0).abs() < 1e-3);
        }
    }
}
