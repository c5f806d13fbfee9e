//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::resolve_collisions;
use super::pool::EntityKind;
use super::progression::{advance_miles, creep_speeds};
use super::spawn::try_spawn;
use super::state::{GameEvent, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal position of a tap/click
    pub tap_x: Option<f32>,
    /// Pause toggle
    pub pause: bool,
    /// Restart button
    pub restart: bool,
    /// New viewport size (width, height)
    pub resize: Option<(f32, f32)>,
}

/// Advance the game state by one fixed timestep.
///
/// Returns everything that happened during the tick, in order.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        events.extend(state.restart());
    }

    // Layout changes apply even while paused
    if let Some((width, height)) = input.resize {
        match state.resize(width, height) {
            Ok(event) => events.push(event),
            Err(err) => log::warn!("Ignoring resize: {}", err),
        }
    }

    if input.pause {
        events.push(state.toggle_pause());
    }

    if state.is_paused() {
        return events;
    }

    state.time_ticks += 1;

    if let Some(x) = input.tap_x {
        events.extend(state.handle_tap(x));
    }

    creep_speeds(&mut state.progression, &state.config);

    // Move and recycle
    let bottom = state.viewport.height;
    for kind in EntityKind::ALL {
        let speed = state.progression.speeds.get(kind);
        state
            .pools
            .get_mut(kind)
            .advance(dt, speed, bottom, &mut state.rng, &mut events);
    }

    resolve_collisions(state, &mut events);

    // Periodic spawns
    for kind in EntityKind::ALL {
        let fired = state.timers.spawn_timer_mut(kind).advance(dt);
        for _ in 0..fired {
            try_spawn(state, kind, &mut events);
        }
    }

    let miles = state.timers.mile.advance(dt);
    for _ in 0..miles {
        advance_miles(&mut state.progression, &state.config, &mut events);
    }

    // Ensure deterministic ordering
    state.normalize_order();
    events
}
