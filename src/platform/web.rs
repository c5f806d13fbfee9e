//! Browser bindings
//!
//! The page owns the canvas, the buttons and `requestAnimationFrame`; it
//! forwards frame times, taps, button presses and resizes here and reads the
//! HUD values and entity positions back.

use wasm_bindgen::prelude::*;

use super::{EventBuffer, FrameClock};
use crate::consts::SIM_DT;
use crate::sim::{GameState, TickInput, tick};
use crate::tuning::{GameConfig, Preset};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Lane Dash (web) starting...");
}

/// One play session driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
    events: EventBuffer,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a session from a preset name ("CoinRush", "Traffic", "Gauntlet")
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str, width: f32, height: f32) -> WebGame {
        let preset = Preset::from_str(preset).unwrap_or_else(|| {
            log::warn!("Unknown preset '{}', using {}", preset, Preset::default().as_str());
            Preset::default()
        });
        Self::with_config(preset.config(), width, height)
    }

    /// Start a session from a JSON tuning file
    pub fn from_json(json: &str, width: f32, height: f32) -> Result<WebGame, JsValue> {
        let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_config(config, width, height))
    }

    /// Advance by one animation frame (seconds)
    pub fn frame(&mut self, dt: f32) {
        let steps = self.clock.advance(dt);
        for _ in 0..steps {
            let input = std::mem::take(&mut self.input);
            self.events.extend(tick(&mut self.state, &input, SIM_DT));
        }
    }

    pub fn tap(&mut self, x: f32) {
        self.input.tap_x = Some(x);
    }

    pub fn toggle_pause(&mut self) {
        self.input.pause = !self.input.pause;
    }

    pub fn restart(&mut self) {
        self.input.restart = true;
        self.clock.reset();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        // Applied immediately so the next draw already uses the new lanes
        match self.state.resize(width, height) {
            Ok(event) => self.events.push(event),
            Err(err) => log::warn!("Ignoring resize: {}", err),
        }
    }

    pub fn score(&self) -> f64 {
        self.state.score() as f64
    }

    pub fn miles(&self) -> u32 {
        self.state.miles()
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn player_x(&self) -> f32 {
        self.state.player_x()
    }

    pub fn player_y(&self) -> f32 {
        self.state.player.y
    }

    /// Active entities as JSON for the renderer
    pub fn entities_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Events since the last call, as JSON (only the most recent are kept)
    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.events.drain()).unwrap_or_else(|_| "[]".to_string())
    }
}

impl WebGame {
    fn with_config(config: GameConfig, width: f32, height: f32) -> WebGame {
        let seed: u64 = rand::random();
        let mut state = GameState::new(config, seed);
        if let Err(err) = state.resize(width, height) {
            log::warn!("Keeping default viewport: {}", err);
        }
        WebGame {
            state,
            clock: FrameClock::new(),
            input: TickInput::default(),
            events: EventBuffer::new(),
        }
    }
}
