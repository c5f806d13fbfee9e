//! Platform abstraction layer
//!
//! The simulation only knows fixed ticks. [`FrameClock`] turns variable
//! browser/native frame times into a whole number of ticks; `web` exposes a
//! session to JavaScript.

use std::collections::VecDeque;

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::GameEvent;

/// Events kept for a page that never drains them (about a minute of play)
pub const MAX_BUFFERED_EVENTS: usize = 4096;

/// Fixed timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's duration and return how many ticks to run.
    ///
    /// Long frames are clamped and the tick count is capped at
    /// `MAX_SUBSTEPS`, dropping the remainder instead of spiralling.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Drop any partial tick (after pause/resume or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Events waiting for the presentation layer. Oldest are dropped past the cap.
#[derive(Debug, Clone, Default)]
pub struct EventBuffer {
    events: VecDeque<GameEvent>,
    dropped: usize,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.events.len() == MAX_BUFFERED_EVENTS {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every buffered event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        if self.dropped > 0 {
            log::debug!("Dropped {} undrained events", self.dropped);
            self.dropped = 0;
        }
        self.events.drain(..).collect()
    }
}

impl Extend<GameEvent> for EventBuffer {
    fn extend<I: IntoIterator<Item = GameEvent>>(&mut self, iter: I) {
        for event in iter {
            self.push(event);
        }
    }
}
