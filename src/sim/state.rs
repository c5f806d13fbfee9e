//! Game state and core simulation types
//!
//! One session is one owned [`GameState`]. Every command the presentation
//! layer can issue (tap, pause, restart, resize) is a method here; the
//! per-tick update lives in `tick.rs`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lanes::{LaneSet, Viewport};
use super::pool::{EntityKind, Pool};
use crate::consts::{LANE_COUNT, START_LANE};
use crate::error::Result;
use crate::tuning::GameConfig;

/// Current phase of gameplay. There is no game over: the road never ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
}

/// Something the simulation did that the presentation layer may react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { kind: EntityKind, id: u32, lane: usize },
    /// Every lane draw was rejected this cycle
    SpawnSkipped { kind: EntityKind },
    Recycled { kind: EntityKind, id: u32, lane: usize },
    /// A missile left the road
    Despawned { kind: EntityKind, id: u32 },
    /// Player touched an entity; `delta` is the requested change before clamping
    Collided { kind: EntityKind, id: u32, delta: i64, score: u64 },
    MileAdvanced { miles: u32 },
    LevelUp { level: u32 },
    LaneChanged { lane: usize },
    Paused,
    Resumed,
    Restarted,
    Resized { width: f32, height: f32 },
}

/// The player's car
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub lane: usize,
    /// Row the car drives on (pixels from the top)
    pub y: f32,
}

/// Per-kind downward speeds (pixels/second)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speeds {
    pub coin: f32,
    pub obstacle: f32,
    pub missile: f32,
}

impl Speeds {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            coin: config.coin.initial_speed,
            obstacle: config.obstacle.initial_speed,
            missile: config.missile.initial_speed,
        }
    }

    /// Same speed for every kind
    pub fn uniform(speed: f32) -> Self {
        Self {
            coin: speed,
            obstacle: speed,
            missile: speed,
        }
    }

    pub fn get(&self, kind: EntityKind) -> f32 {
        match kind {
            EntityKind::Coin => self.coin,
            EntityKind::Obstacle => self.obstacle,
            EntityKind::Missile => self.missile,
        }
    }

    pub fn get_mut(&mut self, kind: EntityKind) -> &mut f32 {
        match kind {
            EntityKind::Coin => &mut self.coin,
            EntityKind::Obstacle => &mut self.obstacle,
            EntityKind::Missile => &mut self.missile,
        }
    }
}

/// Score, distance and difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Never negative; penalties clamp at zero
    pub score: u64,
    pub miles: u32,
    /// Starts at 1
    pub level: u32,
    pub speeds: Speeds,
}

impl Progression {
    pub fn new(speeds: Speeds) -> Self {
        Self {
            score: 0,
            miles: 0,
            level: 1,
            speeds,
        }
    }
}

/// Repeating countdown driven by simulation time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    pub interval: f32,
    pub elapsed: f32,
}

impl Timer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` and return how many times the timer fired.
    ///
    /// A timer without a positive finite interval never fires.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// The periodic callbacks of a session: one spawn timer per pool plus the mile counter
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub coin: Timer,
    pub obstacle: Timer,
    pub missile: Timer,
    pub mile: Timer,
}

impl SpawnTimers {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            coin: Timer::new(config.coin.spawn_interval),
            obstacle: Timer::new(config.obstacle.spawn_interval),
            missile: Timer::new(config.missile.spawn_interval),
            mile: Timer::new(config.mile_interval),
        }
    }

    pub fn spawn_timer_mut(&mut self, kind: EntityKind) -> &mut Timer {
        match kind {
            EntityKind::Coin => &mut self.coin,
            EntityKind::Obstacle => &mut self.obstacle,
            EntityKind::Missile => &mut self.missile,
        }
    }
}

/// The three entity pools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pools {
    pub coins: Pool,
    pub obstacles: Pool,
    pub missiles: Pool,
}

impl Pools {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            coins: Pool::new(EntityKind::Coin, config.coin.max_active),
            obstacles: Pool::new(EntityKind::Obstacle, config.obstacle.max_active),
            missiles: Pool::new(EntityKind::Missile, config.missile.max_active),
        }
    }

    pub fn get(&self, kind: EntityKind) -> &Pool {
        match kind {
            EntityKind::Coin => &self.coins,
            EntityKind::Obstacle => &self.obstacles,
            EntityKind::Missile => &self.missiles,
        }
    }

    pub fn get_mut(&mut self, kind: EntityKind) -> &mut Pool {
        match kind {
            EntityKind::Coin => &mut self.coins,
            EntityKind::Obstacle => &mut self.obstacles,
            EntityKind::Missile => &mut self.missiles,
        }
    }

    pub fn clear(&mut self) {
        for kind in EntityKind::ALL {
            self.get_mut(kind).clear();
        }
    }
}

/// Renderable view of one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub scale: f32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    pub config: GameConfig,
    pub viewport: Viewport,
    pub lanes: LaneSet,
    pub phase: GamePhase,
    pub player: Player,
    pub progression: Progression,
    pub pools: Pools,
    pub timers: SpawnTimers,
    /// Unpaused ticks since the session (re)started
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Start a session. Check the configuration with [`GameConfig::validate`]
    /// first: an invalid viewport falls back to the default size and a
    /// non-positive interval disables its timer.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        // A config that fails validation still gets a usable road
        let viewport = Viewport::new(config.viewport_width, config.viewport_height).unwrap_or(
            Viewport {
                width: crate::consts::VIEWPORT_WIDTH,
                height: crate::consts::VIEWPORT_HEIGHT,
            },
        );
        let speeds = Speeds::from_config(&config);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            lanes: LaneSet::for_viewport(&viewport),
            phase: GamePhase::Playing,
            player: Player {
                lane: START_LANE,
                y: viewport.height * config.player_row_ratio,
            },
            progression: Progression::new(speeds),
            pools: Pools::from_config(&config),
            timers: SpawnTimers::from_config(&config),
            time_ticks: 0,
            next_id: 1,
            config,
        };

        super::spawn::seed_initial_coins(&mut state);
        log::info!("Session started (seed {})", seed);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn score(&self) -> u64 {
        self.progression.score
    }

    pub fn miles(&self) -> u32 {
        self.progression.miles
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn player_x(&self) -> f32 {
        self.lanes.x(self.player.lane)
    }

    pub fn player_pos(&self) -> Vec2 {
        Vec2::new(self.player_x(), self.player.y)
    }

    /// Minimum spawn distance between same-pool entities at the current viewport
    pub fn spawn_separation(&self) -> f32 {
        self.config.spawn_separation_ratio * self.viewport.height
    }

    pub fn toggle_pause(&mut self) -> GameEvent {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                GameEvent::Paused
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                GameEvent::Resumed
            }
        }
    }

    /// Move one lane toward a tap. Ignored while paused or at the edge of the road.
    pub fn handle_tap(&mut self, x: f32) -> Option<GameEvent> {
        if self.is_paused() {
            log::debug!("Tap ignored while paused");
            return None;
        }
        let player_x = self.player_x();
        let delta = if x < player_x {
            -1
        } else if x > player_x {
            1
        } else {
            return None;
        };
        let lane = crate::step_lane(self.player.lane, delta)?;
        self.player.lane = lane;
        Some(GameEvent::LaneChanged { lane })
    }

    /// Reset score, distance, speeds, timers and pools. Viewport and config are kept.
    ///
    /// Returns `None` when this variant has no restart.
    pub fn restart(&mut self) -> Option<GameEvent> {
        if !self.config.has_restart {
            log::debug!("Restart ignored: disabled for this variant");
            return None;
        }

        let speeds = match self.config.restart_speed {
            Some(speed) => Speeds::uniform(speed),
            None => Speeds::from_config(&self.config),
        };
        self.phase = GamePhase::Playing;
        self.player = Player {
            lane: START_LANE,
            y: self.viewport.height * self.config.player_row_ratio,
        };
        self.progression = Progression::new(speeds);
        self.pools.clear();
        self.timers = SpawnTimers::from_config(&self.config);
        self.time_ticks = 0;

        super::spawn::seed_initial_coins(self);
        log::info!("Session restarted");
        Some(GameEvent::Restarted)
    }

    /// Rebuild lanes for a new viewport. Invalid dimensions keep the old layout.
    ///
    /// The player and every entity keep their lane index; only the derived x
    /// positions change.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<GameEvent> {
        let viewport = Viewport::new(width, height)?;
        self.viewport = viewport;
        self.lanes = LaneSet::for_viewport(&viewport);
        self.player.y = viewport.height * self.config.player_row_ratio;
        log::debug!("Resized to {}x{}, lanes {:?}", width, height, self.lanes.positions());
        Ok(GameEvent::Resized { width, height })
    }

    /// Positions of every active entity for rendering
    pub fn snapshot(&self) -> Vec<EntitySnapshot> {
        EntityKind::ALL
            .iter()
            .flat_map(|&kind| self.pools.get(kind).active())
            .map(|e| EntitySnapshot {
                id: e.id,
                kind: e.kind,
                pos: Vec2::new(self.lanes.x(e.lane), e.y),
                scale: e.scale,
            })
            .collect()
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        for kind in EntityKind::ALL {
            self.pools.get_mut(kind).normalize_order();
        }
    }

    /// Lane index for a random draw
    pub(crate) fn random_lane(&mut self) -> usize {
        use rand::Rng;
        self.rng.random_range(0..LANE_COUNT)
    }
}
