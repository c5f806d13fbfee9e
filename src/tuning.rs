//! Data-driven game balance
//!
//! Every number the simulation uses lives in [`GameConfig`]. The named
//! [`Preset`]s reproduce the tuning families the game shipped with: coins
//! only, coins with traffic, and the full gauntlet with missiles.

use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::error::{Error, Result};
use crate::sim::EntityKind;

/// Per-kind pool tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindTuning {
    /// Maximum simultaneously active entities
    pub max_active: usize,
    /// Starting speed (pixels/second)
    pub initial_speed: f32,
    /// Speed added every unpaused tick
    pub creep_per_tick: f32,
    /// Speed added on each level up
    pub level_boost: f32,
    /// Visual scale (also scales the collision box)
    pub scale: f32,
    /// Seconds between spawn attempts
    pub spawn_interval: f32,
}

impl KindTuning {
    fn validate(&self, name: &str) -> Result<()> {
        if !self.initial_speed.is_finite() || self.initial_speed < 0.0 {
            return Err(Error::Config(format!("{name}: initial_speed must be >= 0")));
        }
        // Speeds may only grow during a session
        if !self.creep_per_tick.is_finite() || self.creep_per_tick < 0.0 {
            return Err(Error::Config(format!("{name}: creep_per_tick must be >= 0")));
        }
        if !self.level_boost.is_finite() || self.level_boost < 0.0 {
            return Err(Error::Config(format!("{name}: level_boost must be >= 0")));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::Config(format!("{name}: scale must be > 0")));
        }
        if !self.spawn_interval.is_finite() || self.spawn_interval <= 0.0 {
            return Err(Error::Config(format!("{name}: spawn_interval must be > 0")));
        }
        Ok(())
    }
}

/// Complete tuning for one game variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,

    pub coin: KindTuning,
    pub obstacle: KindTuning,
    pub missile: KindTuning,

    /// Coins placed on the road when a session starts
    pub initial_coins: usize,

    /// Cumulative miles needed for level 2, 3, ... (strictly ascending)
    pub level_thresholds: Vec<u32>,
    /// Seconds of unpaused play per mile
    pub mile_interval: f32,

    /// Lane draws per spawn before the cycle is skipped
    pub max_spawn_attempts: u32,
    /// Minimum spawn distance to a same-pool entity, as a fraction of viewport height
    pub spawn_separation_ratio: f32,

    pub coin_reward: u64,
    pub obstacle_penalty: u64,
    pub missile_penalty: u64,

    /// Player row as a fraction of viewport height
    pub player_row_ratio: f32,

    pub has_obstacles: bool,
    pub has_missiles: bool,
    pub has_restart: bool,
    /// Try one extra coin spawn whenever a coin is collected
    pub extra_spawn_on_collect: bool,
    /// Speed every pool restarts at, if different from the initial speeds
    pub restart_speed: Option<f32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            coin: KindTuning {
                max_active: 6,
                initial_speed: 100.0,
                creep_per_tick: 0.01,
                level_boost: 20.0,
                scale: 1.0,
                spawn_interval: 1.0,
            },
            obstacle: KindTuning {
                max_active: 3,
                initial_speed: 100.0,
                creep_per_tick: 0.01,
                level_boost: 20.0,
                scale: 1.2,
                spawn_interval: 5.0,
            },
            missile: KindTuning {
                max_active: 1,
                initial_speed: 200.0,
                creep_per_tick: 0.02,
                level_boost: 40.0,
                scale: 0.6,
                spawn_interval: 15.0,
            },
            initial_coins: 4,
            level_thresholds: vec![20, 50, 100, 200],
            mile_interval: 3.0,
            max_spawn_attempts: 10,
            // 100px on a 600px tall viewport
            spawn_separation_ratio: 1.0 / 6.0,
            coin_reward: 10,
            obstacle_penalty: 30,
            missile_penalty: 60,
            player_row_ratio: 5.0 / 6.0,
            has_obstacles: true,
            has_missiles: true,
            has_restart: true,
            extra_spawn_on_collect: true,
            restart_speed: None,
        }
    }
}

impl GameConfig {
    /// Tuning for one entity kind
    pub fn kind(&self, kind: EntityKind) -> &KindTuning {
        match kind {
            EntityKind::Coin => &self.coin,
            EntityKind::Obstacle => &self.obstacle,
            EntityKind::Missile => &self.missile,
        }
    }

    /// Whether this variant spawns the given kind at all
    pub fn kind_enabled(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Coin => true,
            EntityKind::Obstacle => self.has_obstacles,
            EntityKind::Missile => self.has_missiles,
        }
    }

    /// Highest reachable level
    pub fn max_level(&self) -> u32 {
        self.level_thresholds.len() as u32 + 1
    }

    /// Parse and validate a JSON tuning file. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        crate::sim::Viewport::new(self.viewport_width, self.viewport_height)?;

        self.coin.validate("coin")?;
        self.obstacle.validate("obstacle")?;
        self.missile.validate("missile")?;

        if self.level_thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err("level_thresholds must be strictly ascending".into());
        }
        if self.level_thresholds.first() == Some(&0) {
            return Err("level_thresholds must start above 0".into());
        }
        if !self.mile_interval.is_finite() || self.mile_interval <= 0.0 {
            return Err("mile_interval must be > 0".into());
        }
        if self.max_spawn_attempts == 0 {
            return Err("max_spawn_attempts must be at least 1".into());
        }
        if !self.spawn_separation_ratio.is_finite() || self.spawn_separation_ratio < 0.0 {
            return Err("spawn_separation_ratio must be >= 0".into());
        }
        if !(self.player_row_ratio > 0.0 && self.player_row_ratio <= 1.0) {
            return Err("player_row_ratio must be in (0, 1]".into());
        }
        if self
            .restart_speed
            .is_some_and(|speed| !speed.is_finite() || speed < 0.0)
        {
            return Err("restart_speed must be >= 0".into());
        }
        Ok(())
    }
}

/// Named tuning families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Coins only, faster road, restart drops to a slower speed
    CoinRush,
    /// Coins and obstacles
    Traffic,
    /// Coins, obstacles and missiles
    #[default]
    Gauntlet,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::CoinRush => "CoinRush",
            Preset::Traffic => "Traffic",
            Preset::Gauntlet => "Gauntlet",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "coinrush" | "coins" => Some(Preset::CoinRush),
            "traffic" => Some(Preset::Traffic),
            "gauntlet" | "full" => Some(Preset::Gauntlet),
            _ => None,
        }
    }

    pub fn config(&self) -> GameConfig {
        let base = GameConfig::default();
        match self {
            Preset::CoinRush => GameConfig {
                coin: KindTuning {
                    initial_speed: 150.0,
                    ..base.coin
                },
                has_obstacles: false,
                has_missiles: false,
                restart_speed: Some(100.0),
                ..base
            },
            Preset::Traffic => GameConfig {
                obstacle: KindTuning {
                    max_active: 4,
                    spawn_interval: 4.0,
                    ..base.obstacle
                },
                has_missiles: false,
                extra_spawn_on_collect: false,
                ..base
            },
            Preset::Gauntlet => base,
        }
    }
}
