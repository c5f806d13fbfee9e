//! Lane Dash entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this runs a headless session with a simple autopilot and logs
//! how it went.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser)]
#[command(name = "lane-dash")]
#[command(about = "Drive a headless Lane Dash session with an autopilot")]
struct Args {
    /// Preset name (CoinRush, Traffic, Gauntlet) or path to a JSON tuning file
    config: Option<String>,

    /// Seconds of simulated play
    #[arg(default_value_t = 120.0, value_parser = parse_seconds)]
    seconds: f32,

    /// RNG seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_seconds(arg: &str) -> Result<f32, String> {
    let seconds: f32 = arg.parse().map_err(|e| format!("{e}"))?;
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err("must be a finite number of seconds >= 0".to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Lane Dash (native) starting...");

    let config = match args.config.as_deref() {
        Some(arg) => match load_config(arg) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {}", err);
                std::process::exit(2);
            }
        },
        None => lane_dash::GameConfig::default(),
    };
    let seconds = args.seconds;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}", seed);

    let summary = headless::run(config, seed, seconds);
    println!(
        "\n{:.0}s driven: score {}, {} miles, level {}, {} coins, {} obstacle hits, {} missile hits",
        seconds,
        summary.score,
        summary.miles,
        summary.level,
        summary.coins,
        summary.obstacle_hits,
        summary.missile_hits
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}

/// Preset name or path to a JSON tuning file
#[cfg(not(target_arch = "wasm32"))]
fn load_config(arg: &str) -> lane_dash::Result<lane_dash::GameConfig> {
    if let Some(preset) = lane_dash::Preset::from_str(arg) {
        log::info!("Using preset {}", preset.as_str());
        return Ok(preset.config());
    }
    let json = std::fs::read_to_string(arg)
        .map_err(|e| lane_dash::Error::Config(format!("cannot read {}: {}", arg, e)))?;
    let config = lane_dash::GameConfig::from_json(&json)?;
    log::info!("Loaded tuning from {}", arg);
    Ok(config)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use lane_dash::consts::SIM_DT;
    use lane_dash::sim::{EntityKind, GameEvent, GameState, TickInput, tick};
    use lane_dash::GameConfig;

    #[derive(Debug, Default)]
    pub struct Summary {
        pub score: u64,
        pub miles: u32,
        pub level: u32,
        pub coins: u32,
        pub obstacle_hits: u32,
        pub missile_hits: u32,
    }

    /// Lane the autopilot wants: the one whose nearest hazard above the car
    /// is furthest away, preferring lanes with a coin coming.
    fn pick_lane(state: &GameState) -> usize {
        let car_y = state.player.y;
        let lane_score = |lane: usize| {
            let hazard_gap = [EntityKind::Obstacle, EntityKind::Missile]
                .iter()
                .flat_map(|&kind| state.pools.get(kind).active())
                .filter(|e| e.lane == lane && e.y <= car_y)
                .map(|e| car_y - e.y)
                .fold(f32::MAX, f32::min);
            let coin_bonus = if state
                .pools
                .coins
                .active()
                .any(|e| e.lane == lane && e.y <= car_y)
            {
                50.0
            } else {
                0.0
            };
            hazard_gap.min(car_y) + coin_bonus
        };
        (0..3)
            .max_by(|&a, &b| {
                lane_score(a)
                    .partial_cmp(&lane_score(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(state.player.lane)
    }

    pub fn run(config: GameConfig, seed: u64, seconds: f32) -> Summary {
        let mut state = GameState::new(config, seed);
        let mut summary = Summary::default();
        let ticks = (seconds / SIM_DT) as u64;

        for _ in 0..ticks {
            let target = pick_lane(&state);
            let input = TickInput {
                tap_x: (target != state.player.lane).then(|| state.lanes.x(target)),
                ..Default::default()
            };
            for event in tick(&mut state, &input, SIM_DT) {
                match event {
                    GameEvent::Collided { kind: EntityKind::Coin, .. } => summary.coins += 1,
                    GameEvent::Collided { kind: EntityKind::Obstacle, .. } => {
                        summary.obstacle_hits += 1
                    }
                    GameEvent::Collided { kind: EntityKind::Missile, .. } => {
                        summary.missile_hits += 1
                    }
                    _ => {}
                }
            }
        }

        summary.score = state.score();
        summary.miles = state.miles();
        summary.level = state.level();
        summary
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["lane-dash"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(args.seconds, 120.0);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_args_preset_seconds_and_seed() {
        let args = Args::try_parse_from(["lane-dash", "CoinRush", "30", "--seed", "7"]).unwrap();
        assert_eq!(args.config.as_deref(), Some("CoinRush"));
        assert_eq!(args.seconds, 30.0);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn test_args_reject_bad_seconds() {
        assert!(Args::try_parse_from(["lane-dash", "Gauntlet", "2m"]).is_err());
        assert!(Args::try_parse_from(["lane-dash", "Gauntlet", "-5"]).is_err());
        assert!(Args::try_parse_from(["lane-dash", "Gauntlet", "inf"]).is_err());
    }

    #[test]
    fn test_help_is_not_a_config_path() {
        let err = Args::try_parse_from(["lane-dash", "--help"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_load_config_by_preset_name() {
        let config = load_config("CoinRush").unwrap();
        assert_eq!(config, lane_dash::Preset::CoinRush.config());
        assert!(load_config("no-such-file.json").is_err());
    }
}
