use crate::algorithms::Strategy;
use crate::error::{ConfigError, Result};
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Grid width in tiles
    #[arg(long, default_value_t = 20)]
    pub width: i32,

    /// Grid height in tiles
    #[arg(long, default_value_t = 20)]
    pub height: i32,

    #[arg(long, default_value_t = 14)]
    pub num_obstacles: usize,

    /// bfs, dfs, a_star, or all to compare them on the same world
    #[arg(long, default_value = "a_star")]
    pub algorithm: String,

    /// Time between pursuer steps
    #[arg(long, default_value_t = 250)]
    pub step_interval_ms: u64,

    /// How many tiles ahead of the opponent the pursuer may aim
    #[arg(long, default_value_t = 0)]
    pub anticipation: i32,

    #[arg(long, default_value_t = 60)]
    pub ticks_per_second: u32,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 3600)]
    pub max_ticks: usize,

    /// Ticks between opponent moves
    #[arg(long, default_value_t = 12)]
    pub opponent_move_ticks: usize,

    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Seed for obstacle placement and opponent movement
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["pursuit"])
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.width < 1 || self.height < 1 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        // Leave room for at least the two actors.
        let tiles = self.width as usize * self.height as usize;
        if self.num_obstacles + 2 > tiles {
            return Err(ConfigError::TooManyObstacles {
                requested: self.num_obstacles,
                width: self.width,
                height: self.height,
            });
        }
        // Looking further ahead than the grid is wide only lands off the map.
        let max_anticipation = self.width.max(self.height);
        if !(0..=max_anticipation).contains(&self.anticipation) {
            return Err(ConfigError::AnticipationOutOfRange {
                value: self.anticipation,
                max: max_anticipation,
            });
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        self.strategies().map(|_| ())
    }

    /// Strategies selected by `--algorithm`.
    pub fn strategies(&self) -> Result<Vec<Strategy>> {
        if self.algorithm.eq_ignore_ascii_case("all") {
            Ok(Strategy::ALL.to_vec())
        } else {
            Ok(vec![self.algorithm.parse()?])
        }
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}
