//! Errors raised while turning command-line options into a world.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("{requested} obstacles cannot fit on a {width}x{height} grid")]
    TooManyObstacles {
        requested: usize,
        width: i32,
        height: i32,
    },

    #[error("anticipation {value} is outside 0..={max}")]
    AnticipationOutOfRange { value: i32, max: i32 },

    #[error("tick rate must be positive")]
    ZeroTickRate,

    #[error("unknown search strategy '{0}' (expected bfs, dfs or a_star)")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
