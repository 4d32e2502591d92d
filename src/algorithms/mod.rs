pub mod best_first;
pub mod bfs;
pub mod common;
pub mod dfs;

use crate::grid::{Grid, Position};
use best_first::BestFirstSearch;
use bfs::BreadthFirstSearch;
use common::{SearchAlgorithm, SearchResult};
use dfs::DepthFirstSearch;
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;

/// The search strategy a pursuer plans with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    #[default]
    BestFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::BestFirst,
    ];

    pub fn search(self, grid: &Grid, start: Position, target: Position) -> SearchResult {
        self.algorithm().search(grid, start, target)
    }

    pub fn label(self) -> &'static str {
        self.algorithm().label()
    }

    fn algorithm(self) -> &'static dyn SearchAlgorithm {
        match self {
            Strategy::BreadthFirst => &BreadthFirstSearch,
            Strategy::DepthFirst => &DepthFirstSearch,
            Strategy::BestFirst => &BestFirstSearch,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth_first" | "breadth-first" => Ok(Strategy::BreadthFirst),
            "dfs" | "depth_first" | "depth-first" => Ok(Strategy::DepthFirst),
            "a_star" | "a-star" | "astar" | "best_first" | "best-first" => Ok(Strategy::BestFirst),
            _ => Err(crate::error::ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Walk parent links back from `target` and return the path start-first.
pub(crate) fn reconstruct_path(
    parents: &FxHashMap<Position, Position>,
    start: Position,
    target: Position,
) -> Vec<Position> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
