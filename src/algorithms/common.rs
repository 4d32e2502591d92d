use crate::grid::{Grid, Position};
use rustc_hash::FxHashSet;

/// Outcome of a single search call.
///
/// `path` runs from start to target inclusive. `None` means the target could
/// not be reached, which is different from an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub path: Option<Vec<Position>>,
    /// Cells visited during this call, in discovery order.
    pub explored: Vec<Position>,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of moves along the path, if one was found.
    pub fn steps(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

pub trait SearchAlgorithm {
    fn search(&self, grid: &Grid, start: Position, target: Position) -> SearchResult;

    /// Short label for on-screen display.
    fn label(&self) -> &'static str;
}

/// Heuristic used by best-first search.
pub fn manhattan(from: &Position, to: &Position) -> u32 {
    from.distance(to)
}

/// Tracks visited cells while keeping the order they were discovered in.
#[derive(Debug, Default)]
pub(crate) struct Visited {
    seen: FxHashSet<Position>,
    order: Vec<Position>,
}

impl Visited {
    /// Returns false if `pos` was already marked.
    pub(crate) fn mark(&mut self, pos: Position) -> bool {
        if self.seen.insert(pos) {
            self.order.push(pos);
            true
        } else {
            false
        }
    }

    pub(crate) fn contains(&self, pos: &Position) -> bool {
        self.seen.contains(pos)
    }

    pub(crate) fn into_order(self) -> Vec<Position> {
        self.order
    }
}
