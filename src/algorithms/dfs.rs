use crate::algorithms::common::{SearchAlgorithm, SearchResult, Visited};
use crate::grid::{Grid, Position};

/// Depth-first search driven by an explicit stack.
///
/// Neighbors are tried in the grid's fixed adjacency order, and the first
/// branch that reaches the target wins. The result is a valid path but
/// usually not a short one.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirstSearch;

struct Frame {
    pos: Position,
    neighbors: Vec<Position>,
    next: usize,
}

impl Frame {
    fn enter(pos: Position, grid: &Grid) -> Self {
        Frame {
            pos,
            neighbors: grid.adjacent(&pos),
            next: 0,
        }
    }
}

impl SearchAlgorithm for DepthFirstSearch {
    fn search(&self, grid: &Grid, start: Position, target: Position) -> SearchResult {
        let mut visited = Visited::default();

        // The target itself is never marked visited.
        if start == target {
            return SearchResult {
                path: Some(vec![start]),
                explored: visited.into_order(),
            };
        }

        visited.mark(start);
        let mut stack = vec![Frame::enter(start, grid)];

        while let Some(frame) = stack.last_mut() {
            let Some(&candidate) = frame.neighbors.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            if visited.contains(&candidate) {
                continue;
            }

            if candidate == target {
                let path = stack
                    .iter()
                    .map(|f| f.pos)
                    .chain(std::iter::once(target))
                    .collect();
                return SearchResult {
                    path: Some(path),
                    explored: visited.into_order(),
                };
            }

            visited.mark(candidate);
            stack.push(Frame::enter(candidate, grid));
        }

        SearchResult {
            path: None,
            explored: visited.into_order(),
        }
    }

    fn label(&self) -> &'static str {
        "DFS"
    }
}
