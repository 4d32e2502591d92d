use crate::algorithms::common::{SearchAlgorithm, SearchResult, Visited};
use crate::algorithms::reconstruct_path;
use crate::grid::{Grid, Position};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Breadth-first search. Always returns a shortest path by step count.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirstSearch;

impl SearchAlgorithm for BreadthFirstSearch {
    fn search(&self, grid: &Grid, start: Position, target: Position) -> SearchResult {
        let mut visited = Visited::default();
        let mut parents: FxHashMap<Position, Position> = FxHashMap::default();
        let mut frontier = VecDeque::from([start]);
        visited.mark(start);

        while let Some(current) = frontier.pop_front() {
            if current == target {
                return SearchResult {
                    path: Some(reconstruct_path(&parents, start, target)),
                    explored: visited.into_order(),
                };
            }

            for next in grid.adjacent(&current) {
                // Marking on enqueue keeps each cell in the frontier at most once.
                if visited.mark(next) {
                    parents.insert(next, current);
                    frontier.push_back(next);
                }
            }
        }

        SearchResult {
            path: None,
            explored: visited.into_order(),
        }
    }

    fn label(&self) -> &'static str {
        "BFS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_prefers_north_west_south_east_order() {
        let grid = Grid::new(3, 3);
        let result = BreadthFirstSearch.search(&grid, Position::new(0, 0), Position::new(2, 2));
        assert_eq!(
            result.path,
            Some(vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
            ])
        );
    }

    #[test]
    fn start_equals_target() {
        let grid = Grid::new(5, 5);
        let start = Position::new(2, 3);
        let result = BreadthFirstSearch.search(&grid, start, start);
        assert_eq!(result.path, Some(vec![start]));
        assert_eq!(result.explored, vec![start]);
    }

    #[test]
    fn walled_off_target_reports_component() {
        // Column 1 is a full wall: the left column cannot reach the right one.
        let wall = (0..3).map(|row| Position::new(row, 1));
        let grid = Grid::with_obstacles(3, 3, wall);
        let result = BreadthFirstSearch.search(&grid, Position::new(0, 0), Position::new(0, 2));
        assert_eq!(result.path, None);
        let mut explored = result.explored.clone();
        explored.sort();
        assert_eq!(
            explored,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn detours_around_obstacles() {
        let grid = Grid::with_obstacles(
            4,
            3,
            [Position::new(0, 1), Position::new(1, 1)],
        );
        let result = BreadthFirstSearch.search(&grid, Position::new(0, 0), Position::new(0, 2));
        assert_eq!(result.steps(), Some(6));
    }
}
