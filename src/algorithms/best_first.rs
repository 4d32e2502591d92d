use crate::algorithms::common::{manhattan, SearchAlgorithm, SearchResult, Visited};
use crate::algorithms::reconstruct_path;
use crate::grid::{Grid, Position};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Priority of a frontier entry. `BinaryHeap` is a max-heap, so `Ord` is
/// reversed to pop the smallest key first.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Key {
    /// Steps taken plus the Manhattan estimate of the steps remaining.
    estimate: u32,
    /// Manhattan distance to the target.
    heuristic: u32,
    /// Insertion order, so equal keys come out first-in first-out.
    seq: u64,
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct QueueEntry {
    key: Key,
    cost: u32,
    pos: Position,
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Heuristic best-first search ("A-STAR" on screen).
///
/// The frontier is a min-heap ordered by steps-so-far plus Manhattan distance,
/// with the raw distance and then insertion order breaking ties. Manhattan
/// distance is consistent on a uniform 4-connected grid, so the first time the
/// target is popped its path is as short as the one BFS would return.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestFirstSearch;

impl SearchAlgorithm for BestFirstSearch {
    fn search(&self, grid: &Grid, start: Position, target: Position) -> SearchResult {
        let mut visited = Visited::default();
        let mut parents: FxHashMap<Position, Position> = FxHashMap::default();
        let mut costs: FxHashMap<Position, u32> = FxHashMap::default();
        let mut frontier = BinaryHeap::new();
        let mut seq = 0u64;

        let mut push = |frontier: &mut BinaryHeap<QueueEntry>, pos: Position, cost: u32| {
            let heuristic = manhattan(&pos, &target);
            frontier.push(QueueEntry {
                key: Key {
                    estimate: cost + heuristic,
                    heuristic,
                    seq,
                },
                cost,
                pos,
            });
            seq += 1;
        };

        visited.mark(start);
        costs.insert(start, 0);
        push(&mut frontier, start, 0);

        while let Some(QueueEntry { cost, pos, .. }) = frontier.pop() {
            // A cheaper route to this cell was queued after this entry.
            if costs.get(&pos).is_some_and(|&best| cost > best) {
                continue;
            }

            if pos == target {
                return SearchResult {
                    path: Some(reconstruct_path(&parents, start, target)),
                    explored: visited.into_order(),
                };
            }

            let next_cost = cost + 1;
            for next in grid.adjacent(&pos) {
                if costs.get(&next).is_some_and(|&best| best <= next_cost) {
                    continue;
                }
                visited.mark(next);
                costs.insert(next, next_cost);
                parents.insert(next, pos);
                push(&mut frontier, next, next_cost);
            }
        }

        SearchResult {
            path: None,
            explored: visited.into_order(),
        }
    }

    fn label(&self) -> &'static str {
        "A-STAR"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::bfs::BreadthFirstSearch;

    #[test]
    fn heap_pops_lowest_estimate_then_heuristic_then_oldest() {
        let mut heap = BinaryHeap::new();
        let entry = |estimate: u32, heuristic: u32, seq: u64| QueueEntry {
            key: Key {
                estimate,
                heuristic,
                seq,
            },
            cost: estimate - heuristic,
            pos: Position::new(0, seq as i32),
        };
        heap.push(entry(6, 2, 0));
        heap.push(entry(4, 4, 1));
        heap.push(entry(4, 2, 2));
        heap.push(entry(4, 2, 3));

        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|e| e.key.seq)).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn matches_bfs_length_around_a_trap() {
        // A cup opening away from the start lures greedy search into a dead end.
        let cup = [
            Position::new(1, 3),
            Position::new(2, 3),
            Position::new(3, 3),
            Position::new(3, 2),
            Position::new(3, 1),
            Position::new(1, 2),
        ];
        let grid = Grid::with_obstacles(7, 7, cup);
        let start = Position::new(2, 1);
        let target = Position::new(2, 5);

        let best = BestFirstSearch.search(&grid, start, target);
        let bfs = BreadthFirstSearch.search(&grid, start, target);
        assert!(best.found());
        assert_eq!(best.steps(), bfs.steps());
    }

    #[test]
    fn explores_less_than_bfs_on_open_grid() {
        let grid = Grid::new(15, 15);
        let start = Position::new(7, 0);
        let target = Position::new(7, 14);
        let best = BestFirstSearch.search(&grid, start, target);
        let bfs = BreadthFirstSearch.search(&grid, start, target);
        assert_eq!(best.steps(), Some(14));
        assert!(best.explored.len() < bfs.explored.len());
    }

    #[test]
    fn start_equals_target() {
        let grid = Grid::new(2, 2);
        let start = Position::new(1, 1);
        let result = BestFirstSearch.search(&grid, start, start);
        assert_eq!(result.path, Some(vec![start]));
        assert_eq!(result.explored, vec![start]);
    }

    #[test]
    fn blocked_target_is_a_normal_miss() {
        let target = Position::new(2, 2);
        let grid = Grid::with_obstacles(3, 3, [target]);
        let result = BestFirstSearch.search(&grid, Position::new(0, 0), target);
        assert_eq!(result.path, None);
        assert_eq!(result.explored.len(), 8);
    }
}
