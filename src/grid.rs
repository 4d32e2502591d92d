use rand::Rng;
use rustc_hash::FxHashSet;
use std::fmt;
use std::ops::Add;

/// A tile coordinate. `row` grows southward, `col` grows eastward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Grid (Manhattan) distance between two positions.
    pub fn distance(&self, other: &Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// `self + offset * factor`, or `None` if either coordinate overflows.
    pub fn checked_project(&self, offset: Position, factor: i32) -> Option<Position> {
        let row = offset.row.checked_mul(factor)?.checked_add(self.row)?;
        let col = offset.col.checked_mul(factor)?.checked_add(self.col)?;
        Some(Position::new(row, col))
    }

    /// True when `other` is exactly one axis step away.
    pub fn is_adjacent_to(&self, other: &Position) -> bool {
        self.distance(other) == 1
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Axis-aligned unit moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    West,
    South,
    East,
}

impl Direction {
    /// Neighbor enumeration order. Search tie-breaking depends on it.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::South,
        Direction::East,
    ];

    pub const fn offset(self) -> Position {
        match self {
            Direction::North => Position::new(-1, 0),
            Direction::West => Position::new(0, -1),
            Direction::South => Position::new(1, 0),
            Direction::East => Position::new(0, 1),
        }
    }

    pub fn from_offset(offset: Position) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| dir.offset() == offset)
    }
}

/// Fixed-size occupancy lattice.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    obstacles: FxHashSet<Position>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Grid {
            width,
            height,
            obstacles: FxHashSet::default(),
        }
    }

    pub fn with_obstacles<I>(width: i32, height: i32, obstacles: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut grid = Grid::new(width, height);
        for pos in obstacles {
            grid.add_obstacle(pos);
        }
        grid
    }

    pub fn in_bounds(&self, pos: &Position) -> bool {
        pos.row >= 0 && pos.row < self.height && pos.col >= 0 && pos.col < self.width
    }

    /// Out-of-bounds tiles count as occupied.
    pub fn is_occupied(&self, pos: &Position) -> bool {
        !self.in_bounds(pos) || self.obstacles.contains(pos)
    }

    /// Unoccupied axis neighbors, in north, west, south, east order.
    pub fn adjacent(&self, pos: &Position) -> Vec<Position> {
        Direction::ALL
            .iter()
            .map(|dir| *pos + dir.offset())
            .filter(|next| !self.is_occupied(next))
            .collect()
    }

    /// Returns false when the obstacle was already present.
    pub fn add_obstacle(&mut self, pos: Position) -> bool {
        self.obstacles.insert(pos)
    }

    /// Returns false when there was nothing to remove.
    pub fn remove_obstacle(&mut self, pos: &Position) -> bool {
        self.obstacles.remove(pos)
    }

    pub fn obstacles(&self) -> &FxHashSet<Position> {
        &self.obstacles
    }

    /// Scatter `count` random obstacles. Rolls that land on an existing
    /// obstacle are wasted. Returns how many were actually placed.
    pub fn seed_obstacles<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        let mut placed = 0;
        for _ in 0..count {
            let pos = Position::new(rng.gen_range(0..self.height), rng.gen_range(0..self.width));
            if self.add_obstacle(pos) {
                placed += 1;
            }
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn out_of_bounds_is_occupied() {
        let grid = Grid::new(3, 2);
        assert!(grid.is_occupied(&Position::new(-1, 0)));
        assert!(grid.is_occupied(&Position::new(0, -1)));
        assert!(grid.is_occupied(&Position::new(2, 0)));
        assert!(grid.is_occupied(&Position::new(0, 3)));
        assert!(!grid.is_occupied(&Position::new(1, 2)));
    }

    #[test]
    fn adjacent_uses_fixed_order_and_skips_blocked() {
        let mut grid = Grid::new(3, 3);
        let center = Position::new(1, 1);
        assert_eq!(
            grid.adjacent(&center),
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(2, 1),
                Position::new(1, 2),
            ]
        );

        grid.add_obstacle(Position::new(1, 0));
        assert_eq!(
            grid.adjacent(&center),
            vec![Position::new(0, 1), Position::new(2, 1), Position::new(1, 2)]
        );

        // Corner: north and west fall off the grid.
        assert_eq!(
            grid.adjacent(&Position::new(0, 0)),
            vec![Position::new(0, 1)]
        );
    }

    #[test]
    fn obstacle_edits_are_idempotent() {
        let mut grid = Grid::new(4, 4);
        let pos = Position::new(2, 2);
        assert!(grid.add_obstacle(pos));
        assert!(!grid.add_obstacle(pos));
        assert_eq!(grid.obstacles().len(), 1);
        assert!(grid.remove_obstacle(&pos));
        assert!(!grid.remove_obstacle(&pos));
        assert!(!grid.is_occupied(&pos));
    }

    #[test]
    fn position_arithmetic() {
        let p = Position::new(0, 2) + Direction::East.offset();
        assert_eq!(p, Position::new(0, 3));
        assert_eq!(Position::new(5, 5).distance(&p), 7);
        assert!(Position::new(1, 1).is_adjacent_to(&Position::new(1, 2)));
        assert!(!Position::new(1, 1).is_adjacent_to(&Position::new(2, 2)));
    }

    #[test]
    fn checked_project_reports_overflow() {
        let origin = Position::new(0, 1);
        assert_eq!(
            origin.checked_project(Direction::East.offset(), 3),
            Some(Position::new(0, 4))
        );
        assert_eq!(origin.checked_project(Direction::East.offset(), i32::MAX), None);
        assert_eq!(
            Position::new(-1, 0).checked_project(Direction::North.offset(), i32::MAX),
            None
        );
    }

    #[test]
    fn seeded_obstacles_stay_in_bounds() {
        let mut grid = Grid::new(10, 6);
        let mut rng = StdRng::seed_from_u64(7);
        let placed = grid.seed_obstacles(14, &mut rng);
        assert_eq!(placed, grid.obstacles().len());
        assert!(grid.obstacles().iter().all(|p| grid.in_bounds(p)));
    }
}
