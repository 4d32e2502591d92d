use crate::grid::{Direction, Grid, Position};

/// The player being chased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opponent {
    pub position: Position,
    /// Unit offset of the most recent move attempt, `(0, 0)` before any.
    pub last_direction: Position,
}

impl Opponent {
    pub fn new(position: Position) -> Self {
        Opponent {
            position,
            last_direction: Position::default(),
        }
    }

    /// Step one tile. A blocked step leaves the position unchanged but the
    /// attempted direction is still remembered. Returns true if it moved.
    pub fn try_move(&mut self, direction: Direction, grid: &Grid) -> bool {
        self.last_direction = direction.offset();
        let next = self.position + direction.offset();
        if grid.is_occupied(&next) {
            return false;
        }
        self.position = next;
        true
    }
}
