use crate::algorithms::Strategy;
use crate::grid::{Direction, Grid, Position};
use crate::opponent::Opponent;
use crate::pursuit::{PursuitController, TickReport};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// How much one speed key changes the pursuer's step interval.
pub const SPEED_STEP: Duration = Duration::from_millis(100);

pub const OPPONENT_SPAWN: Position = Position::new(0, 0);

/// One frame's worth of input from the player or a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveOpponent(Direction),
    ToggleExplored,
    TogglePath,
    SelectStrategy(Strategy),
    /// Lengthen the step interval.
    SlowDown,
    /// Shorten the step interval, never below zero.
    SpeedUp,
    ToggleRemoveMode,
    TogglePursuer,
    /// Place an obstacle on a free tile, or remove one in remove mode.
    ClickTile(Position),
}

/// Grid, actors, and display toggles.
#[derive(Debug, Clone)]
pub struct World {
    pub grid: Grid,
    pub opponent: Opponent,
    pub pursuer: PursuitController,
    pub show_path: bool,
    pub show_explored: bool,
    pub remove_mode: bool,
}

impl World {
    /// Opponent in the top-left corner. The pursuer already knows where the
    /// opponent spawned, so it waits for the first move before planning.
    pub fn new(grid: Grid, pursuer: PursuitController) -> Self {
        World {
            grid,
            opponent: Opponent::new(OPPONENT_SPAWN),
            pursuer: pursuer.with_last_known_opponent(OPPONENT_SPAWN),
            show_path: true,
            show_explored: true,
            remove_mode: false,
        }
    }

    pub fn center(grid: &Grid) -> Position {
        Position::new(grid.height / 2, grid.width / 2)
    }

    /// Advance one frame. The pursuer acts on what it saw last frame, then
    /// the commands are applied in order.
    pub fn update(&mut self, delta: Duration, commands: &[Command]) -> TickReport {
        let report = self.pursuer.tick(delta, &self.opponent, &self.grid);
        for &command in commands {
            self.apply(command);
        }
        report
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveOpponent(direction) => {
                self.opponent.try_move(direction, &self.grid);
            }
            Command::ToggleExplored => self.show_explored = !self.show_explored,
            Command::TogglePath => self.show_path = !self.show_path,
            Command::SelectStrategy(strategy) => {
                info!(%strategy, "strategy selected");
                self.pursuer.set_strategy(strategy);
            }
            Command::SlowDown => {
                let interval = self.pursuer.step_interval() + SPEED_STEP;
                self.pursuer.set_step_interval(interval);
            }
            Command::SpeedUp => {
                let interval = self.pursuer.step_interval().saturating_sub(SPEED_STEP);
                self.pursuer.set_step_interval(interval);
            }
            Command::ToggleRemoveMode => self.remove_mode = !self.remove_mode,
            Command::TogglePursuer => {
                let moving = !self.pursuer.is_moving();
                self.pursuer.set_moving(moving);
            }
            Command::ClickTile(pos) => self.click_tile(pos),
        }
    }

    /// Obstacles may land under an actor; nothing here prevents it.
    pub fn click_tile(&mut self, pos: Position) {
        let changed = if self.remove_mode {
            self.grid.remove_obstacle(&pos)
        } else if !self.grid.is_occupied(&pos) {
            self.grid.add_obstacle(pos)
        } else {
            false
        };
        debug!(%pos, remove = self.remove_mode, changed, "tile edited");

        // Grid may have changed under the current plan.
        self.pursuer.invalidate();
    }

    pub fn caught(&self) -> bool {
        self.pursuer.position() == self.opponent.position
    }
}

/// The grid as text, one character per tile, under a legend line.
impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Legend: M=Pursuer, P=Player, #=Blocked, *=Path, +=Explored, .=Ground"
        )?;

        let path = self.pursuer.path().filter(|_| self.show_path);
        let explored = self.show_explored.then(|| self.pursuer.explored());

        for row in 0..self.grid.height {
            for col in 0..self.grid.width {
                let pos = Position::new(row, col);
                let tile = if self.grid.is_occupied(&pos) {
                    '#'
                } else if pos == self.pursuer.position() {
                    'M'
                } else if pos == self.opponent.position {
                    'P'
                } else if path.is_some_and(|p| p.contains(&pos)) {
                    '*'
                } else if explored.is_some_and(|e| e.contains(&pos)) {
                    '+'
                } else {
                    '.'
                };
                write!(f, "{tile} ")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "ALGORITHM: {}", self.pursuer.strategy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn world(width: i32, height: i32) -> World {
        let grid = Grid::new(width, height);
        let pursuer = PursuitController::new(World::center(&grid), Strategy::BreadthFirst);
        World::new(grid, pursuer)
    }

    #[test]
    fn clicks_add_then_remove_obstacles() {
        let mut world = world(5, 5);
        let tile = Position::new(1, 3);

        world.apply(Command::ClickTile(tile));
        assert!(world.grid.is_occupied(&tile));

        // Clicking a blocked tile outside remove mode does nothing.
        world.apply(Command::ClickTile(tile));
        assert!(world.grid.is_occupied(&tile));

        world.apply(Command::ToggleRemoveMode);
        world.apply(Command::ClickTile(tile));
        assert!(!world.grid.is_occupied(&tile));

        world.apply(Command::ClickTile(Position::new(9, 9)));
        assert!(world.grid.obstacles().is_empty());
    }

    #[test]
    fn tile_edit_forces_replan() {
        let mut world = world(5, 5);
        assert!(!world.update(FRAME, &[]).replanned);
        assert!(!world.update(FRAME, &[Command::ClickTile(Position::new(4, 4))]).replanned);
        assert!(world.update(FRAME, &[]).replanned);
        assert!(!world.update(FRAME, &[]).replanned);
    }

    #[test]
    fn idle_player_is_never_chased() {
        let mut world = world(7, 7);
        world.pursuer.set_step_interval(Duration::ZERO);
        for _ in 0..120 {
            let report = world.update(FRAME, &[]);
            assert!(!report.replanned && !report.moved);
        }
        assert_eq!(world.pursuer.position(), World::center(&world.grid));
        assert!(world.pursuer.target().is_none());

        world.update(FRAME, &[Command::MoveOpponent(Direction::South)]);
        assert!(world.update(FRAME, &[]).replanned);
    }

    #[test]
    fn speed_keys_adjust_interval() {
        let mut world = world(3, 3);
        world.pursuer.set_step_interval(Duration::from_millis(150));
        world.apply(Command::SlowDown);
        assert_eq!(world.pursuer.step_interval(), Duration::from_millis(250));
        world.apply(Command::SpeedUp);
        world.apply(Command::SpeedUp);
        world.apply(Command::SpeedUp);
        assert_eq!(world.pursuer.step_interval(), Duration::ZERO);
    }

    #[test]
    fn toggles_flip_state() {
        let mut world = world(3, 3);
        world.apply(Command::TogglePursuer);
        assert!(!world.pursuer.is_moving());
        world.apply(Command::TogglePath);
        world.apply(Command::ToggleExplored);
        assert!(!world.show_path && !world.show_explored);
        world.apply(Command::SelectStrategy(Strategy::DepthFirst));
        assert_eq!(world.pursuer.strategy(), Strategy::DepthFirst);
    }

    #[test]
    fn opponent_moves_are_clamped() {
        let mut world = world(3, 3);
        world.update(FRAME, &[Command::MoveOpponent(Direction::North)]);
        assert_eq!(world.opponent.position, Position::new(0, 0));
        world.update(FRAME, &[Command::MoveOpponent(Direction::East)]);
        assert_eq!(world.opponent.position, Position::new(0, 1));
        assert_eq!(world.opponent.last_direction, Position::new(0, 1));
    }

    #[test]
    fn render_draws_actors_path_and_label() {
        let mut world = world(3, 3);
        world.pursuer.set_step_interval(Duration::from_secs(60));
        world.grid.add_obstacle(Position::new(1, 2));
        world.pursuer.invalidate();
        world.update(FRAME, &[]);

        let frame = world.to_string();
        let rows: Vec<&str> = frame.lines().skip(1).take(3).collect();
        // Pursuer at (1,1) heads north then west to the player at (0,0).
        assert_eq!(rows, vec!["P * + ", "+ M # ", "+ + + "]);
        assert!(frame.ends_with("ALGORITHM: BFS\n"));

        world.apply(Command::TogglePath);
        world.apply(Command::ToggleExplored);
        let rows: Vec<String> = world.to_string().lines().skip(1).take(1).map(String::from).collect();
        assert_eq!(rows, vec!["P . . ".to_string()]);
    }
}
