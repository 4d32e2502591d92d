use crate::algorithms::Strategy;
use crate::grid::{Grid, Position};
use crate::opponent::Opponent;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(250);

/// What happened during one call to [`PursuitController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub replanned: bool,
    pub moved: bool,
    /// Cells explored by the search run this tick, if any.
    pub explored: usize,
}

/// Chases an [`Opponent`] across a [`Grid`].
///
/// A new plan is computed whenever the opponent is seen somewhere other than
/// where it was last planned against. Movement along the plan is gated by a
/// step timer, one tile per interval.
#[derive(Debug, Clone)]
pub struct PursuitController {
    position: Position,
    last_known_opponent: Option<Position>,
    path: Option<VecDeque<Position>>,
    explored: Vec<Position>,
    target: Option<Position>,
    elapsed_since_last_step: Duration,
    step_interval: Duration,
    anticipation: i32,
    moving: bool,
    strategy: Strategy,
}

impl PursuitController {
    pub fn new(position: Position, strategy: Strategy) -> Self {
        PursuitController {
            position,
            last_known_opponent: None,
            path: None,
            explored: Vec::new(),
            target: None,
            elapsed_since_last_step: Duration::ZERO,
            step_interval: DEFAULT_STEP_INTERVAL,
            anticipation: 0,
            moving: true,
            strategy,
        }
    }

    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval = interval;
        self
    }

    pub fn with_anticipation(mut self, factor: i32) -> Self {
        self.anticipation = factor;
        self
    }

    /// Start out believing the opponent stands at `pos`. No plan is made
    /// until it is seen anywhere else or [`invalidate`](Self::invalidate) is
    /// called.
    pub fn with_last_known_opponent(mut self, pos: Position) -> Self {
        self.last_known_opponent = Some(pos);
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Remaining tiles to walk, excluding the current one. `None` when the
    /// last search found no route.
    pub fn path(&self) -> Option<&VecDeque<Position>> {
        self.path.as_ref()
    }

    pub fn explored(&self) -> &[Position] {
        &self.explored
    }

    /// The tile the current plan aims at.
    pub fn target(&self) -> Option<Position> {
        self.target
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Takes effect on the next re-plan; the current path is kept.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn set_step_interval(&mut self, interval: Duration) {
        self.step_interval = interval;
    }

    pub fn anticipation(&self) -> i32 {
        self.anticipation
    }

    /// Forget where the opponent was so the next tick re-plans. Used after
    /// the grid has been edited.
    pub fn invalidate(&mut self) {
        self.last_known_opponent = None;
    }

    /// Where the opponent will be after `anticipation` more steps in its
    /// last direction, or its current tile if that spot is blocked or does
    /// not fit in a coordinate.
    pub fn anticipated_position(&self, opponent: &Opponent, grid: &Grid) -> Position {
        match opponent
            .position
            .checked_project(opponent.last_direction, self.anticipation)
        {
            Some(ahead) if !grid.is_occupied(&ahead) => ahead,
            _ => opponent.position,
        }
    }

    /// Aim ahead of the opponent only when that spot is strictly closer.
    pub fn choose_target(&self, opponent: &Opponent, grid: &Grid) -> Position {
        let anticipated = self.anticipated_position(opponent, grid);
        let direct = self.position.distance(&opponent.position);
        let ambush = self.position.distance(&anticipated);
        if direct <= ambush {
            opponent.position
        } else {
            anticipated
        }
    }

    fn needs_replan(&self, opponent: &Opponent) -> bool {
        self.last_known_opponent != Some(opponent.position)
    }

    /// Run the active strategy toward the chosen target and store the result.
    /// Returns the number of cells explored.
    pub fn replan(&mut self, opponent: &Opponent, grid: &Grid) -> usize {
        self.last_known_opponent = Some(opponent.position);

        let target = self.choose_target(opponent, grid);
        let result = self.strategy.search(grid, self.position, target);

        self.path = result.path.map(|path| {
            let mut path = VecDeque::from(path);
            // Leading cell is where we already stand.
            path.pop_front();
            path
        });
        self.explored = result.explored;
        self.target = Some(target);

        debug!(
            strategy = %self.strategy,
            from = %self.position,
            %target,
            steps = self.path.as_ref().map(VecDeque::len),
            explored = self.explored.len(),
            "replanned"
        );

        self.explored.len()
    }

    /// Advance by `delta`. Re-plans first if the opponent has moved, then
    /// takes at most one step once the step timer has run out.
    pub fn tick(&mut self, delta: Duration, opponent: &Opponent, grid: &Grid) -> TickReport {
        let mut report = TickReport::default();

        if self.needs_replan(opponent) {
            report.explored = self.replan(opponent, grid);
            report.replanned = true;
        }

        self.elapsed_since_last_step += delta;
        if self.elapsed_since_last_step >= self.step_interval {
            self.elapsed_since_last_step = Duration::ZERO;
            report.moved = self.step();
        }

        report
    }

    fn step(&mut self) -> bool {
        if !self.moving {
            return false;
        }
        match self.path.as_mut().and_then(VecDeque::pop_front) {
            Some(next) => {
                debug!(from = %self.position, to = %next, "pursuer step");
                self.position = next;
                true
            }
            None => false,
        }
    }
}
