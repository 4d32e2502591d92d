use crate::algorithms::Strategy;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Statistics {
    pub strategy: Strategy,
    pub ticks: usize,
    pub pursuer_steps: usize,
    pub opponent_moves: usize,
    pub replans: usize,
    pub explored_cells: usize,
    pub captured: bool,
    /// Shortest distance from pursuer to opponent at the start, if reachable.
    pub initial_distance: Option<usize>,
    pub num_obstacles: usize,
}

impl Statistics {
    pub fn new(strategy: Strategy, num_obstacles: usize, initial_distance: Option<usize>) -> Self {
        Statistics {
            strategy,
            ticks: 0,
            pursuer_steps: 0,
            opponent_moves: 0,
            replans: 0,
            explored_cells: 0,
            captured: false,
            initial_distance,
            num_obstacles,
        }
    }

    pub fn average_explored(&self) -> f64 {
        if self.replans == 0 {
            0.0
        } else {
            self.explored_cells as f64 / self.replans as f64
        }
    }

    /// Pursuer steps relative to the starting distance. Above 1.0 means the
    /// chase took longer than a straight run at a standing target.
    pub fn chase_ratio(&self) -> f64 {
        match self.initial_distance {
            Some(distance) if distance > 0 && self.pursuer_steps > 0 => {
                self.pursuer_steps as f64 / distance as f64
            }
            _ => 0.0,
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strategy: {}", self.strategy)?;
        writeln!(f, "Captured: {}", if self.captured { "yes" } else { "no" })?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(f, "Pursuer Steps: {}", self.pursuer_steps)?;
        writeln!(f, "Opponent Moves: {}", self.opponent_moves)?;
        match self.initial_distance {
            Some(distance) => writeln!(f, "Initial Distance: {}", distance)?,
            None => writeln!(f, "Initial Distance: unreachable")?,
        }
        writeln!(f, "Number of Obstacles: {}", self.num_obstacles)?;
        writeln!(f, "Re-plans: {}", self.replans)?;
        writeln!(f, "Average Explored per Search: {:.1}", self.average_explored())?;

        if self.chase_ratio() > 0.0 {
            writeln!(f, "Chase Ratio: {:.3}", self.chase_ratio())?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimingData {
    pub search_times: Vec<Duration>,
}

impl TimingData {
    pub fn new() -> Self {
        TimingData::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.search_times.push(elapsed);
    }

    pub fn average_search_time(&self) -> Duration {
        if self.search_times.is_empty() {
            Duration::ZERO
        } else {
            self.total_search_time() / self.search_times.len() as u32
        }
    }

    pub fn total_search_time(&self) -> Duration {
        self.search_times.iter().sum()
    }

    pub fn total_calls(&self) -> usize {
        self.search_times.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_handle_empty_runs() {
        let stats = Statistics::new(Strategy::BreadthFirst, 0, None);
        assert_eq!(stats.average_explored(), 0.0);
        assert_eq!(stats.chase_ratio(), 0.0);
        assert!(stats.to_string().contains("Initial Distance: unreachable"));
    }

    #[test]
    fn ratios_use_counts() {
        let mut stats = Statistics::new(Strategy::BestFirst, 3, Some(8));
        stats.pursuer_steps = 12;
        stats.replans = 4;
        stats.explored_cells = 50;
        assert_eq!(stats.average_explored(), 12.5);
        assert_eq!(stats.chase_ratio(), 1.5);
        assert!(stats.to_string().contains("Chase Ratio: 1.500"));
    }

    #[test]
    fn timing_averages() {
        let mut timing = TimingData::new();
        assert_eq!(timing.average_search_time(), Duration::ZERO);
        timing.record(Duration::from_micros(10));
        timing.record(Duration::from_micros(30));
        assert_eq!(timing.total_calls(), 2);
        assert_eq!(timing.average_search_time(), Duration::from_micros(20));
    }
}
