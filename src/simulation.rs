use crate::algorithms::Strategy;
use crate::config::Config;
use crate::error::Result;
use crate::grid::{Direction, Grid, Position};
use crate::pursuit::PursuitController;
use crate::statistics::{Statistics, TimingData};
use crate::world::{Command, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Chance that the scripted opponent keeps heading the same way.
const KEEP_DIRECTION_PROBABILITY: f64 = 0.75;

#[derive(Debug, Clone)]
pub struct StrategyResult {
    pub statistics: Statistics,
    pub timing_data: TimingData,
    pub final_position: Position,
    pub opponent_position: Position,
}

/// Fixed-tick driver: a scripted opponent wanders the grid while the pursuer
/// chases it, until capture or the tick budget runs out.
pub struct Simulation {
    world: World,
    config: Config,
    rng: StdRng,
    seed: u64,
}

impl Simulation {
    pub fn new(config: Config, strategy: Strategy) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_seed(config, strategy, seed)
    }

    /// Same seed, same obstacles, same opponent route.
    pub fn with_seed(config: Config, strategy: Strategy, seed: u64) -> Result<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Grid::new(config.width, config.height);
        grid.seed_obstacles(config.num_obstacles, &mut rng);

        let pursuer = PursuitController::new(World::center(&grid), strategy)
            .with_step_interval(config.step_interval())
            .with_anticipation(config.anticipation);
        let world = World::new(grid, pursuer);

        for (actor, pos) in [
            ("pursuer", world.pursuer.position()),
            ("opponent", world.opponent.position),
        ] {
            if world.grid.is_occupied(&pos) {
                warn!(actor, %pos, "obstacle seeded under actor");
            }
        }

        Ok(Simulation {
            world,
            config,
            rng,
            seed,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run(&mut self) -> (Statistics, TimingData) {
        let tick = self.config.tick_duration();
        let visualize = !self.config.no_visualization;
        let mut stats = Statistics::new(
            self.world.pursuer.strategy(),
            self.world.grid.obstacles().len(),
            shortest_distance(
                &self.world.grid,
                self.world.pursuer.position(),
                self.world.opponent.position,
            ),
        );
        let mut timing_data = TimingData::new();

        info!(
            strategy = %stats.strategy,
            seed = self.seed,
            width = self.world.grid.width,
            height = self.world.grid.height,
            obstacles = stats.num_obstacles,
            "simulation started"
        );

        if visualize {
            self.draw(&stats);
        }

        while !self.world.caught() && stats.ticks < self.config.max_ticks {
            let commands = self.script_opponent(stats.ticks);
            let opponent_before = self.world.opponent.position;

            let started = Instant::now();
            let report = self.world.update(tick, &commands);
            let elapsed = started.elapsed();

            if report.replanned {
                timing_data.record(elapsed);
                stats.replans += 1;
                stats.explored_cells += report.explored;
            }
            if report.moved {
                stats.pursuer_steps += 1;
            }
            let opponent_moved = self.world.opponent.position != opponent_before;
            if opponent_moved {
                stats.opponent_moves += 1;
            }
            stats.ticks += 1;

            if visualize && (report.moved || opponent_moved) {
                self.draw(&stats);
            }
        }

        stats.captured = self.world.caught();
        info!(
            strategy = %stats.strategy,
            captured = stats.captured,
            ticks = stats.ticks,
            steps = stats.pursuer_steps,
            "simulation finished"
        );

        if visualize {
            self.clear_screen();
            println!("=== SIMULATION COMPLETE ===");
            if stats.captured {
                println!("SUCCESS: Pursuer caught the player!");
            } else {
                println!("FAILED: Player escaped within {} ticks", stats.ticks);
            }
            print!("{}", self.world);
        }

        (stats, timing_data)
    }

    /// Run every strategy against the same world and opponent route.
    pub fn run_all_strategies(config: Config) -> Result<Vec<StrategyResult>> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut quiet_config = config.clone();
        quiet_config.no_visualization = true;

        println!("Running comparison of {} strategies...", Strategy::ALL.len());
        println!("Environment seed: {} (for reproducibility)", seed);
        println!(
            "Environment: Grid {}x{}, Obstacles: {}",
            config.width, config.height, config.num_obstacles
        );
        println!();

        let mut results = Vec::new();
        for (i, strategy) in Strategy::ALL.into_iter().enumerate() {
            println!("Running strategy {} of {}: {}", i + 1, Strategy::ALL.len(), strategy);
            let mut simulation = Simulation::with_seed(quiet_config.clone(), strategy, seed)?;
            let (statistics, timing_data) = simulation.run();
            println!(
                "Completed: {} - Captured: {}, Steps: {}",
                strategy, statistics.captured, statistics.pursuer_steps
            );
            results.push(StrategyResult {
                statistics,
                timing_data,
                final_position: simulation.world.pursuer.position(),
                opponent_position: simulation.world.opponent.position,
            });
        }

        Ok(results)
    }

    pub fn print_comparison_results(results: &[StrategyResult]) {
        println!("\n=== STRATEGY COMPARISON RESULTS ===");
        println!();
        println!(
            "{:<10} {:<9} {:<8} {:<8} {:<10} {:<14} {:<16} {:<12} {:<12}",
            "Strategy", "Captured", "Ticks", "Steps", "Re-plans", "Avg Explored", "Avg Search", "Final", "Player"
        );
        println!("{}", "-".repeat(105));

        for result in results {
            let stats = &result.statistics;
            println!(
                "{:<10} {:<9} {:<8} {:<8} {:<10} {:<14.1} {:<16} {:<12} {:<12}",
                stats.strategy.label(),
                if stats.captured { "✓" } else { "✗" },
                stats.ticks,
                stats.pursuer_steps,
                stats.replans,
                stats.average_explored(),
                format!("{:.2?}", result.timing_data.average_search_time()),
                result.final_position.to_string(),
                result.opponent_position.to_string(),
            );
        }
        println!();

        let captured: Vec<_> = results.iter().filter(|r| r.statistics.captured).collect();
        if let Some(fastest) = captured.iter().min_by_key(|r| r.statistics.ticks) {
            println!(
                "Fastest capture: {} ({} ticks)",
                fastest.statistics.strategy, fastest.statistics.ticks
            );
        } else {
            println!("No strategy caught the player.");
        }
        if let Some(leanest) = results
            .iter()
            .filter(|r| r.statistics.replans > 0)
            .min_by(|a, b| {
                a.statistics
                    .average_explored()
                    .total_cmp(&b.statistics.average_explored())
            })
        {
            println!(
                "Fewest cells explored per search: {} ({:.1})",
                leanest.statistics.strategy,
                leanest.statistics.average_explored()
            );
        }
    }

    /// The opponent moves every `opponent_move_ticks` ticks, usually keeping
    /// its heading and sometimes picking a fresh one.
    fn script_opponent(&mut self, tick: usize) -> Vec<Command> {
        let every = self.config.opponent_move_ticks;
        if every == 0 || tick % every != every - 1 {
            return Vec::new();
        }

        let heading = Direction::from_offset(self.world.opponent.last_direction);
        let direction = match heading {
            Some(dir) if self.rng.gen_bool(KEEP_DIRECTION_PROBABILITY) => dir,
            _ => Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())],
        };
        debug!(tick, ?direction, "opponent move");
        vec![Command::MoveOpponent(direction)]
    }

    fn draw(&self, stats: &Statistics) {
        self.clear_screen();
        println!("=== PURSUIT SIMULATION ===");
        println!(
            "Strategy: {} | Tick: {} | Steps: {} | Re-plans: {} | Look-ahead: {}",
            stats.strategy,
            stats.ticks,
            stats.pursuer_steps,
            stats.replans,
            self.world.pursuer.anticipation()
        );
        println!(
            "Pursuer: {} | Player: {} | Target: {}",
            self.world.pursuer.position(),
            self.world.opponent.position,
            self.world
                .pursuer
                .target()
                .map_or_else(|| "-".to_string(), |t| t.to_string()),
        );
        print!("{}", self.world);
        thread::sleep(Duration::from_millis(self.config.delay_ms));
    }

    fn clear_screen(&self) {
        print!("\x1B[2J\x1B[1;1H");
    }
}

/// Shortest step count between two tiles, via the `pathfinding` crate.
pub fn shortest_distance(grid: &Grid, from: Position, to: Position) -> Option<usize> {
    pathfinding::prelude::bfs(&from, |p| grid.adjacent(p), |p| *p == to).map(|path| path.len() - 1)
}
