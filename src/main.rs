use clap::Parser;

use pursuit_pathfinding::config::Config;
use pursuit_pathfinding::simulation::Simulation;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    let strategies = match config.validate().and_then(|_| config.strategies()) {
        Ok(strategies) => strategies,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    if !config.quiet {
        println!("Starting pursuit simulation...");
        println!("Grid size: {}x{}", config.width, config.height);
        println!("Obstacles: {}", config.num_obstacles);
        println!("Algorithm: {}", config.algorithm);
        println!(
            "Step interval: {}ms | Anticipation: {}",
            config.step_interval_ms, config.anticipation
        );

        if config.no_visualization {
            println!("Visualization disabled - running in fast mode");
        } else {
            println!("Visualization enabled with {}ms delay", config.delay_ms);
            println!("Press Ctrl+C to stop the simulation");
        }
        println!();
    }

    if !config.no_visualization {
        std::thread::sleep(std::time::Duration::from_millis(1000));
    }

    if strategies.len() > 1 {
        match Simulation::run_all_strategies(config) {
            Ok(results) => Simulation::print_comparison_results(&results),
            Err(e) => {
                eprintln!("Error running all strategies: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut simulation = match Simulation::new(config.clone(), strategies[0]) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Failed to create simulation: {}", e);
            std::process::exit(1);
        }
    };
    let (stats, timing_data) = simulation.run();

    if config.quiet {
        println!(
            "{}: captured={} ticks={} steps={}",
            stats.strategy, stats.captured, stats.ticks, stats.pursuer_steps
        );
        return;
    }

    println!("\n=== FINAL RESULTS ===");
    println!("Seed: {}", simulation.seed());
    println!("{}", stats);

    println!("=== TIMING ANALYSIS ===");
    println!("Total searches: {}", timing_data.total_calls());
    println!("Average search time: {:.2?}", timing_data.average_search_time());
    println!("Total time searching: {:.2?}", timing_data.total_search_time());
}
