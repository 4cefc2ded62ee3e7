use clap::Parser;

use grid_astar::algorithms::{self, PathfindingAlgorithm, ALGORITHM_NAMES};
use grid_astar::batch_simulation::BatchSimulation;
use grid_astar::config::Config;
use grid_astar::grid::{Grid, Position};
use grid_astar::simulation::Simulation;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::time::Instant;

/// Queries run when no start and target are given: an open route, a route
/// around the inner walls, a walled target and a walled start.
const DEMO_QUERIES: [((usize, usize), (usize, usize)); 4] = [
    ((0, 0), (9, 9)),
    ((8, 2), (2, 2)),
    ((0, 0), (1, 1)),
    ((1, 1), (9, 9)),
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    if config.batch_mode {
        let mut batch = BatchSimulation::new(config.clone());
        batch.run()?;
        if !config.quiet {
            batch.print_summary();
        }
        if batch.summary().mismatches > 0 {
            return Err(format!(
                "{} runs where A* and Dijkstra disagree",
                batch.summary().mismatches
            )
            .into());
        }
        return Ok(());
    }

    let grid = build_grid(&config)?;
    let names = selected_algorithms(&config)?;

    if !config.quiet {
        println!("Grid size: {}x{}", grid.rows(), grid.cols());
        println!("Walls: {}", grid.wall_count());
        println!("Algorithm: {}", config.algorithm);
        println!();
    }

    if !config.agents.is_empty() {
        let target = config
            .target
            .unwrap_or_else(|| Position::new(grid.rows() - 1, grid.cols() - 1));

        for name in names {
            let algorithm = algorithms::by_name(name, &grid)
                .ok_or_else(|| format!("unknown algorithm {:?}", name))?;
            let mut sim_config = config.clone();
            // Comparing algorithms replays the same run, so only animate once.
            sim_config.no_visualization |= config.algorithm == "all";

            let mut simulation =
                Simulation::new(sim_config, &grid, algorithm, target, &config.agents);
            let report = simulation.run();
            Simulation::print_report(&report);
        }
        return Ok(());
    }

    let queries: Vec<(Position, Position)> = match (config.start, config.target) {
        (Some(start), Some(target)) => vec![(start, target)],
        (None, None) => DEMO_QUERIES
            .iter()
            .map(|&(s, t)| (Position::from(s), Position::from(t)))
            .collect(),
        _ => return Err("--start and --target must be given together".into()),
    };

    for name in names {
        let algorithm = algorithms::by_name(name, &grid)
            .ok_or_else(|| format!("unknown algorithm {:?}", name))?;
        for &(start, target) in &queries {
            run_query(&config, &grid, algorithm.as_ref(), start, target);
        }
    }
    Ok(())
}

fn build_grid(config: &Config) -> Result<Grid, Box<dyn Error>> {
    if let Some(path) = &config.map {
        return Ok(Grid::load(path)?);
    }

    let Some(size) = config.grid_size else {
        return Ok(Grid::demo_maze());
    };
    if size == 0 {
        return Err("--grid-size must be at least 1".into());
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Random grid seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut keep_clear: Vec<Position> = config.agents.clone();
    keep_clear.extend(config.start);
    keep_clear.extend(config.target);
    Ok(Grid::random(size, size, config.num_walls, &mut rng, &keep_clear))
}

fn selected_algorithms(config: &Config) -> Result<Vec<&'static str>, Box<dyn Error>> {
    if config.algorithm == "all" {
        return Ok(ALGORITHM_NAMES.to_vec());
    }
    ALGORITHM_NAMES
        .iter()
        .find(|&&name| name == config.algorithm)
        .map(|&name| vec![name])
        .ok_or_else(|| {
            format!(
                "select one of {:?} or 'all' for --algorithm, got {:?}",
                ALGORITHM_NAMES, config.algorithm
            )
            .into()
        })
}

fn run_query(
    config: &Config,
    grid: &Grid,
    algorithm: &dyn PathfindingAlgorithm,
    start: Position,
    target: Position,
) {
    println!(
        "[{}] Finding path from {} to {}...",
        algorithm.name(),
        start,
        target
    );

    let find_path_start = Instant::now();
    let result = algorithm.find_path(start, target);
    let elapsed = find_path_start.elapsed();

    match result {
        Ok(path) => {
            println!(
                "Path found with length {} (cost {:.3}, {} nodes expanded, {:.2?})",
                path.cells.len(),
                path.cost,
                path.nodes_expanded,
                elapsed
            );
            if !config.quiet {
                let cells: Vec<String> = path.cells.iter().map(ToString::to_string).collect();
                println!("{}", cells.join(" -> "));
            }
            if !config.no_visualization {
                grid.print_grid(&path.cells, &[], None);
            }
        }
        Err(reason) => println!("No path found: {}", reason),
    }
    println!();
}
