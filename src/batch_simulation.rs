use crate::algorithms::common::PathfindingAlgorithm;
use crate::algorithms::{AStar, Dijkstra};
use crate::config::Config;
use crate::error::GridError;
use crate::grid::{Grid, Position};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::OpenOptions;
use std::io::Write;
use std::time::{Duration, Instant};

/// Costs closer than this are treated as equal.
const COST_TOLERANCE: f64 = 1e-9;

const CSV_HEADER: &str = "simulation_id,seed,grid_size,num_walls,start_row,start_col,\
target_row,target_col,a_star_found,dijkstra_found,a_star_cost,dijkstra_cost,agree,\
a_star_nodes,dijkstra_nodes,a_star_time_ns,dijkstra_time_ns";

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub simulation_id: usize,
    pub seed: u64,
    pub grid_size: usize,
    pub num_walls: usize,
    pub start: Position,
    pub target: Position,
    pub a_star_cost: Option<f64>,
    pub dijkstra_cost: Option<f64>,
    pub a_star_nodes: usize,
    pub dijkstra_nodes: usize,
    pub a_star_time: Duration,
    pub dijkstra_time: Duration,
}

impl BatchResult {
    /// Both solvers found a path of the same cost, or both found none.
    pub fn agrees(&self) -> bool {
        match (self.a_star_cost, self.dijkstra_cost) {
            (Some(a), Some(d)) => (a - d).abs() <= COST_TOLERANCE,
            (None, None) => true,
            _ => false,
        }
    }

    fn csv_row(&self) -> String {
        let cost = |c: Option<f64>| c.map(|c| format!("{:.9}", c)).unwrap_or_default();
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.simulation_id,
            self.seed,
            self.grid_size,
            self.num_walls,
            self.start.row,
            self.start.col,
            self.target.row,
            self.target.col,
            self.a_star_cost.is_some(),
            self.dijkstra_cost.is_some(),
            cost(self.a_star_cost),
            cost(self.dijkstra_cost),
            self.agrees(),
            self.a_star_nodes,
            self.dijkstra_nodes,
            self.a_star_time.as_nanos(),
            self.dijkstra_time.as_nanos(),
        )
    }
}

/// Running totals kept across CSV flushes.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub simulations: usize,
    pub paths_found: usize,
    pub mismatches: usize,
    pub a_star_nodes: usize,
    pub dijkstra_nodes: usize,
    pub a_star_time: Duration,
    pub dijkstra_time: Duration,
}

impl BatchSummary {
    fn add(&mut self, result: &BatchResult) {
        self.simulations += 1;
        if result.a_star_cost.is_some() {
            self.paths_found += 1;
        }
        if !result.agrees() {
            self.mismatches += 1;
        }
        self.a_star_nodes += result.a_star_nodes;
        self.dijkstra_nodes += result.dijkstra_nodes;
        self.a_star_time += result.a_star_time;
        self.dijkstra_time += result.dijkstra_time;
    }

    pub fn agreement_rate(&self) -> f64 {
        if self.simulations == 0 {
            return 0.0;
        }
        (self.simulations - self.mismatches) as f64 / self.simulations as f64 * 100.0
    }
}

/// Runs A* and the Dijkstra baseline over many random grids and records
/// whether they agree on the optimal cost.
pub struct BatchSimulation {
    config: Config,
    grid_size: usize,
    results: Vec<BatchResult>,
    start_time: Instant,
    batch_size: usize,
    total_results_written: usize,
    summary: BatchSummary,
}

impl BatchSimulation {
    pub fn new(config: Config) -> Self {
        let grid_size = config.grid_size.unwrap_or(20).max(1);
        BatchSimulation {
            config,
            grid_size,
            results: Vec::new(),
            start_time: Instant::now(),
            batch_size: 100,
            total_results_written: 0,
            summary: BatchSummary::default(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    pub fn run(&mut self) -> Result<(), GridError> {
        self.start_time = Instant::now();
        self.initialize_csv_file()?;

        if !self.config.quiet {
            println!("=== BATCH VERIFICATION STARTED ===");
            println!("Grid size: {}", self.grid_size);
            println!(
                "Walls range: {} to {} (step {})",
                self.config.min_walls, self.config.max_walls, self.config.wall_step
            );
            println!("Simulations per configuration: {}", self.config.num_simulations);
            println!("Timeout: {} seconds", self.config.timeout_seconds);
            println!("Output file: {}", self.config.output_file);
            println!();
        }

        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        info!("Batch base seed: {}", base_seed);

        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let step = self.config.wall_step.max(1);

        'outer: for num_walls in (self.config.min_walls..=self.config.max_walls).step_by(step) {
            if !self.config.quiet {
                println!("Configuration: {} walls", num_walls);
            }

            for _ in 0..self.config.num_simulations {
                if self.start_time.elapsed() > timeout {
                    warn!("Timeout reached after {} simulations", self.summary.simulations);
                    break 'outer;
                }

                let simulation_id = self.summary.simulations;
                let seed = base_seed.wrapping_add(simulation_id as u64);
                let result = self.run_single(simulation_id, seed, num_walls);
                if !result.agrees() {
                    warn!(
                        "Cost mismatch (seed {}): a_star={:?} dijkstra={:?}",
                        seed, result.a_star_cost, result.dijkstra_cost
                    );
                }
                self.summary.add(&result);
                self.results.push(result);

                if self.results.len() >= self.batch_size {
                    self.flush_results_to_csv()?;
                }
            }
        }

        self.flush_results_to_csv()?;

        if !self.config.quiet {
            println!("\n=== BATCH VERIFICATION COMPLETED ===");
            println!("Simulations run: {}", self.summary.simulations);
            println!("Results saved to: {}", self.config.output_file);
            println!("Total time: {:.2?}", self.start_time.elapsed());
        }
        Ok(())
    }

    /// One random grid. Start and target come from opposite halves and are
    /// kept clear of walls.
    pub fn run_single(&self, simulation_id: usize, seed: u64, num_walls: usize) -> BatchResult {
        let size = self.grid_size;
        let mut rng = StdRng::seed_from_u64(seed);

        let half = (size / 2).max(1);
        let start = Position::new(rng.gen_range(0..half), rng.gen_range(0..half));
        let target = Position::new(
            rng.gen_range(size / 2..size),
            rng.gen_range(size / 2..size),
        );
        let grid = Grid::random(size, size, num_walls, &mut rng, &[start, target]);

        let a_star = AStar::new(&grid);
        let dijkstra = Dijkstra::new(&grid);

        let (a_star_cost, a_star_nodes, a_star_time) = timed_search(&a_star, start, target);
        let (dijkstra_cost, dijkstra_nodes, dijkstra_time) =
            timed_search(&dijkstra, start, target);

        BatchResult {
            simulation_id,
            seed,
            grid_size: size,
            num_walls,
            start,
            target,
            a_star_cost,
            dijkstra_cost,
            a_star_nodes,
            dijkstra_nodes,
            a_star_time,
            dijkstra_time,
        }
    }

    fn flush_results_to_csv(&mut self) -> Result<(), GridError> {
        if self.results.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.output_file)?;

        for result in &self.results {
            writeln!(file, "{}", result.csv_row())?;
        }

        self.total_results_written += self.results.len();
        if !self.config.quiet {
            println!(
                "Flushed {} results to CSV (total: {})",
                self.results.len(),
                self.total_results_written
            );
        }
        self.results.clear();
        Ok(())
    }

    fn initialize_csv_file(&self) -> Result<(), GridError> {
        let mut file = std::fs::File::create(&self.config.output_file)?;
        writeln!(file, "{}", CSV_HEADER)?;

        if !self.config.quiet {
            println!("Initialized CSV file: {}", self.config.output_file);
        }
        Ok(())
    }

    pub fn print_summary(&self) {
        let summary = &self.summary;
        if summary.simulations == 0 {
            println!("No results to summarize.");
            return;
        }

        let runs = summary.simulations as u32;
        println!("\n=== BATCH VERIFICATION SUMMARY ===");
        println!(
            "Paths found: {}/{} ({:.1}%)",
            summary.paths_found,
            summary.simulations,
            summary.paths_found as f64 / summary.simulations as f64 * 100.0
        );
        println!(
            "A* / Dijkstra agreement: {:.1}% ({} mismatches)",
            summary.agreement_rate(),
            summary.mismatches
        );
        println!(
            "Average nodes expanded: A* {:.1} | Dijkstra {:.1}",
            summary.a_star_nodes as f64 / summary.simulations as f64,
            summary.dijkstra_nodes as f64 / summary.simulations as f64
        );
        println!(
            "Average find_path time: A* {:.2?} | Dijkstra {:.2?}",
            summary.a_star_time / runs,
            summary.dijkstra_time / runs
        );
    }
}

fn timed_search(
    algorithm: &dyn PathfindingAlgorithm,
    start: Position,
    target: Position,
) -> (Option<f64>, usize, Duration) {
    let begin = Instant::now();
    let result = algorithm.find_path(start, target);
    let elapsed = begin.elapsed();
    match result {
        Ok(path) => (Some(path.cost), path.nodes_expanded, elapsed),
        Err(_) => (None, 0, elapsed),
    }
}
