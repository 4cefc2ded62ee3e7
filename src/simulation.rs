use crate::agent::Agent;
use crate::algorithms::common::PathfindingAlgorithm;
use crate::algorithms::Dijkstra;
use crate::config::Config;
use crate::grid::{Grid, Position};
use crate::statistics::{Statistics, TimingData};
use log::{info, warn};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub algorithm: String,
    pub ticks: usize,
    pub statistics: Vec<Statistics>,
    pub timing_data: TimingData,
}

impl SimulationReport {
    pub fn all_arrived(&self) -> bool {
        self.statistics.iter().all(|s| s.success)
    }
}

/// Several agents plan once towards a shared target, then advance one cell
/// per tick until every one of them is done.
pub struct Simulation<'g> {
    grid: &'g Grid,
    algorithm: Box<dyn PathfindingAlgorithm + 'g>,
    config: Config,
    target: Position,
    agents: Vec<Agent>,
    statistics: Vec<Statistics>,
    timing_data: TimingData,
}

impl<'g> Simulation<'g> {
    /// Places one agent per start cell (ids from 1) and plans every path.
    /// Agents without a path stay where they are for the whole run.
    pub fn new(
        config: Config,
        grid: &'g Grid,
        algorithm: Box<dyn PathfindingAlgorithm + 'g>,
        target: Position,
        starts: &[Position],
    ) -> Self {
        let baseline = Dijkstra::new(grid);
        let mut agents = Vec::with_capacity(starts.len());
        let mut statistics = Vec::with_capacity(starts.len());
        let mut timing_data = TimingData::new();

        for (idx, &start) in starts.iter().enumerate() {
            let mut agent = Agent::new(idx + 1, start);
            let mut stats = Statistics::new(agent.id);

            let find_path_start = Instant::now();
            let planned = agent.set_target(algorithm.as_ref(), target);
            timing_data.record(find_path_start.elapsed());

            match planned {
                Ok(path) => {
                    stats.path_cost = path.cost;
                    stats.nodes_expanded = path.nodes_expanded;
                    stats.optimal_cost = baseline.find_path(start, target).ok().map(|p| p.cost);
                    info!(
                        "Agent {}: planned {} steps from {} to {} (cost {:.3})",
                        agent.id,
                        path.steps(),
                        start,
                        target,
                        path.cost
                    );
                }
                Err(reason) => warn!("Agent {}: {}", agent.id, reason),
            }

            agents.push(agent);
            statistics.push(stats);
        }

        Simulation {
            grid,
            algorithm,
            config,
            target,
            agents,
            statistics,
            timing_data,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn run(&mut self) -> SimulationReport {
        let mut tick = 0;

        if !self.config.no_visualization {
            self.draw(tick);
        }

        while tick < self.config.max_ticks && self.agents.iter().any(|a| !a.is_idle()) {
            for agent in &mut self.agents {
                agent.update();
            }
            tick += 1;

            if !self.config.no_visualization {
                self.draw(tick);
            }
        }

        if self.agents.iter().any(|a| !a.is_idle()) {
            warn!("Stopped after {} ticks with agents still moving", tick);
        }

        for (agent, stats) in self.agents.iter().zip(self.statistics.iter_mut()) {
            stats.total_moves = agent.moves;
            stats.success = agent.has_arrived();
            stats.calculate_efficiency();
        }

        SimulationReport {
            algorithm: self.algorithm.name().to_string(),
            ticks: tick,
            statistics: self.statistics.clone(),
            timing_data: self.timing_data.clone(),
        }
    }

    fn draw(&self, tick: usize) {
        self.clear_screen();
        println!("=== AGENT SIMULATION ===");
        println!(
            "Algorithm: {} | Tick: {} | Target: {}",
            self.algorithm.name(),
            tick,
            self.target
        );
        for agent in &self.agents {
            println!(
                "Agent {} at {} | {} steps left",
                agent.id,
                agent.position,
                agent.path.len()
            );
        }

        let positions: Vec<(usize, Position)> =
            self.agents.iter().map(|a| (a.id, a.position)).collect();
        self.grid.print_grid(&[], &positions, Some(self.target));
        thread::sleep(Duration::from_millis(self.config.delay_ms));
    }

    /// Clear the terminal screen (only used when visualization is enabled)
    fn clear_screen(&self) {
        print!("\x1B[2J\x1B[1;1H");
    }

    pub fn print_report(report: &SimulationReport) {
        println!("\n=== SIMULATION COMPLETE ===");
        println!("Algorithm: {}", report.algorithm);
        println!("Ticks: {}", report.ticks);
        for stats in &report.statistics {
            print!("{}", stats);
        }
        println!(
            "Planning calls: {} | Average find_path time: {:.2?}",
            report.timing_data.total_calls(),
            report.timing_data.average_find_path_time()
        );
    }
}
