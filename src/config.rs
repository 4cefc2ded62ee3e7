use crate::grid::Position;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "A* pathfinding on 8-connected grids", long_about = None)]
pub struct Config {
    /// Map file to load instead of the built-in maze
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Generate a random square grid of this size instead of the built-in maze
    #[arg(long)]
    pub grid_size: Option<usize>,

    #[arg(long, default_value_t = 20)]
    pub num_walls: usize,

    /// Seed for random grids
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell as ROW,COL
    #[arg(long)]
    pub start: Option<Position>,

    /// Target cell as ROW,COL
    #[arg(long)]
    pub target: Option<Position>,

    /// Agent start cell as ROW,COL; repeat to add more agents
    #[arg(long = "agent")]
    pub agents: Vec<Position>,

    /// a_star, dijkstra or all
    #[arg(long, default_value = "a_star")]
    pub algorithm: String,

    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = 500)]
    pub max_ticks: usize,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    #[arg(long, default_value_t = false)]
    pub batch_mode: bool,

    #[arg(long, default_value_t = 10)]
    pub num_simulations: usize,

    #[arg(long, default_value_t = 0)]
    pub min_walls: usize,

    #[arg(long, default_value_t = 100)]
    pub max_walls: usize,

    /// Wall count increment between batch configurations
    #[arg(long, default_value_t = 10)]
    pub wall_step: usize,

    #[arg(long, default_value_t = 300)]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "batch_results.csv")]
    pub output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["grid_astar"])
    }
}
