//! A* pathfinding on 8-connected occupancy grids.
//!
//! [`AStar`] finds a lowest-cost path between two cells of a [`Grid`], moving
//! in 8 directions with diagonal steps costing √2. Queries that cannot
//! produce a path return a [`NoPath`] reason instead of an error.
//!
//! ```
//! use grid_astar::{AStar, Grid, NoPath, Position};
//!
//! let grid = Grid::demo_maze();
//! let finder = AStar::new(&grid);
//!
//! let path = finder.find_path(Position::new(0, 0), Position::new(9, 9)).unwrap();
//! assert_eq!(path.cells.first(), Some(&Position::new(0, 0)));
//!
//! let blocked = finder.find_path(Position::new(0, 0), Position::new(1, 1));
//! assert_eq!(blocked, Err(NoPath::TargetBlocked(Position::new(1, 1))));
//! ```

pub mod agent;
pub mod algorithms;
pub mod batch_simulation;
pub mod config;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod statistics;
pub mod terrain;

pub use algorithms::{AStar, Dijkstra, Path, PathfindingAlgorithm};
pub use error::{GridError, NoPath};
pub use grid::{Grid, Position};
pub use terrain::{TerrainCost, TerrainTable, UniformTerrain};
