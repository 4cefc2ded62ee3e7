pub mod a_star;
pub mod common;
pub mod dijkstra;

pub use a_star::AStar;
pub use common::{Path, PathfindingAlgorithm};
pub use dijkstra::Dijkstra;

use crate::grid::Grid;

/// Names accepted by [`by_name`].
pub const ALGORITHM_NAMES: [&str; 2] = ["a_star", "dijkstra"];

/// Builds a solver over `grid` with the default terrain costs.
pub fn by_name<'g>(name: &str, grid: &'g Grid) -> Option<Box<dyn PathfindingAlgorithm + 'g>> {
    match name {
        "a_star" => Some(Box::new(AStar::new(grid))),
        "dijkstra" => Some(Box::new(Dijkstra::new(grid))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        let grid = Grid::open(2, 2);
        for name in ALGORITHM_NAMES {
            assert_eq!(by_name(name, &grid).map(|a| a.name()), Some(name));
        }
        assert!(by_name("greedy", &grid).is_none());
    }
}
