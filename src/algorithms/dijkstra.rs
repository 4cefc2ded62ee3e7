use crate::algorithms::common::{self, Path, PathfindingAlgorithm, MOVES};
use crate::error::NoPath;
use crate::grid::{Grid, Position};
use crate::terrain::{TerrainCost, UniformTerrain};
use log::debug;
use pathfinding::prelude::dijkstra;

/// Fixed-point scale for the integer edge weights the `pathfinding` crate
/// needs.
const COST_SCALE: f64 = 1_000_000.0;

/// Uninformed baseline using the `pathfinding` crate, used to check A*.
///
/// Edge weights are rounded to micro-units for the search; the returned
/// `Path::cost` is recomputed exactly from the chosen cells.
pub struct Dijkstra<'g, C = UniformTerrain> {
    grid: &'g Grid,
    costs: C,
}

impl<'g> Dijkstra<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self::with_costs(grid, UniformTerrain)
    }
}

impl<'g, C: TerrainCost> Dijkstra<'g, C> {
    pub fn with_costs(grid: &'g Grid, costs: C) -> Self {
        Dijkstra { grid, costs }
    }

    fn successors(&self, pos: &Position) -> Vec<(Position, u64)> {
        MOVES
            .iter()
            .filter_map(|mv| {
                let next = pos.offset(mv.d_row, mv.d_col)?;
                let enter = common::cell_cost(self.grid, &self.costs, next);
                if enter.is_infinite() {
                    return None;
                }
                Some((next, (mv.cost * enter * COST_SCALE).round() as u64))
            })
            .collect()
    }
}

impl<C: TerrainCost> PathfindingAlgorithm for Dijkstra<'_, C> {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn find_path(&self, start: Position, target: Position) -> Result<Path, NoPath> {
        common::check_endpoints(self.grid, &self.costs, start, target)?;

        let mut nodes_expanded = 0;
        let result = dijkstra(
            &start,
            |pos| {
                nodes_expanded += 1;
                self.successors(pos)
            },
            |pos| *pos == target,
        );

        let Some((cells, _)) = result else {
            debug!("[Dijkstra] no path from {} to {}", start, target);
            return Err(NoPath::Unreachable { start, target });
        };

        let cost = common::path_cost(self.grid, &self.costs, &cells)
            .ok_or(NoPath::Unreachable { start, target })?;

        Ok(Path {
            cells,
            cost,
            nodes_expanded,
        })
    }
}
