use crate::algorithms::common::{self, Move, Path, PathfindingAlgorithm, MOVES};
use crate::error::NoPath;
use crate::grid::{Grid, Position};
use crate::terrain::{TerrainCost, UniformTerrain};
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Frontier entry. The heap is a max-heap, so `Ord` is reversed to pop the
/// smallest `(f, g, row, col)` first.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    f: f64,
    g: f64,
    pos: Position,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

/// A* over an 8-connected grid with a Euclidean heuristic.
///
/// The finder only borrows the grid and keeps no search state between calls,
/// so one instance can serve any number of queries.
pub struct AStar<'g, C = UniformTerrain> {
    grid: &'g Grid,
    costs: C,
    moves: [Move; 8],
}

impl<'g> AStar<'g> {
    /// Creates a finder where walls are impassable and every other cell
    /// costs 1.
    pub fn new(grid: &'g Grid) -> Self {
        Self::with_costs(grid, UniformTerrain)
    }
}

impl<'g, C: TerrainCost> AStar<'g, C> {
    /// Creates a finder with a custom terrain cost mapping. Every finite cost
    /// must be at least 1.0, otherwise the heuristic may overestimate and the
    /// returned path is no longer guaranteed to be optimal.
    pub fn with_costs(grid: &'g Grid, costs: C) -> Self {
        AStar {
            grid,
            costs,
            moves: MOVES,
        }
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        self.grid.in_bounds(pos)
    }

    /// Cost of entering `pos`; infinite when out of bounds or impassable.
    pub fn cell_cost(&self, pos: Position) -> f64 {
        common::cell_cost(self.grid, &self.costs, pos)
    }

    /// Euclidean distance between two cells.
    pub fn heuristic(from: Position, to: Position) -> f64 {
        let dr = from.row.abs_diff(to.row) as f64;
        let dc = from.col.abs_diff(to.col) as f64;
        (dr * dr + dc * dc).sqrt()
    }

    /// Finds a lowest-cost path from `start` to `target`.
    ///
    /// Returns both endpoints in the path. If `start == target` the path is
    /// the single start cell with cost 0.
    pub fn find_path(&self, start: Position, target: Position) -> Result<Path, NoPath> {
        trace!("[AStar] find_path: start={} target={}", start, target);

        if let Err(reason) = common::check_endpoints(self.grid, &self.costs, start, target) {
            debug!("[AStar] rejected query: {}", reason);
            return Err(reason);
        }

        let mut frontier = BinaryHeap::new();
        let mut came_from: FxHashMap<Position, Position> = FxHashMap::default();
        let mut g_scores: FxHashMap<Position, f64> = FxHashMap::default();
        let mut closed: FxHashSet<Position> = FxHashSet::default();

        g_scores.insert(start, 0.0);
        frontier.push(FrontierEntry {
            f: Self::heuristic(start, target),
            g: 0.0,
            pos: start,
        });

        let mut nodes_expanded = 0;

        while let Some(FrontierEntry { pos: current, .. }) = frontier.pop() {
            // Stale entry left behind by a later, cheaper push.
            if !closed.insert(current) {
                continue;
            }
            nodes_expanded += 1;

            let current_g = g_scores.get(&current).copied().unwrap_or(f64::INFINITY);

            if current == target {
                let cells = reconstruct_path(&came_from, start, target);
                debug!(
                    "[AStar] found path: {} cells, cost {:.3}, {} nodes expanded",
                    cells.len(),
                    current_g,
                    nodes_expanded
                );
                return Ok(Path {
                    cells,
                    cost: current_g,
                    nodes_expanded,
                });
            }

            for mv in &self.moves {
                let Some(neighbor) = current.offset(mv.d_row, mv.d_col) else {
                    continue;
                };
                let enter_cost = self.cell_cost(neighbor);
                if enter_cost.is_infinite() {
                    continue;
                }

                let tentative_g = current_g + mv.cost * enter_cost;
                let known_g = g_scores.get(&neighbor).copied().unwrap_or(f64::INFINITY);
                if tentative_g < known_g {
                    came_from.insert(neighbor, current);
                    g_scores.insert(neighbor, tentative_g);
                    frontier.push(FrontierEntry {
                        f: tentative_g + Self::heuristic(neighbor, target),
                        g: tentative_g,
                        pos: neighbor,
                    });
                }
            }
        }

        debug!(
            "[AStar] no path from {} to {} after {} nodes",
            start, target, nodes_expanded
        );
        Err(NoPath::Unreachable { start, target })
    }
}

impl<C: TerrainCost> PathfindingAlgorithm for AStar<'_, C> {
    fn name(&self) -> &'static str {
        "a_star"
    }

    fn find_path(&self, start: Position, target: Position) -> Result<Path, NoPath> {
        AStar::find_path(self, start, target)
    }
}

fn reconstruct_path(
    came_from: &FxHashMap<Position, Position>,
    start: Position,
    target: Position,
) -> Vec<Position> {
    let mut cells = vec![target];
    let mut current = target;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                cells.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    cells.reverse();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainTable;
    use std::f64::consts::SQRT_2;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_demo_maze_corner_to_corner() {
        let grid = Grid::demo_maze();
        let finder = AStar::new(&grid);

        let path = finder.find_path(p(0, 0), p(9, 9)).unwrap();

        assert_eq!(path.start(), Some(p(0, 0)));
        assert_eq!(path.target(), Some(p(9, 9)));
        assert_eq!(path.cells.len(), 14);
        assert_close(path.cost, 8.0 + 5.0 * SQRT_2);
        assert!(path.cells.iter().all(|&c| !grid.is_wall(c)));
        assert!(path.cells.windows(2).all(|w| w[0].is_adjacent(&w[1])));
    }

    #[test]
    fn test_target_is_obstacle() {
        let grid = Grid::demo_maze();
        let finder = AStar::new(&grid);
        assert_eq!(
            finder.find_path(p(0, 0), p(1, 1)),
            Err(NoPath::TargetBlocked(p(1, 1)))
        );
    }

    #[test]
    fn test_start_is_obstacle() {
        let grid = Grid::demo_maze();
        let finder = AStar::new(&grid);
        assert_eq!(
            finder.find_path(p(1, 1), p(9, 9)),
            Err(NoPath::StartBlocked(p(1, 1)))
        );
    }

    #[test]
    fn test_start_equals_target() {
        let grid = Grid::demo_maze();
        let finder = AStar::new(&grid);
        let path = finder.find_path(p(0, 0), p(0, 0)).unwrap();
        assert_eq!(path.cells, vec![p(0, 0)]);
        assert_eq!(path.cost, 0.0);
        assert_eq!(path.steps(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::demo_maze();
        let finder = AStar::new(&grid);
        assert_eq!(
            finder.find_path(p(10, 0), p(9, 9)),
            Err(NoPath::StartOutOfBounds(p(10, 0)))
        );
        assert_eq!(
            finder.find_path(p(0, 0), p(0, 42)),
            Err(NoPath::TargetOutOfBounds(p(0, 42)))
        );
    }

    #[test]
    fn test_walled_in_target_is_unreachable() {
        let grid = Grid::parse(
            ".....\n\
             .###.\n\
             .#.#.\n\
             .###.\n\
             .....",
        )
        .unwrap();
        let finder = AStar::new(&grid);
        assert_eq!(
            finder.find_path(p(0, 0), p(2, 2)),
            Err(NoPath::Unreachable {
                start: p(0, 0),
                target: p(2, 2)
            })
        );
    }

    #[test]
    fn test_diagonal_slips_between_corner_walls() {
        let grid = Grid::parse(".#\n#.").unwrap();
        let finder = AStar::new(&grid);
        let path = finder.find_path(p(0, 0), p(1, 1)).unwrap();
        assert_eq!(path.cells, vec![p(0, 0), p(1, 1)]);
        assert_close(path.cost, SQRT_2);
    }

    #[test]
    fn test_open_grid_prefers_diagonals() {
        let grid = Grid::open(6, 6);
        let finder = AStar::new(&grid);
        let path = finder.find_path(p(0, 0), p(5, 5)).unwrap();
        assert_eq!(path.steps(), 5);
        assert_close(path.cost, 5.0 * SQRT_2);
    }

    #[test]
    fn test_weighted_terrain_is_avoided() {
        // A band of expensive terrain (code 2) with a gap at the right edge.
        let grid = Grid::parse(
            ".....\n\
             22220\n\
             .....",
        )
        .unwrap();

        let uniform = AStar::new(&grid).find_path(p(0, 0), p(2, 0)).unwrap();
        assert_eq!(uniform.steps(), 2);

        let costs = TerrainTable::new().with_cost(2, 10.0).unwrap();
        let finder = AStar::with_costs(&grid, costs);
        let path = finder.find_path(p(0, 0), p(2, 0)).unwrap();
        assert!(path.cells.contains(&p(1, 4)));
        assert!(path.cells.iter().all(|c| grid.terrain(*c) != Some(2)));
    }

    #[test]
    fn test_heuristic_is_straight_line_distance() {
        assert_close(AStar::<UniformTerrain>::heuristic(p(0, 0), p(3, 4)), 5.0);
        assert_close(AStar::<UniformTerrain>::heuristic(p(3, 4), p(0, 0)), 5.0);
        assert_close(AStar::<UniformTerrain>::heuristic(p(2, 2), p(5, 5)), 3.0 * SQRT_2);
        assert_close(AStar::<UniformTerrain>::heuristic(p(7, 1), p(7, 1)), 0.0);
    }

    #[test]
    fn test_wall_code_cannot_be_made_walkable() {
        let grid = Grid::parse("...\n.1.\n...").unwrap();
        assert!(TerrainTable::new().with_cost(1, 1.0).is_err());

        let costs = TerrainTable::new().with_cost(2, 4.0).unwrap();
        let finder = AStar::with_costs(&grid, costs);
        assert_eq!(
            finder.find_path(p(1, 1), p(0, 0)),
            Err(NoPath::StartBlocked(p(1, 1)))
        );
        let path = finder.find_path(p(0, 0), p(2, 2)).unwrap();
        assert!(!path.cells.contains(&p(1, 1)));
    }

    #[test]
    fn test_cell_cost_and_validity() {
        let grid = Grid::demo_maze();
        let finder = AStar::new(&grid);
        assert!(finder.is_valid(p(9, 9)));
        assert!(!finder.is_valid(p(9, 10)));
        assert_eq!(finder.cell_cost(p(0, 0)), 1.0);
        assert!(finder.cell_cost(p(1, 1)).is_infinite());
        assert!(finder.cell_cost(p(30, 30)).is_infinite());
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let grid = Grid::demo_maze();
        let finder = AStar::new(&grid);
        let first = finder.find_path(p(8, 2), p(2, 2)).unwrap();
        let second = finder.find_path(p(8, 2), p(2, 2)).unwrap();
        assert_eq!(first, second);
        assert_close(first.cost, 4.0 + 4.0 * SQRT_2);
    }

    #[test]
    fn test_frontier_order_breaks_ties_on_g_then_position() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry { f: 2.0, g: 1.0, pos: p(0, 1) });
        heap.push(FrontierEntry { f: 2.0, g: 0.5, pos: p(3, 3) });
        heap.push(FrontierEntry { f: 2.0, g: 1.0, pos: p(0, 0) });
        heap.push(FrontierEntry { f: 1.0, g: 1.0, pos: p(5, 5) });

        let order: Vec<Position> = std::iter::from_fn(|| heap.pop().map(|e| e.pos)).collect();
        assert_eq!(order, vec![p(5, 5), p(3, 3), p(0, 0), p(0, 1)]);
    }
}
