use crate::error::NoPath;
use crate::grid::{Grid, Position};
use crate::terrain::TerrainCost;
use std::f64::consts::SQRT_2;

pub trait PathfindingAlgorithm {
    fn name(&self) -> &'static str;

    /// Finds a lowest-cost path from `start` to `target`, both inclusive.
    fn find_path(&self, start: Position, target: Position) -> Result<Path, NoPath>;
}

/// A found path together with what it cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub cells: Vec<Position>,
    pub cost: f64,
    /// Nodes taken off the frontier while searching.
    pub nodes_expanded: usize,
}

impl Path {
    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Position> {
        self.cells.first().copied()
    }

    pub fn target(&self) -> Option<Position> {
        self.cells.last().copied()
    }
}

/// One of the 8 moves out of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub d_row: isize,
    pub d_col: isize,
    pub cost: f64,
}

impl Move {
    const fn new(d_row: isize, d_col: isize, cost: f64) -> Self {
        Move { d_row, d_col, cost }
    }
}

/// Axis moves cost 1, diagonals cost √2.
pub const MOVES: [Move; 8] = [
    Move::new(-1, 0, 1.0),
    Move::new(1, 0, 1.0),
    Move::new(0, -1, 1.0),
    Move::new(0, 1, 1.0),
    Move::new(-1, -1, SQRT_2),
    Move::new(-1, 1, SQRT_2),
    Move::new(1, -1, SQRT_2),
    Move::new(1, 1, SQRT_2),
];

/// Cost of entering `pos`: infinite outside the grid or on impassable terrain.
pub fn cell_cost<C: TerrainCost + ?Sized>(grid: &Grid, costs: &C, pos: Position) -> f64 {
    match grid.terrain(pos) {
        Some(code) => costs.cost(code),
        None => f64::INFINITY,
    }
}

/// Rejects endpoints that are off the grid or impassable, in that order.
pub fn check_endpoints<C: TerrainCost + ?Sized>(
    grid: &Grid,
    costs: &C,
    start: Position,
    target: Position,
) -> Result<(), NoPath> {
    if !grid.in_bounds(start) {
        return Err(NoPath::StartOutOfBounds(start));
    }
    if !grid.in_bounds(target) {
        return Err(NoPath::TargetOutOfBounds(target));
    }
    if cell_cost(grid, costs, start).is_infinite() {
        return Err(NoPath::StartBlocked(start));
    }
    if cell_cost(grid, costs, target).is_infinite() {
        return Err(NoPath::TargetBlocked(target));
    }
    Ok(())
}

/// Sums move costs along `cells`. `None` if two consecutive cells are not
/// neighbours or a cell cannot be entered.
pub fn path_cost<C: TerrainCost + ?Sized>(
    grid: &Grid,
    costs: &C,
    cells: &[Position],
) -> Option<f64> {
    let mut total = 0.0;
    for pair in cells.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let step = MOVES
            .iter()
            .find(|m| from.offset(m.d_row, m.d_col) == Some(to))?;
        let enter = cell_cost(grid, costs, to);
        if enter.is_infinite() {
            return None;
        }
        total += step.cost * enter;
    }
    Some(total)
}
