//! Terrain code to traversal cost mapping.
//!
//! The search multiplies each move's step cost by the cost of the cell being
//! entered. Costs must be at least 1.0 for the Euclidean heuristic to stay
//! admissible; `f64::INFINITY` marks a cell as impassable.

use crate::error::GridError;
use crate::grid::{Terrain, WALL};
use rustc_hash::FxHashMap;

pub trait TerrainCost {
    /// Cost of entering a cell with the given terrain code.
    fn cost(&self, code: Terrain) -> f64;
}

/// Walls are impassable, every other code costs 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformTerrain;

impl TerrainCost for UniformTerrain {
    fn cost(&self, code: Terrain) -> f64 {
        if code == WALL {
            f64::INFINITY
        } else {
            1.0
        }
    }
}

impl<F> TerrainCost for F
where
    F: Fn(Terrain) -> f64,
{
    fn cost(&self, code: Terrain) -> f64 {
        self(code)
    }
}

/// Explicit per-code costs with a fallback for codes not in the table.
///
/// ```ignore
/// let costs = TerrainTable::new().with_cost(2, 5.0)?; // bushes
/// ```
#[derive(Debug, Clone)]
pub struct TerrainTable {
    costs: FxHashMap<Terrain, f64>,
    default_cost: f64,
}

impl Default for TerrainTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainTable {
    /// Starts from the uniform mapping: `WALL` impassable, everything else 1.
    pub fn new() -> Self {
        let mut costs = FxHashMap::default();
        costs.insert(WALL, f64::INFINITY);
        TerrainTable {
            costs,
            default_cost: 1.0,
        }
    }

    /// Sets the cost of `code`. `WALL` always stays impassable.
    pub fn with_cost(mut self, code: Terrain, cost: f64) -> Result<Self, GridError> {
        if code == WALL {
            return Err(GridError::WallCost(code));
        }
        if cost.is_nan() || cost < 1.0 {
            return Err(GridError::InvalidCost { code, cost });
        }
        self.costs.insert(code, cost);
        Ok(self)
    }

    pub fn impassable(mut self, code: Terrain) -> Self {
        self.costs.insert(code, f64::INFINITY);
        self
    }
}

impl TerrainCost for TerrainTable {
    fn cost(&self, code: Terrain) -> f64 {
        self.costs.get(&code).copied().unwrap_or(self.default_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_costs() {
        assert_eq!(UniformTerrain.cost(0), 1.0);
        assert_eq!(UniformTerrain.cost(7), 1.0);
        assert!(UniformTerrain.cost(WALL).is_infinite());
    }

    #[test]
    fn test_table_overrides() {
        let table = TerrainTable::new()
            .with_cost(2, 5.0)
            .unwrap()
            .impassable(3);
        assert_eq!(table.cost(0), 1.0);
        assert_eq!(table.cost(2), 5.0);
        assert!(table.cost(3).is_infinite());
        assert!(table.cost(WALL).is_infinite());
    }

    #[test]
    fn test_table_rejects_cheap_costs() {
        assert!(matches!(
            TerrainTable::new().with_cost(2, 0.5),
            Err(GridError::InvalidCost { code: 2, .. })
        ));
        assert!(TerrainTable::new().with_cost(2, f64::NAN).is_err());
    }

    #[test]
    fn test_table_keeps_walls_impassable() {
        assert!(matches!(
            TerrainTable::new().with_cost(WALL, 1.0),
            Err(GridError::WallCost(WALL))
        ));
        assert!(TerrainTable::new().with_cost(WALL, 1.0e6).is_err());
    }

    #[test]
    fn test_closure_mapping() {
        let costs = |code: Terrain| if code == 4 { 3.0 } else { 1.0 };
        assert_eq!(costs.cost(4), 3.0);
        assert_eq!(costs.cost(0), 1.0);
    }
}
