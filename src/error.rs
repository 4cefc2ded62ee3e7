use crate::grid::Position;
use std::path::PathBuf;

/// Why `find_path` produced no path.
///
/// None of these are failures in the usual sense: callers are expected to
/// treat a missing path as ordinary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NoPath {
    #[error("start {0} is out of grid bounds")]
    StartOutOfBounds(Position),

    #[error("target {0} is out of grid bounds")]
    TargetOutOfBounds(Position),

    #[error("start position {0} is an obstacle")]
    StartBlocked(Position),

    #[error("target position {0} is an obstacle")]
    TargetBlocked(Position),

    #[error("no path exists from {start} to {target}")]
    Unreachable { start: Position, target: Position },
}

/// Errors raised while building or loading a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: cannot parse cell {token:?}")]
    Parse { line: usize, token: String },

    #[error("terrain cost for code {code} must be at least 1.0, got {cost}")]
    InvalidCost { code: i32, cost: f64 },

    #[error("terrain code {0} marks walls and cannot be given a cost")]
    WallCost(i32),

    #[error("failed to read map {path:?}: {source}")]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
