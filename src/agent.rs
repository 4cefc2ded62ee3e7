use crate::algorithms::common::{Path, PathfindingAlgorithm};
use crate::error::NoPath;
use crate::grid::Position;
use log::info;
use std::collections::VecDeque;

/// A walker that plans once and then follows its path one cell per tick.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: usize,
    pub position: Position,
    pub target: Option<Position>,
    pub path: VecDeque<Position>,
    pub moves: usize,
}

impl Agent {
    pub fn new(id: usize, start: Position) -> Self {
        Agent {
            id,
            position: start,
            target: None,
            path: VecDeque::new(),
            moves: 0,
        }
    }

    /// Plans a path from the current position to `target`.
    ///
    /// The planned path is returned as-is; the queue keeps everything after
    /// the current cell. On failure the queue is left empty.
    pub fn set_target(
        &mut self,
        algorithm: &dyn PathfindingAlgorithm,
        target: Position,
    ) -> Result<Path, NoPath> {
        self.target = Some(target);
        self.path.clear();

        let path = algorithm.find_path(self.position, target)?;
        self.path.extend(path.cells.iter().skip(1).copied());
        Ok(path)
    }

    /// Takes the next step. Returns the new position, or `None` if there is
    /// nothing left to walk.
    pub fn update(&mut self) -> Option<Position> {
        let next = self.path.pop_front()?;
        self.position = next;
        self.moves += 1;

        if self.has_arrived() {
            info!("Agent {}: reached target {}", self.id, next);
        }
        Some(next)
    }

    pub fn has_arrived(&self) -> bool {
        self.path.is_empty() && self.target == Some(self.position)
    }

    pub fn is_idle(&self) -> bool {
        self.path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AStar;
    use crate::grid::Grid;

    #[test]
    fn test_agent_walks_planned_path() {
        let grid = Grid::demo_maze();
        let finder = AStar::new(&grid);
        let mut agent = Agent::new(1, Position::new(9, 0));

        let path = agent.set_target(&finder, Position::new(9, 9)).unwrap();
        assert_eq!(agent.path.len(), path.steps());

        let mut ticks = 0;
        while agent.update().is_some() {
            ticks += 1;
        }
        assert_eq!(ticks, 9);
        assert!(agent.has_arrived());
        assert_eq!(agent.position, Position::new(9, 9));
        assert_eq!(agent.moves, 9);
    }

    #[test]
    fn test_agent_stays_put_without_path() {
        let grid = Grid::demo_maze();
        let finder = AStar::new(&grid);
        let mut agent = Agent::new(2, Position::new(0, 0));

        let err = agent.set_target(&finder, Position::new(1, 1)).unwrap_err();
        assert_eq!(err, NoPath::TargetBlocked(Position::new(1, 1)));
        assert!(agent.is_idle());
        assert_eq!(agent.update(), None);
        assert_eq!(agent.position, Position::new(0, 0));
        assert!(!agent.has_arrived());
    }

    #[test]
    fn test_agent_already_on_target() {
        let grid = Grid::open(3, 3);
        let finder = AStar::new(&grid);
        let mut agent = Agent::new(3, Position::new(1, 1));
        agent.set_target(&finder, Position::new(1, 1)).unwrap();
        assert!(agent.has_arrived());
        assert_eq!(agent.update(), None);
    }
}
