use crate::desire::DesireField;
use crate::state::Position;

/// External path search consuming a desire field as edge cost.
pub trait PathFinder {
    /// Ordered cells from (not including) `start` toward `goal`.
    ///
    /// An empty path means no route was found; callers treat that as a normal
    /// outcome, never an error.
    fn find_path(&self, start: Position, goal: Position, cost: &DesireField) -> Vec<Position>;
}

/// Pathfinder that never finds anything. Useful when only desire-field
/// stepping is wanted.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPathFinder;

impl PathFinder for NoPathFinder {
    fn find_path(&self, _start: Position, _goal: Position, _cost: &DesireField) -> Vec<Position> {
        Vec::new()
    }
}
