//! Reference [`PathFinder`] walking down the desire field.
use std::collections::HashSet;

use tactics_core::{DESIRE_MAX, DesireField, PathFinder, Position, TacticsConfig};

/// Greedy descent over `desire + distance to goal`.
///
/// From the start it repeatedly steps to the unvisited neighbor with the
/// lowest score, skipping cells the flood never reached and cells marked as
/// obstacles. It stops once the goal is adjacent, when it runs out of
/// candidates, or after `max_steps` cells. The start and goal cells are never
/// part of the result.
#[derive(Clone, Debug)]
pub struct GreedyPathFinder {
    max_steps: usize,
    obstacles: HashSet<Position>,
}

impl GreedyPathFinder {
    pub fn new(max_steps: usize) -> Self {
        Self {
            max_steps,
            obstacles: HashSet::new(),
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Replaces the set of cells the search must route around, typically the
    /// cells other actors stand on.
    pub fn set_obstacles(&mut self, cells: impl IntoIterator<Item = Position>) {
        self.obstacles.clear();
        self.obstacles.extend(cells);
    }

    fn score(cost: &DesireField, cell: Position, goal: Position) -> f64 {
        f64::from(cost.value(cell)) + cell.euclidean(goal)
    }
}

impl Default for GreedyPathFinder {
    fn default() -> Self {
        Self::new(TacticsConfig::DEFAULT_MAX_PATH_LEN)
    }
}

impl PathFinder for GreedyPathFinder {
    fn find_path(&self, start: Position, goal: Position, cost: &DesireField) -> Vec<Position> {
        let mut path = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut current = start;

        while path.len() < self.max_steps && !current.is_adjacent(goal) {
            let next = current
                .neighbors()
                .filter(|cell| *cell != goal && !visited.contains(cell))
                .filter(|cell| !self.obstacles.contains(cell))
                .filter(|cell| cost.value(*cell) < DESIRE_MAX)
                .min_by(|a, b| Self::score(cost, *a, goal).total_cmp(&Self::score(cost, *b, goal)));

            let Some(next) = next else {
                break;
            };
            visited.insert(next);
            path.push(next);
            current = next;
        }

        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{GridOracle, compute_lighting};

    use crate::oracle::GridMap;

    /// Flood toward `goal` with every cell of the map treated as lit.
    fn field(grid: &GridMap, goal: Position) -> DesireField {
        let dimensions = grid.dimensions();
        let open = GridMap::open(dimensions.width, dimensions.height);
        let light = compute_lighting(
            &open,
            dimensions.width as i32 / 2,
            dimensions.height as i32 / 2,
            32,
            1.0,
        );
        DesireField::toward(grid, &light, goal, 0)
    }

    #[test]
    fn walks_around_a_pillar() {
        let grid = GridMap::from_rows(&[
            "#######",
            "#.....#",
            "#..#..#",
            "#.....#",
            "#######",
        ])
        .expect("valid map");
        let start = Position::new(1, 2);
        let goal = Position::new(5, 2);

        let path = GreedyPathFinder::default().find_path(start, goal, &field(&grid, goal));

        assert!(!path.is_empty());
        assert!(!path.contains(&start));
        assert!(!path.contains(&goal));
        assert!(path.iter().all(|cell| grid.is_traversable(*cell)));
        assert!(path[0].is_adjacent(start));
        assert!(path.windows(2).all(|pair| pair[0].is_adjacent(pair[1])));
        assert!(path.last().is_some_and(|cell| cell.is_adjacent(goal)));
    }

    #[test]
    fn routes_around_obstacles() {
        let grid = GridMap::open(5, 3);
        let start = Position::new(0, 1);
        let goal = Position::new(4, 1);
        let mut finder = GreedyPathFinder::default();
        finder.set_obstacles([Position::new(1, 1)]);

        let path = finder.find_path(start, goal, &field(&grid, goal));
        assert!(!path.contains(&Position::new(1, 1)));
        assert!(path.last().is_some_and(|cell| cell.is_adjacent(goal)));
    }

    #[test]
    fn adjacent_goal_needs_no_path() {
        let grid = GridMap::open(3, 3);
        let goal = Position::new(1, 1);
        let path =
            GreedyPathFinder::default().find_path(Position::new(0, 0), goal, &field(&grid, goal));
        assert!(path.is_empty());
    }

    #[test]
    fn unreachable_cells_are_never_entered() {
        let grid = GridMap::open(5, 3);
        let goal = Position::new(4, 1);
        let path = GreedyPathFinder::new(8).find_path(
            Position::new(0, 1),
            goal,
            &DesireField::uniform(grid.dimensions()),
        );
        assert!(path.is_empty());
    }

    #[test]
    fn respects_step_budget() {
        let grid = GridMap::open(12, 1);
        let goal = Position::new(11, 0);
        let path = GreedyPathFinder::new(3).find_path(Position::new(0, 0), goal, &field(&grid, goal));
        assert_eq!(path.len(), 3);
    }
}
