//! Per-tile desire toward a target, consumed as edge cost by pathfinders.
//!
//! Low desire means "close to what I want". The field is a breadth-first flood
//! from the target across cells that are lit and traversable, so an actor only
//! plans through space it can currently see.

use std::collections::VecDeque;

use crate::env::{GridOracle, MapDimensions};
use crate::state::Position;
use crate::vision::LightField;

/// Desire of cells the flood never reached. Also caps the flood depth.
pub const DESIRE_MAX: u32 = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesireField {
    dimensions: MapDimensions,
    target: Option<Position>,
    values: Vec<u32>,
}

impl DesireField {
    /// Field with every cell at [`DESIRE_MAX`].
    pub fn uniform(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            target: None,
            values: vec![DESIRE_MAX; dimensions.area()],
        }
    }

    /// Floods outward from `target`, starting at `seed` and adding 1 per step.
    ///
    /// Only cells lit in `light` and traversable in `grid` are entered; the
    /// target cell itself is always seeded when in bounds.
    pub fn toward<G>(grid: &G, light: &LightField, target: Position, seed: u32) -> Self
    where
        G: GridOracle + ?Sized,
    {
        let mut field = Self::uniform(grid.dimensions());
        let Some(index) = field.dimensions.index(target) else {
            return field;
        };

        field.target = Some(target);
        field.values[index] = seed.min(DESIRE_MAX);

        let mut frontier = VecDeque::from([target]);
        while let Some(cell) = frontier.pop_front() {
            let next = field.value(cell) + 1;
            if next >= DESIRE_MAX {
                continue;
            }

            for neighbor in cell.neighbors() {
                let Some(index) = field.dimensions.index(neighbor) else {
                    continue;
                };
                if field.values[index] <= next
                    || !light.is_lit(neighbor)
                    || !grid.is_traversable(neighbor)
                {
                    continue;
                }
                field.values[index] = next;
                frontier.push_back(neighbor);
            }
        }

        field
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Cell the field was flooded from.
    pub fn target(&self) -> Option<Position> {
        self.target
    }

    /// Desire at `position`; [`DESIRE_MAX`] out of bounds.
    pub fn value(&self, position: Position) -> u32 {
        self.dimensions
            .index(position)
            .map_or(DESIRE_MAX, |index| self.values[index])
    }

    /// Inverse of desire: 0 where the flood never reached, highest at the target.
    pub fn interest(&self, position: Position) -> u32 {
        DESIRE_MAX - self.value(position)
    }

    /// Whether the flood reached `position`.
    pub fn reaches(&self, position: Position) -> bool {
        self.value(position) < DESIRE_MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestGrid;
    use crate::vision::compute_lighting;

    #[test]
    fn flood_counts_king_moves_from_target() {
        let grid = TestGrid::open(9, 9);
        let light = compute_lighting(&grid, 4, 4, 8, 1.0);
        let field = DesireField::toward(&grid, &light, Position::new(4, 4), 0);

        assert_eq!(field.value(Position::new(4, 4)), 0);
        assert_eq!(field.value(Position::new(5, 5)), 1);
        assert_eq!(field.value(Position::new(6, 4)), 2);
        assert_eq!(field.value(Position::new(7, 6)), 3);
        assert_eq!(field.interest(Position::new(4, 4)), DESIRE_MAX);
    }

    #[test]
    fn seed_offsets_every_value() {
        let grid = TestGrid::open(5, 5);
        let light = compute_lighting(&grid, 2, 2, 5, 1.0);
        let field = DesireField::toward(&grid, &light, Position::new(2, 2), 3);
        assert_eq!(field.value(Position::new(2, 2)), 3);
        assert_eq!(field.value(Position::new(3, 2)), 4);
    }

    #[test]
    fn walls_and_darkness_stop_the_flood() {
        let mut grid = TestGrid::open(7, 3);
        for y in 0..3 {
            grid.set_wall(Position::new(3, y));
        }
        let light = compute_lighting(&grid, 1, 1, 6, 1.0);
        let field = DesireField::toward(&grid, &light, Position::new(1, 1), 0);

        assert!(field.reaches(Position::new(2, 1)));
        assert!(!field.reaches(Position::new(3, 1)));
        assert!(!field.reaches(Position::new(5, 1)));
        assert_eq!(field.interest(Position::new(5, 1)), 0);
    }

    #[test]
    fn unlit_cells_are_not_entered() {
        let grid = TestGrid::open(9, 1);
        let light = compute_lighting(&grid, 0, 0, 3, 1.0);
        let field = DesireField::toward(&grid, &light, Position::new(0, 0), 0);

        assert_eq!(field.value(Position::new(2, 0)), 2);
        assert!(!field.reaches(Position::new(3, 0)), "distance 3 is unlit");
    }

    #[test]
    fn flood_depth_is_capped() {
        let grid = TestGrid::open(40, 1);
        let light = compute_lighting(&grid, 0, 0, 40, 1.0);
        let field = DesireField::toward(&grid, &light, Position::new(0, 0), 0);

        assert_eq!(field.value(Position::new(DESIRE_MAX as i32 - 1, 0)), DESIRE_MAX - 1);
        assert_eq!(field.value(Position::new(DESIRE_MAX as i32, 0)), DESIRE_MAX);
    }

    #[test]
    fn out_of_bounds_target_gives_uniform_field() {
        let grid = TestGrid::open(3, 3);
        let light = compute_lighting(&grid, 1, 1, 2, 1.0);
        let field = DesireField::toward(&grid, &light, Position::new(-4, 0), 0);
        assert_eq!(field, DesireField::uniform(grid.dimensions()));
        assert_eq!(field.target(), None);
    }
}
