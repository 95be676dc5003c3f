//! Light intensity grid and explored-cell memory.

use crate::env::MapDimensions;
use crate::state::Position;

/// Dense grid of light intensities produced by one visibility query.
///
/// Values lie in `[0, darkness_factor]`. Out-of-bounds reads return 0.
#[derive(Clone, Debug, PartialEq)]
pub struct LightField {
    dimensions: MapDimensions,
    values: Vec<f64>,
}

impl LightField {
    /// Fully dark field covering `dimensions`.
    pub fn dark(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            values: vec![0.0; dimensions.area()],
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn get(&self, position: Position) -> f64 {
        self.dimensions
            .index(position)
            .map_or(0.0, |index| self.values[index])
    }

    #[inline]
    pub fn is_lit(&self, position: Position) -> bool {
        self.get(position) > 0.0
    }

    /// Every lit cell with its intensity, row-major.
    pub fn lit_cells(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        let width = self.dimensions.width.max(1) as usize;
        self.values
            .iter()
            .enumerate()
            .filter(|(_, value)| **value > 0.0)
            .map(move |(index, value)| {
                let position = Position::new((index % width) as i32, (index / width) as i32);
                (position, *value)
            })
    }

    /// Clears every cell, resizing when the grid changed shape.
    pub(crate) fn reset(&mut self, dimensions: MapDimensions) {
        if self.dimensions != dimensions {
            self.dimensions = dimensions;
            self.values = vec![0.0; dimensions.area()];
        } else {
            self.values.fill(0.0);
        }
    }

    pub(crate) fn set(&mut self, position: Position, value: f64) {
        if let Some(index) = self.dimensions.index(position) {
            self.values[index] = value;
        }
    }
}

/// Cells that have been within a light radius at least once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExploredMap {
    dimensions: MapDimensions,
    cells: Vec<bool>,
}

impl ExploredMap {
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            cells: vec![false; dimensions.area()],
        }
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.dimensions
            .index(position)
            .is_some_and(|index| self.cells[index])
    }

    pub fn explored_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Marks every cell lit in `light`. Memory starts over when the grid
    /// changed shape.
    pub fn record(&mut self, light: &LightField) {
        if self.dimensions != light.dimensions() {
            *self = Self::new(light.dimensions());
        }
        for (position, _) in light.lit_cells() {
            if let Some(index) = self.dimensions.index(position) {
                self.cells[index] = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_lit_cells() {
        let dimensions = MapDimensions::new(6, 1);
        let mut first = LightField::dark(dimensions);
        first.set(Position::new(0, 0), 1.0);
        let mut second = LightField::dark(dimensions);
        second.set(Position::new(5, 0), 0.5);

        let mut explored = ExploredMap::new(MapDimensions::new(0, 0));
        explored.record(&first);
        explored.record(&second);

        assert!(explored.is_explored(Position::new(0, 0)));
        assert!(explored.is_explored(Position::new(5, 0)));
        assert!(!explored.is_explored(Position::new(3, 0)));
        assert_eq!(explored.explored_count(), 2);
    }

    #[test]
    fn record_resets_on_new_dimensions() {
        let mut light = LightField::dark(MapDimensions::new(3, 3));
        light.set(Position::new(1, 1), 1.0);
        let mut explored = ExploredMap::new(MapDimensions::new(0, 0));
        explored.record(&light);

        explored.record(&LightField::dark(MapDimensions::new(4, 4)));
        assert_eq!(explored.explored_count(), 0);
    }
}
