//! Authored map layout: ASCII rows and the actors placed on them.
//!
//! Glyph meaning is decided by the grid model that consumes the layout; the
//! layout only knows which cells are solid wall (`#`) so spawns can be checked.

use tactics_core::{InitialActorSpec, MapDimensions, Position};

/// Glyph of an impassable wall cell.
pub const WALL_GLYPH: char = '#';

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLayout {
    /// Map rows, top to bottom. Every row has the same number of glyphs.
    pub rows: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spawns: Vec<InitialActorSpec>,
}

impl MapLayout {
    pub fn new(rows: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            spawns: Vec::new(),
        }
    }

    pub fn with_spawn(mut self, spawn: InitialActorSpec) -> Self {
        self.spawns.push(spawn);
        self
    }

    /// Width of the widest row by the number of rows.
    pub fn dimensions(&self) -> MapDimensions {
        let width = self
            .rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        MapDimensions::new(width as u32, self.rows.len() as u32)
    }

    /// Whether every row has the same length.
    pub fn is_rectangular(&self) -> bool {
        let mut widths = self.rows.iter().map(|row| row.chars().count());
        match widths.next() {
            Some(first) => widths.all(|width| width == first),
            None => true,
        }
    }

    pub fn glyph_at(&self, position: Position) -> Option<char> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.rows
            .get(position.y as usize)?
            .chars()
            .nth(position.x as usize)
    }

    /// Cells with their glyphs in row-major order.
    pub fn glyphs(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .map(move |(x, glyph)| (Position::new(x as i32, y as i32), glyph))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::Controller;

    #[test]
    fn reads_glyphs_by_position() {
        let layout = MapLayout::new(["####", "#.+#", "####"]);
        assert_eq!(layout.dimensions(), MapDimensions::new(4, 3));
        assert!(layout.is_rectangular());
        assert_eq!(layout.glyph_at(Position::new(2, 1)), Some('+'));
        assert_eq!(layout.glyph_at(Position::new(4, 1)), None);
        assert_eq!(layout.glyph_at(Position::new(-1, 0)), None);
        assert_eq!(layout.glyphs().filter(|(_, g)| *g == WALL_GLYPH).count(), 10);
    }

    #[test]
    fn ragged_rows_are_detected() {
        let layout = MapLayout::new(["###", "#."]).with_spawn(InitialActorSpec {
            archetype: "hero".into(),
            position: Position::new(1, 1),
            controller: Controller::Player,
        });
        assert!(!layout.is_rectangular());
        assert_eq!(layout.dimensions(), MapDimensions::new(3, 2));
        assert_eq!(layout.spawns.len(), 1);
    }
}
