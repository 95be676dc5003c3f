//! Mutable dungeon grid served through [`tactics_core::GridOracle`].
use std::collections::HashMap;

use tactics_core::{
    ActorArena, Faction, GridMut, GridOracle, MapDimensions, ObjectKind, ObjectStack, Position,
    TileFlags, TileObject,
};
use tactics_content::MapLayout;

use crate::error::{Result, RuntimeError};

/// Trap strength used for `^` cells.
pub const DEFAULT_TRAP_POTENCY: u32 = 4;

/// Tile terrain plus per-cell object stacks.
///
/// Glyphs accepted by [`GridMap::from_rows`]:
///
/// | glyph | cell                 |
/// |-------|----------------------|
/// | `#`   | wall                 |
/// | `.`   | floor                |
/// | `+`   | closed door          |
/// | `'`   | open door            |
/// | `^`   | trap                 |
/// | `$`   | chest                |
/// | `*`   | item                 |
/// | `,`   | decoration (rubble)  |
#[derive(Clone, Debug)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<TileFlags>,
    objects: HashMap<Position, ObjectStack>,
}

impl GridMap {
    /// All-floor map.
    pub fn open(width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        Self {
            dimensions,
            tiles: vec![TileFlags::FLOOR; dimensions.area()],
            objects: HashMap::new(),
        }
    }

    pub fn from_layout(layout: &MapLayout) -> Result<Self> {
        Self::from_rows(&layout.rows)
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let expected = rows.first().map_or(0, |row| row.as_ref().chars().count());
        for (row, line) in rows.iter().enumerate() {
            let found = line.as_ref().chars().count();
            if found != expected {
                return Err(RuntimeError::RaggedMap {
                    row,
                    expected,
                    found,
                });
            }
        }

        let mut grid = Self::open(expected as u32, rows.len() as u32);
        for (y, line) in rows.iter().enumerate() {
            for (x, glyph) in line.as_ref().chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                match glyph {
                    '.' => {}
                    '#' => grid.set_wall(position),
                    '+' => grid.place(position, TileObject::closed_door())?,
                    '\'' => grid.place(
                        position,
                        TileObject::new(ObjectKind::Door, TileFlags::TRAVERSABLE),
                    )?,
                    '^' => grid.place(position, TileObject::trap(DEFAULT_TRAP_POTENCY))?,
                    '$' => grid.place(
                        position,
                        TileObject::new(ObjectKind::Chest, TileFlags::empty()),
                    )?,
                    '*' => grid.place(
                        position,
                        TileObject::new(ObjectKind::Item, TileFlags::TRAVERSABLE),
                    )?,
                    ',' => grid.place(
                        position,
                        TileObject::new(ObjectKind::Decoration, TileFlags::TRAVERSABLE),
                    )?,
                    glyph => return Err(RuntimeError::InvalidGlyph { glyph, position }),
                }
            }
        }
        Ok(grid)
    }

    pub fn set_wall(&mut self, position: Position) {
        if let Some(index) = self.dimensions.index(position) {
            self.tiles[index] = TileFlags::WALL;
        }
    }

    /// Stacks an object on a cell.
    pub fn place(&mut self, position: Position, object: TileObject) -> Result<()> {
        if !self.dimensions.contains(position) {
            return Err(RuntimeError::OutOfBounds(position));
        }
        self.objects
            .entry(position)
            .or_default()
            .try_push(object)
            .map_err(|_| RuntimeError::ObjectStackFull(position))
    }

    /// Top-down view of the map with living actors drawn over it.
    pub fn render(&self, actors: &ActorArena) -> String {
        let mut out = String::with_capacity(self.dimensions.area() + self.dimensions.height as usize);
        for y in 0..self.dimensions.height as i32 {
            for x in 0..self.dimensions.width as i32 {
                let position = Position::new(x, y);
                let glyph = match actors.actor_at(position) {
                    Some(actor) if actor.is_player_controlled() => '@',
                    Some(actor) => match actor.faction {
                        Faction::Player => 'p',
                        Faction::Enemy => 'e',
                        Faction::Neutral => 'n',
                    },
                    None => self.glyph_at(position),
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    fn glyph_at(&self, position: Position) -> char {
        let Some(tile) = self.tile_at(position) else {
            return ' ';
        };
        if !tile.is_traversable() {
            return '#';
        }
        match self.objects_at(position).first() {
            None => '.',
            Some(object) => match object.kind {
                ObjectKind::Door if object.flags.is_traversable() => '\'',
                ObjectKind::Door => '+',
                ObjectKind::Trap => '^',
                ObjectKind::Chest => '$',
                ObjectKind::Item => '*',
                ObjectKind::Decoration => ',',
                ObjectKind::Wall => '#',
            },
        }
    }
}

impl GridOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile_at(&self, position: Position) -> Option<TileFlags> {
        self.dimensions
            .index(position)
            .map(|index| self.tiles[index])
    }

    fn objects_at(&self, position: Position) -> &[TileObject] {
        self.objects
            .get(&position)
            .map(|stack| stack.as_slice())
            .unwrap_or_default()
    }
}

impl GridMut for GridMap {
    fn set_object_flags(&mut self, position: Position, kind: ObjectKind, flags: TileFlags) -> bool {
        let Some(object) = self
            .objects
            .get_mut(&position)
            .and_then(|stack| stack.iter_mut().find(|object| object.kind == kind))
        else {
            return false;
        };
        object.flags = flags;
        true
    }

    fn take_object(&mut self, position: Position, kind: ObjectKind) -> Option<TileObject> {
        let stack = self.objects.get_mut(&position)?;
        let index = stack.iter().position(|object| object.kind == kind)?;
        let object = stack.remove(index);
        if stack.is_empty() {
            self.objects.remove(&position);
        }
        Some(object)
    }
}
