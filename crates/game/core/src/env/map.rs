use arrayvec::ArrayVec;

use crate::config::TacticsConfig;
use crate::state::Position;

bitflags::bitflags! {
    /// Independent sight and movement properties of a tile or object.
    ///
    /// A cell may block sight yet allow movement (a curtain) or the reverse
    /// (a glass wall); the two bits never imply each other.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        /// Opaque to sight.
        const BLOCKING = 0b01;
        /// Permits movement.
        const TRAVERSABLE = 0b10;
    }
}

impl TileFlags {
    pub const FLOOR: Self = Self::TRAVERSABLE;
    pub const WALL: Self = Self::BLOCKING;

    #[inline]
    pub fn blocks_sight(self) -> bool {
        self.contains(Self::BLOCKING)
    }

    #[inline]
    pub fn is_traversable(self) -> bool {
        self.contains(Self::TRAVERSABLE)
    }
}

/// Closed set of things that can sit on a tile besides actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ObjectKind {
    Wall,
    Door,
    Chest,
    Trap,
    Item,
    Decoration,
}

/// One object stacked on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileObject {
    pub kind: ObjectKind,
    pub flags: TileFlags,
    /// Kind-specific strength: trap damage, for instance.
    pub potency: u32,
}

impl TileObject {
    pub const fn new(kind: ObjectKind, flags: TileFlags) -> Self {
        Self {
            kind,
            flags,
            potency: 0,
        }
    }

    pub const fn closed_door() -> Self {
        Self::new(ObjectKind::Door, TileFlags::BLOCKING)
    }

    pub const fn trap(potency: u32) -> Self {
        Self {
            kind: ObjectKind::Trap,
            flags: TileFlags::TRAVERSABLE,
            potency,
        }
    }
}

/// Objects stacked on a single cell.
pub type ObjectStack = ArrayVec<TileObject, { TacticsConfig::MAX_OBJECTS_PER_TILE }>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as i64) < self.width as i64
            && (position.y as i64) < self.height as i64
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of an in-bounds position.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

/// Read-only view of the terrain and object store.
///
/// Out-of-bounds queries return `None` / an empty stack; the core never
/// clamps coordinates into the grid.
pub trait GridOracle {
    fn dimensions(&self) -> MapDimensions;

    fn tile_at(&self, position: Position) -> Option<TileFlags>;

    fn objects_at(&self, position: Position) -> &[TileObject];

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Whether the terrain or any stacked object is opaque.
    fn blocks_sight(&self, position: Position) -> bool {
        match self.tile_at(position) {
            None => false,
            Some(tile) => {
                tile.blocks_sight()
                    || self
                        .objects_at(position)
                        .iter()
                        .any(|object| object.flags.blocks_sight())
            }
        }
    }

    /// Whether the terrain and every stacked object permit movement.
    fn is_traversable(&self, position: Position) -> bool {
        match self.tile_at(position) {
            None => false,
            Some(tile) => {
                tile.is_traversable()
                    && self
                        .objects_at(position)
                        .iter()
                        .all(|object| object.flags.is_traversable())
            }
        }
    }
}

/// Mutation hooks the engine uses to apply interaction effects.
pub trait GridMut: GridOracle {
    /// Replaces the flags of the first object of `kind` on `position`.
    /// Returns false when no such object exists.
    fn set_object_flags(&mut self, position: Position, kind: ObjectKind, flags: TileFlags)
    -> bool;

    /// Removes the first object of `kind` on `position`, returning it.
    fn take_object(&mut self, position: Position, kind: ObjectKind) -> Option<TileObject>;
}
