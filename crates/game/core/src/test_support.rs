//! In-memory grid used by unit tests.

use std::collections::HashMap;

use crate::env::{
    GridMut, GridOracle, MapDimensions, ObjectKind, ObjectStack, TileFlags, TileObject,
};
use crate::state::Position;

pub(crate) struct TestGrid {
    dimensions: MapDimensions,
    tiles: Vec<TileFlags>,
    objects: HashMap<Position, ObjectStack>,
}

impl TestGrid {
    /// All-floor grid.
    pub(crate) fn open(width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        Self {
            dimensions,
            tiles: vec![TileFlags::FLOOR; dimensions.area()],
            objects: HashMap::new(),
        }
    }

    pub(crate) fn set_wall(&mut self, position: Position) {
        if let Some(index) = self.dimensions.index(position) {
            self.tiles[index] = TileFlags::WALL;
        }
    }

    pub(crate) fn push_object(&mut self, position: Position, object: TileObject) {
        self.objects.entry(position).or_default().push(object);
    }
}

impl GridOracle for TestGrid {
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

impl GridMut for TestGrid {
    fn set_object_flags(&mut self, position: Position, kind: ObjectKind, flags: TileFlags) -> bool {
        self.objects
            .get_mut(&position)
            .and_then(|stack| stack.iter_mut().find(|object| object.kind == kind))
            .map(|object| object.flags = flags)
            .is_some()
    }

    fn take_object(&mut self, position: Position, kind: ObjectKind) -> Option<TileObject> {
        let stack = self.objects.get_mut(&position)?;
        let index = stack.iter().position(|object| object.kind == kind)?;
        Some(stack.remove(index))
    }
}
