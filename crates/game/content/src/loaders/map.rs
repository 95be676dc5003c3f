//! Map layout loader.
//!
//! Loads ASCII rows and the spawn list from map RON files.
//!
//! ```ron
//! (
//!     rows: [
//!         "#####",
//!         "#..+#",
//!         "#####",
//!     ],
//!     spawns: [
//!         (archetype: "hero", position: (x: 1, y: 1), controller: Player),
//!     ],
//! )
//! ```

use std::collections::HashSet;
use std::path::Path;

use crate::layout::{MapLayout, WALL_GLYPH};
use crate::loaders::{LoadResult, read_file};

/// Loader for map layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<MapLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid map {}: {}", path.display(), e))
    }

    /// Parses and checks a layout: rows must be non-empty and rectangular,
    /// and every spawn must sit on a distinct non-wall cell inside the map.
    pub fn parse(content: &str) -> LoadResult<MapLayout> {
        let layout: MapLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        anyhow::ensure!(!layout.rows.is_empty(), "map has no rows");
        anyhow::ensure!(layout.is_rectangular(), "map rows differ in length");

        let mut taken = HashSet::new();
        for spawn in &layout.spawns {
            match layout.glyph_at(spawn.position) {
                None => anyhow::bail!(
                    "spawn '{}' at {} is outside the map",
                    spawn.archetype,
                    spawn.position
                ),
                Some(WALL_GLYPH) => anyhow::bail!(
                    "spawn '{}' at {} is inside a wall",
                    spawn.archetype,
                    spawn.position
                ),
                Some(_) => {}
            }
            anyhow::ensure!(
                taken.insert(spawn.position),
                "two spawns share cell {}",
                spawn.position
            );
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{Controller, MapDimensions, Position};

    const ARENA: &str = "(
        rows: [
            \"#####\",
            \"#..+#\",
            \"#####\",
        ],
        spawns: [
            (archetype: \"hero\", position: (x: 1, y: 1), controller: Player),
            (archetype: \"orc\", position: (x: 2, y: 1)),
        ],
    )";

    #[test]
    fn parses_rows_and_spawns() {
        let layout = MapLoader::parse(ARENA).expect("valid map");
        assert_eq!(layout.dimensions(), MapDimensions::new(5, 3));
        assert_eq!(layout.spawns.len(), 2);
        assert_eq!(layout.spawns[0].controller, Controller::Player);
        assert_eq!(layout.spawns[1].controller, Controller::Ai);
        assert_eq!(layout.spawns[1].position, Position::new(2, 1));
    }

    #[test]
    fn rejects_spawn_in_wall() {
        let err = MapLoader::parse(
            "(rows: [\"###\", \"#.#\", \"###\"], \
             spawns: [(archetype: \"orc\", position: (x: 0, y: 0))])",
        )
        .unwrap_err();
        assert!(err.to_string().contains("inside a wall"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = MapLoader::parse("(rows: [\"###\", \"#.\"])").unwrap_err();
        assert!(err.to_string().contains("differ in length"));
    }
}
