//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use tactics_core::TacticsConfig;

use crate::catalog::ArchetypeCatalog;
use crate::layout::MapLayout;
use crate::loaders::{ArchetypeLoader, ConfigLoader, LoadResult, MapLoader};

/// Everything a session needs to start.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub config: TacticsConfig,
    pub archetypes: ArchetypeCatalog,
    pub map: MapLayout,
}

/// Content factory that loads all content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional, defaults when absent)
/// ├── archetypes.ron
/// └── maps/
///     └── arena.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`, or the defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<TacticsConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(TacticsConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the archetype catalog from `archetypes.ron`.
    pub fn load_archetypes(&self) -> LoadResult<ArchetypeCatalog> {
        let path = self.data_dir.join("archetypes.ron");
        ArchetypeLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<MapLayout> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Loads config, archetypes and the named map, and checks that every
    /// spawn names a known archetype.
    pub fn load_bundle(&self, map_name: &str) -> LoadResult<ContentBundle> {
        let config = self.load_config()?;
        let archetypes = self.load_archetypes()?;
        let map = self.load_map(map_name)?;

        for spawn in &map.spawns {
            anyhow::ensure!(
                archetypes.contains(&spawn.archetype),
                "map '{}' spawns unknown archetype '{}'",
                map_name,
                spawn.archetype
            );
        }

        Ok(ContentBundle {
            config,
            archetypes,
            map,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
