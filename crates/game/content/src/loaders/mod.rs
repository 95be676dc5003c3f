//! Content loaders for reading authored data from files.
//!
//! Each loader turns one RON/TOML file into a core or content type.
//! [`ContentFactory`] loads a whole data directory at once.

pub mod archetypes;
pub mod config;
pub mod factory;
pub mod map;

pub use archetypes::ArchetypeLoader;
pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use map::MapLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
