//! Data-driven content definitions and loaders.
//!
//! This crate houses authored content and the loaders for its RON/TOML files:
//! - Engine tunables (TOML, [`tactics_core::TacticsConfig`])
//! - Actor archetypes (RON, served through [`ArchetypeCatalog`])
//! - Map layouts: ASCII rows plus a spawn list (RON, [`MapLayout`])
//!
//! Content is consumed by the runtime and never mutated by the engine.

pub mod catalog;
pub mod layout;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ArchetypeCatalog;
pub use layout::MapLayout;

#[cfg(feature = "loaders")]
pub use loaders::{ArchetypeLoader, ConfigLoader, ContentBundle, ContentFactory, LoadResult, MapLoader};
