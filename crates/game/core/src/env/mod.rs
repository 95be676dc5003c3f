//! Traits describing the world data the core reads but does not own.
//!
//! The grid model, the pathfinder and archetype stat blocks are external
//! collaborators. Oracles expose them so the engine never couples to a
//! concrete store.
mod archetypes;
mod map;
mod pathing;

pub use archetypes::{Archetype, ArchetypeOracle, InitialActorSpec};
pub use map::{
    GridMut, GridOracle, MapDimensions, ObjectKind, ObjectStack, TileFlags, TileObject,
};
pub use pathing::{NoPathFinder, PathFinder};
