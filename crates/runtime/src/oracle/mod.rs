//! Concrete implementations of the core oracle traits.
//!
//! [`GridMap`] is the mutable dungeon model the engine reads and edits;
//! [`GreedyPathFinder`] plans committed paths over a desire field.
mod grid;
mod pathfinder;

pub use grid::{DEFAULT_TRAP_POTENCY, GridMap};
pub use pathfinder::GreedyPathFinder;
