//! Mutable tactical state: ids, coordinates, the logical timeline and actors.

mod actor;
mod common;
mod entities;

pub use actor::{Actor, ActorStats, BehaviorState, Controller};
pub use common::{EntityId, Position, Tick};
pub use entities::{ActorArena, SpawnError};
