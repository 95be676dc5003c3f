//! Deterministic tactical core for a grid roguelike.
//!
//! `tactics-core` decides what an actor can see, whom it considers hostile,
//! when it acts relative to everyone else and how fights resolve. It owns no
//! map, renderer or input: the grid, the pathfinder and archetype data are
//! reached through the oracle traits in [`env`], and results flow out as
//! [`Intent`]s, [`PresentationEvent`]s and a read-only [`LightField`].
//!
//! [`engine::TacticsEngine`] drives everything one turn at a time on an
//! injected [`scheduler::Clock`], so identical inputs replay identically.
pub mod affinity;
pub mod behavior;
pub mod combat;
pub mod config;
pub mod desire;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod intent;
pub mod interaction;
pub mod scheduler;
pub mod state;
pub mod vision;

#[cfg(test)]
mod test_support;

pub use affinity::{Faction, is_aggressive};
pub use behavior::{Decision, Situation, decide};
pub use combat::{AttackResult, attack, calculate_damage, resolve_attack, xp_for_level, xp_reward};
pub use config::{ConfigError, TacticsConfig};
pub use desire::{DESIRE_MAX, DesireField};
pub use engine::{EngineError, TacticsEngine, TickOutcome, TurnReport};
pub use env::{
    Archetype, ArchetypeOracle, GridMut, GridOracle, InitialActorSpec, MapDimensions,
    NoPathFinder, ObjectKind, ObjectStack, PathFinder, TileFlags, TileObject,
};
pub use error::{ErrorSeverity, TacticsError};
pub use events::PresentationEvent;
pub use intent::{Intent, IntentKind};
pub use interaction::{ActorKind, InteractionEffect, InteractionTable};
pub use scheduler::{Clock, ManualClock, ScheduleError, TurnEntry, TurnScheduler, turn_delay};
pub use state::{
    Actor, ActorArena, ActorStats, BehaviorState, Controller, EntityId, Position, SpawnError, Tick,
};
pub use vision::{ExploredMap, LightField, Shadowcaster, compute_lighting};
