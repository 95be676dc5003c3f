//! Errors surfaced by [`TacticsEngine`](super::TacticsEngine).

use crate::config::ConfigError;
use crate::error::{ErrorSeverity, TacticsError};
use crate::scheduler::ScheduleError;
use crate::state::{EntityId, SpawnError};

/// Setup mistakes and consistency violations. Gameplay failures (blocked
/// moves, vanished targets) never show up here; they resolve to WAIT.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("actor {0} does not exist")]
    UnknownActor(EntityId),

    #[error("actor {0} is not player-controlled")]
    NotPlayerControlled(EntityId),

    /// The scheduler handed out a turn for an actor the arena no longer holds.
    #[error("turn entry for actor {0} outlived the actor")]
    OrphanedEntry(EntityId),
}

impl TacticsError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(error) => error.severity(),
            Self::Spawn(error) => error.severity(),
            Self::Schedule(error) => error.severity(),
            Self::UnknownActor(_) | Self::NotPlayerControlled(_) => ErrorSeverity::Validation,
            Self::OrphanedEntry(_) => ErrorSeverity::Internal,
        }
    }
}
