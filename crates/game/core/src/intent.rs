//! What an actor wants to do this turn.

use std::fmt;

use crate::state::{EntityId, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum IntentKind {
    Move,
    Attack,
    Interact,
    Wait,
}

/// One turn's intent, produced by the behavior machine or by player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    pub actor: EntityId,
    pub kind: IntentKind,
    /// Cell the intent is aimed at. `None` only for WAIT.
    pub target: Option<Position>,
}

impl Intent {
    pub const fn wait(actor: EntityId) -> Self {
        Self {
            actor,
            kind: IntentKind::Wait,
            target: None,
        }
    }

    pub const fn move_to(actor: EntityId, target: Position) -> Self {
        Self {
            actor,
            kind: IntentKind::Move,
            target: Some(target),
        }
    }

    pub const fn attack(actor: EntityId, target: Position) -> Self {
        Self {
            actor,
            kind: IntentKind::Attack,
            target: Some(target),
        }
    }

    pub const fn interact(actor: EntityId, target: Position) -> Self {
        Self {
            actor,
            kind: IntentKind::Interact,
            target: Some(target),
        }
    }

    #[inline]
    pub fn is_wait(&self) -> bool {
        self.kind == IntentKind::Wait
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some(target) => write!(f, "{} {} {}", self.actor, self.kind, target),
            None => write!(f, "{} {}", self.actor, self.kind),
        }
    }
}
