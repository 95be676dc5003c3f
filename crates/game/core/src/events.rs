//! Presentation events emitted while turns resolve.
//!
//! The core never renders or narrates. It records what happened and a
//! presentation layer drains the queue, keying sprites or text off
//! [`PresentationEvent::tag`].

use std::fmt;

use crate::state::{EntityId, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PresentationEvent {
    Hit {
        attacker: EntityId,
        defender: EntityId,
        damage: u32,
    },
    Death {
        actor: EntityId,
        /// `None` when the environment did the killing.
        killer: Option<EntityId>,
    },
    LevelUp {
        actor: EntityId,
        level: u32,
    },
    /// An idle actor noticed a hostile and started seeking it.
    Spotted {
        actor: EntityId,
        target: EntityId,
    },
    DoorOpened {
        actor: EntityId,
        position: Position,
    },
    ChestOpened {
        actor: EntityId,
        position: Position,
    },
    ItemCollected {
        actor: EntityId,
        position: Position,
    },
    TrapTriggered {
        actor: EntityId,
        position: Position,
        damage: u32,
    },
    /// A committed path was dropped because its next cell became invalid.
    PathAbandoned {
        actor: EntityId,
    },
}

impl PresentationEvent {
    /// Stable snake_case tag, e.g. `"level_up"`.
    pub fn tag(&self) -> &'static str {
        self.into()
    }

    /// Actor the event is about.
    pub fn subject(&self) -> EntityId {
        match *self {
            Self::Hit { attacker, .. } => attacker,
            Self::Death { actor, .. }
            | Self::LevelUp { actor, .. }
            | Self::Spotted { actor, .. }
            | Self::DoorOpened { actor, .. }
            | Self::ChestOpened { actor, .. }
            | Self::ItemCollected { actor, .. }
            | Self::TrapTriggered { actor, .. }
            | Self::PathAbandoned { actor } => actor,
        }
    }
}

impl fmt::Display for PresentationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit {
                attacker,
                defender,
                damage,
            } => write!(f, "{attacker} hits {defender} for {damage}"),
            Self::Death {
                actor,
                killer: Some(killer),
            } => write!(f, "{actor} is slain by {killer}"),
            Self::Death { actor, killer: None } => write!(f, "{actor} dies"),
            Self::LevelUp { actor, level } => write!(f, "{actor} reaches level {level}"),
            Self::Spotted { actor, target } => write!(f, "{actor} is looking for {target}"),
            Self::DoorOpened { actor, position } => write!(f, "{actor} opens the door at {position}"),
            Self::ChestOpened { actor, position } => {
                write!(f, "{actor} opens the chest at {position}")
            }
            Self::ItemCollected { actor, position } => {
                write!(f, "{actor} picks up an item at {position}")
            }
            Self::TrapTriggered {
                actor,
                position,
                damage,
            } => write!(f, "{actor} triggers a trap at {position} ({damage} damage)"),
            Self::PathAbandoned { actor } => write!(f, "{actor} loses the trail"),
        }
    }
}
