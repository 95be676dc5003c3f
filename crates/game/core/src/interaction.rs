//! Collision effects between actors and tile objects.
//!
//! A closed set of object kinds and actor kinds, joined by a lookup table.
//! The engine asks the table what moving into an object does and applies the
//! effect itself, so adding a new behavior is a table entry rather than a new
//! type.

use std::collections::HashMap;

use crate::env::ObjectKind;

/// Which column of the table an actor reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActorKind {
    Player,
    Creature,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InteractionEffect {
    /// Bump and stay put.
    #[default]
    Nothing,
    /// Closed door becomes passable and transparent. The mover stays put.
    OpenDoor,
    /// Container is opened in place.
    OpenContainer,
    /// Object is removed from the grid into the mover's hands.
    Collect,
    /// Object hurts the mover, who still enters the cell.
    Trigger,
}

impl InteractionEffect {
    /// Whether the effect spends the move without entering the cell.
    pub fn holds_mover(self) -> bool {
        matches!(self, Self::OpenDoor | Self::OpenContainer)
    }
}

/// `(actor kind, object kind) -> effect`. Missing pairs resolve to
/// [`InteractionEffect::Nothing`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionTable {
    effects: HashMap<(ActorKind, ObjectKind), InteractionEffect>,
}

impl InteractionTable {
    /// Table with no entries at all.
    pub fn empty() -> Self {
        Self {
            effects: HashMap::new(),
        }
    }

    pub fn effect(&self, actor: ActorKind, object: ObjectKind) -> InteractionEffect {
        self.effects
            .get(&(actor, object))
            .copied()
            .unwrap_or_default()
    }

    /// Sets or replaces one entry.
    pub fn set(&mut self, actor: ActorKind, object: ObjectKind, effect: InteractionEffect) {
        self.effects.insert((actor, object), effect);
    }

    #[must_use]
    pub fn with(mut self, actor: ActorKind, object: ObjectKind, effect: InteractionEffect) -> Self {
        self.set(actor, object, effect);
        self
    }
}

impl Default for InteractionTable {
    fn default() -> Self {
        use ActorKind::{Creature, Player};
        use InteractionEffect::{Collect, OpenContainer, OpenDoor, Trigger};

        Self::empty()
            .with(Player, ObjectKind::Door, OpenDoor)
            .with(Creature, ObjectKind::Door, OpenDoor)
            .with(Player, ObjectKind::Chest, OpenContainer)
            .with(Player, ObjectKind::Item, Collect)
            .with(Player, ObjectKind::Trap, Trigger)
            .with(Creature, ObjectKind::Trap, Trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let table = InteractionTable::default();
        assert_eq!(
            table.effect(ActorKind::Creature, ObjectKind::Door),
            InteractionEffect::OpenDoor
        );
        assert_eq!(
            table.effect(ActorKind::Player, ObjectKind::Item),
            InteractionEffect::Collect
        );
        assert_eq!(
            table.effect(ActorKind::Creature, ObjectKind::Item),
            InteractionEffect::Nothing
        );
        assert_eq!(
            table.effect(ActorKind::Player, ObjectKind::Wall),
            InteractionEffect::Nothing
        );
    }

    #[test]
    fn entries_can_be_overridden() {
        let table = InteractionTable::default().with(
            ActorKind::Creature,
            ObjectKind::Chest,
            InteractionEffect::OpenContainer,
        );
        assert_eq!(
            table.effect(ActorKind::Creature, ObjectKind::Chest),
            InteractionEffect::OpenContainer
        );
    }

    #[test]
    fn only_doors_and_chests_hold_the_mover() {
        assert!(InteractionEffect::OpenDoor.holds_mover());
        assert!(!InteractionEffect::Trigger.holds_mover());
        assert!(!InteractionEffect::Collect.holds_mover());
    }
}
