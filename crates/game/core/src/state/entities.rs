//! Arena storage for actors, indexed by [`EntityId`].
//!
//! Every actor lives in a slot addressed by its id, so typed access to any
//! field is a bounds check and an index. Freed slots are not reused: an id that
//! pointed at a dead actor keeps resolving to `None`, which is how stale
//! references are detected.

use super::{Actor, EntityId, Position};
use crate::config::TacticsConfig;
use crate::error::{ErrorSeverity, TacticsError};

/// Errors raised while inserting actors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("actor arena is full ({capacity} slots)")]
    ArenaFull { capacity: usize },

    #[error("cell {position} is already occupied by {occupant}")]
    Occupied {
        position: Position,
        occupant: EntityId,
    },
}

impl TacticsError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SpawnError::ArenaFull { .. } => ErrorSeverity::Fatal,
            SpawnError::Occupied { .. } => ErrorSeverity::Validation,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActorArena {
    slots: Vec<Option<Actor>>,
}

impl ActorArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next spawned actor will receive.
    pub fn next_id(&self) -> EntityId {
        EntityId(self.slots.len() as u32)
    }

    /// Inserts an actor, assigning it the next free id.
    ///
    /// The actor's own `id` field is overwritten.
    pub fn spawn(&mut self, mut actor: Actor) -> Result<EntityId, SpawnError> {
        if self.slots.len() >= TacticsConfig::MAX_ACTORS {
            return Err(SpawnError::ArenaFull {
                capacity: TacticsConfig::MAX_ACTORS,
            });
        }
        if let Some(occupant) = self.actor_at(actor.position) {
            return Err(SpawnError::Occupied {
                position: actor.position,
                occupant: occupant.id,
            });
        }

        let id = self.next_id();
        actor.id = id;
        self.slots.push(Some(actor));
        Ok(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Actor> {
        self.slots.get(id.index())?.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Removes an actor, returning it. The id is never handed out again.
    pub fn remove(&mut self, id: EntityId) -> Option<Actor> {
        self.slots.get_mut(id.index())?.take()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.slots.iter_mut().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Living actor standing on `position`, if any.
    pub fn actor_at(&self, position: Position) -> Option<&Actor> {
        self.iter()
            .find(|actor| actor.position == position && actor.is_alive())
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.actor_at(position).is_some()
    }

    /// Two distinct actors, mutably. Returns `None` if either is missing or
    /// both ids are the same.
    pub fn pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Actor, &mut Actor)> {
        let (ia, ib) = (a.index(), b.index());
        if ia == ib || ia >= self.slots.len() || ib >= self.slots.len() {
            return None;
        }

        if ia < ib {
            let (left, right) = self.slots.split_at_mut(ib);
            Some((left[ia].as_mut()?, right[0].as_mut()?))
        } else {
            let (left, right) = self.slots.split_at_mut(ia);
            Some((right[0].as_mut()?, left[ib].as_mut()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affinity::Faction;
    use crate::state::ActorStats;

    fn actor_at(x: i32, y: i32) -> Actor {
        Actor::new(
            EntityId(99),
            Faction::Enemy,
            Position::new(x, y),
            ActorStats::default(),
        )
    }

    #[test]
    fn spawn_assigns_sequential_ids() {
        let mut arena = ActorArena::new();
        let a = arena.spawn(actor_at(0, 0)).unwrap();
        let b = arena.spawn(actor_at(1, 0)).unwrap();
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(arena.get(b).unwrap().id, b);
    }

    #[test]
    fn spawn_rejects_occupied_cell() {
        let mut arena = ActorArena::new();
        arena.spawn(actor_at(2, 2)).unwrap();
        let err = arena.spawn(actor_at(2, 2)).unwrap_err();
        assert!(matches!(err, SpawnError::Occupied { .. }));
    }

    #[test]
    fn removed_ids_stay_dead() {
        let mut arena = ActorArena::new();
        let a = arena.spawn(actor_at(0, 0)).unwrap();
        assert!(arena.remove(a).is_some());
        assert!(arena.get(a).is_none());

        let b = arena.spawn(actor_at(0, 0)).unwrap();
        assert_ne!(a, b);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn pair_mut_borrows_both_in_either_order() {
        let mut arena = ActorArena::new();
        let a = arena.spawn(actor_at(0, 0)).unwrap();
        let b = arena.spawn(actor_at(1, 0)).unwrap();

        let (first, second) = arena.pair_mut(b, a).unwrap();
        assert_eq!(first.id, b);
        assert_eq!(second.id, a);
        assert!(arena.pair_mut(a, a).is_none());
    }
}
