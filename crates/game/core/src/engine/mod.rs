//! Turn pipeline tying scheduler, vision, behavior and combat together.
//!
//! One [`TacticsEngine::tick`] pops exactly one due actor, recomputes its
//! light field, asks the behavior machine (or the queued player input) for an
//! intent, resolves it against the grid and the combat rules, and reschedules
//! the actor before returning. Nothing carries over between ticks except actor
//! state and the scheduler queue.

mod error;
mod resolve;
mod tick;

pub use error::EngineError;
pub use tick::{TickOutcome, TurnReport};

use std::collections::HashMap;

use tracing::debug;

use crate::affinity::Faction;
use crate::config::TacticsConfig;
use crate::env::MapDimensions;
use crate::events::PresentationEvent;
use crate::intent::Intent;
use crate::interaction::InteractionTable;
use crate::scheduler::{Clock, ManualClock, TurnScheduler, turn_delay};
use crate::state::{Actor, ActorArena, BehaviorState, EntityId, Tick};
use crate::vision::{ExploredMap, LightField, Shadowcaster};

pub struct TacticsEngine<C: Clock> {
    config: TacticsConfig,
    actors: ActorArena,
    scheduler: TurnScheduler<C>,
    caster: Shadowcaster,
    explored: ExploredMap,
    interactions: InteractionTable,
    pending_input: HashMap<EntityId, Intent>,
    events: Vec<PresentationEvent>,
}

impl<C: Clock> TacticsEngine<C> {
    /// Builds an engine after validating `config`.
    pub fn new(config: TacticsConfig, clock: C) -> Result<Self, EngineError> {
        config.validate()?;
        let scheduler = TurnScheduler::new(clock, config.default_turn_delay);
        Ok(Self {
            config,
            actors: ActorArena::new(),
            scheduler,
            caster: Shadowcaster::new(),
            explored: ExploredMap::new(MapDimensions::new(0, 0)),
            interactions: InteractionTable::default(),
            pending_input: HashMap::new(),
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_interactions(mut self, interactions: InteractionTable) -> Self {
        self.interactions = interactions;
        self
    }

    pub fn config(&self) -> &TacticsConfig {
        &self.config
    }

    pub fn actors(&self) -> &ActorArena {
        &self.actors
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(id)
    }

    pub fn now(&self) -> Tick {
        self.scheduler.now()
    }

    pub fn scheduler(&self) -> &TurnScheduler<C> {
        &self.scheduler
    }

    pub fn clock_mut(&mut self) -> &mut C {
        self.scheduler.clock_mut()
    }

    /// Ticks until the next turn is due, `None` when nobody is scheduled.
    pub fn time_until_next(&mut self) -> Option<u64> {
        self.scheduler.time_until_next()
    }

    /// Light field of the actor that acted last. Fog-of-war for renderers.
    pub fn light_field(&self) -> &LightField {
        self.caster.light()
    }

    /// Cells lit by a player-controlled actor's turn at least once.
    pub fn explored(&self) -> &ExploredMap {
        &self.explored
    }

    /// Takes every presentation event emitted since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, PresentationEvent> {
        self.events.drain(..)
    }

    /// Adds an actor and gives it its first turn after an agility-scaled delay.
    pub fn spawn(&mut self, actor: Actor) -> Result<EntityId, EngineError> {
        let agility = actor.stats.agility;
        let id = self.actors.spawn(actor)?;
        let due = self
            .scheduler
            .schedule(id, turn_delay(agility, self.config.default_turn_delay))?;
        debug!(actor = %id, due = %due, "actor spawned");
        Ok(id)
    }

    /// Removes an actor and its live turn entry.
    pub fn despawn(&mut self, id: EntityId) -> Option<Actor> {
        self.scheduler.cancel(id);
        self.pending_input.remove(&id);
        let actor = self.actors.remove(id)?;
        debug!(actor = %id, "actor removed");
        Some(actor)
    }

    /// Queues the next intent for a player-controlled actor, replacing any
    /// intent not yet consumed.
    pub fn submit_player_intent(&mut self, intent: Intent) -> Result<(), EngineError> {
        let actor = self
            .actors
            .get(intent.actor)
            .ok_or(EngineError::UnknownActor(intent.actor))?;
        if !actor.is_player_controlled() {
            return Err(EngineError::NotPlayerControlled(intent.actor));
        }
        self.pending_input.insert(intent.actor, intent);
        Ok(())
    }

    pub fn has_pending_input(&self, id: EntityId) -> bool {
        self.pending_input.contains_key(&id)
    }

    /// Puts an actor into INACTIVE. Its turn entry stays live and every turn
    /// resolves to WAIT until [`reactivate`](Self::reactivate).
    pub fn suspend(&mut self, id: EntityId) -> Result<(), EngineError> {
        let actor = self
            .actors
            .get_mut(id)
            .ok_or(EngineError::UnknownActor(id))?;
        actor.suspend();
        self.pending_input.remove(&id);
        debug!(actor = %id, "suspended");
        Ok(())
    }

    /// Returns a suspended actor to IDLE with interest reset, back on its spawn
    /// cell. If another actor stands on the spawn cell it stays where it is.
    ///
    /// Actors that are not suspended are left untouched. Returns whether the
    /// actor was reactivated.
    pub fn reactivate(&mut self, id: EntityId) -> Result<bool, EngineError> {
        let actor = self.actors.get(id).ok_or(EngineError::UnknownActor(id))?;
        if actor.behavior != BehaviorState::Inactive {
            return Ok(false);
        }
        let spawn = actor.spawn;
        let spawn_taken = self
            .actors
            .actor_at(spawn)
            .is_some_and(|occupant| occupant.id != id);

        let actor = self
            .actors
            .get_mut(id)
            .ok_or(EngineError::UnknownActor(id))?;
        let position = actor.position;
        actor.reactivate();
        if spawn_taken {
            actor.position = position;
        }
        debug!(actor = %id, position = %actor.position, "reactivated");
        Ok(true)
    }

    /// Retags a NEUTRAL actor, typically after it was attacked. Actors of any
    /// other faction are left alone. Returns whether the faction changed.
    pub fn provoke(&mut self, id: EntityId, faction: Faction) -> Result<bool, EngineError> {
        let actor = self
            .actors
            .get_mut(id)
            .ok_or(EngineError::UnknownActor(id))?;
        if actor.faction != Faction::Neutral || faction == Faction::Neutral {
            return Ok(false);
        }
        actor.faction = faction;
        debug!(actor = %id, faction = %faction, "provoked");
        Ok(true)
    }

    fn remove_dead(&mut self, id: EntityId) {
        self.scheduler.cancel(id);
        self.pending_input.remove(&id);
        self.actors.remove(id);
    }
}

impl TacticsEngine<ManualClock> {
    /// Jumps the manual clock to the earliest due entry. Returns the new now,
    /// or `None` when nothing is scheduled.
    pub fn advance_to_next_due(&mut self) -> Option<Tick> {
        let (_, due) = self.scheduler.peek()?;
        self.scheduler.clock_mut().set(due);
        Some(self.scheduler.now())
    }
}
