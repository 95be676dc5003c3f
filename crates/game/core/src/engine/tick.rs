use tracing::{debug, warn};

use super::resolve::Resolution;
use super::{EngineError, TacticsEngine};
use crate::behavior::{self, Situation};
use crate::env::{GridMut, PathFinder};
use crate::events::PresentationEvent;
use crate::intent::{Intent, IntentKind};
use crate::scheduler::{Clock, ScheduleError, turn_delay};
use crate::state::{BehaviorState, EntityId, Position, Tick};

/// What one call to [`TacticsEngine::tick`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Nobody is scheduled.
    Idle,
    /// The earliest turn is still `remaining` ticks away.
    NotDue { remaining: u64 },
    /// A player-controlled actor is due and has no queued intent. Its entry
    /// stays at the head of the queue.
    AwaitingInput(EntityId),
    Acted(TurnReport),
}

/// Summary of one resolved turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub actor: EntityId,
    /// Due time of the turn that was consumed.
    pub at: Tick,
    /// Intent the actor asked for.
    pub intent: Intent,
    /// What actually happened after validation; WAIT when the intent went stale.
    pub performed: IntentKind,
    pub destination: Option<Position>,
    pub collision: Option<EntityId>,
    /// Due time of the replacement entry, `None` when the actor died.
    pub next_due: Option<Tick>,
    /// Actors removed this turn, the acting actor included if it died.
    pub deaths: Vec<EntityId>,
}

impl<C: Clock> TacticsEngine<C> {
    /// Runs the earliest due turn, if any.
    ///
    /// Never blocks. When the head of the queue is not due yet the remaining
    /// time is reported and nothing changes.
    pub fn tick<G, P>(&mut self, grid: &mut G, pathfinder: &P) -> Result<TickOutcome, EngineError>
    where
        G: GridMut + ?Sized,
        P: PathFinder + ?Sized,
    {
        let Some((id, due)) = self.scheduler.peek() else {
            return Ok(TickOutcome::Idle);
        };
        let now = self.scheduler.now();
        if due > now {
            return Ok(TickOutcome::NotDue {
                remaining: now.until(due),
            });
        }

        let Some(actor) = self.actors.get(id) else {
            warn!(actor = %id, "dropping turn entry of missing actor");
            self.scheduler.cancel(id);
            return Err(EngineError::OrphanedEntry(id));
        };

        let suspended = actor.behavior == BehaviorState::Inactive;
        if actor.is_player_controlled() && !suspended && !self.pending_input.contains_key(&id) {
            return Ok(TickOutcome::AwaitingInput(id));
        }

        let mut entry = self
            .scheduler
            .next()
            .ok_or(ScheduleError::NotScheduled(id))?;

        let light = self.caster.compute(
            &*grid,
            actor.position,
            actor.perception_radius,
            self.config.darkness_factor,
        );
        if actor.is_player_controlled() {
            self.explored.record(light);
        }

        let intent = if suspended {
            Intent::wait(id)
        } else if actor.is_player_controlled() {
            self.pending_input
                .remove(&id)
                .unwrap_or(Intent::wait(id))
        } else {
            let situation = Situation {
                grid: &*grid,
                actors: &self.actors,
                light,
                config: &self.config,
            };
            let decision = behavior::decide(actor, &situation, pathfinder);

            if let Some(target) = decision.spotted {
                self.events
                    .push(PresentationEvent::Spotted { actor: id, target });
            }
            if decision.abandoned_path {
                self.events.push(PresentationEvent::PathAbandoned { actor: id });
            }
            match self.actors.get_mut(id) {
                Some(actor) => decision.apply_to(actor),
                None => Intent::wait(id),
            }
        };

        debug!(actor = %id, intent = %intent, "turn");
        let Resolution { performed, deaths } = self.resolve(grid, &mut entry, intent);

        let at = entry.due();
        let destination = entry.destination();
        let collision = entry.collision();

        let next_due = if deaths.contains(&id) {
            self.scheduler.retire(entry)?;
            None
        } else {
            let agility = self.actors.get(id).map_or(0, |actor| actor.stats.agility);
            let delay = turn_delay(agility, self.config.default_turn_delay);
            Some(self.scheduler.reschedule(entry, delay)?)
        };

        for dead in &deaths {
            self.remove_dead(*dead);
        }

        Ok(TickOutcome::Acted(TurnReport {
            actor: id,
            at,
            intent,
            performed,
            destination,
            collision,
            next_due,
            deaths,
        }))
    }
}
