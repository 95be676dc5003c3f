//! Turning intents into grid, stat and event changes.

use tracing::{debug, info};

use super::TacticsEngine;
use crate::affinity::is_aggressive;
use crate::combat::{apply_damage, calculate_damage, resolve_attack};
use crate::env::{GridMut, ObjectKind, TileFlags, TileObject};
use crate::events::PresentationEvent;
use crate::intent::{Intent, IntentKind};
use crate::interaction::{ActorKind, InteractionEffect};
use crate::scheduler::{Clock, TurnEntry};
use crate::state::{EntityId, Position};

pub(super) struct Resolution {
    pub performed: IntentKind,
    pub deaths: Vec<EntityId>,
}

impl Resolution {
    fn new(performed: IntentKind) -> Self {
        Self {
            performed,
            deaths: Vec::new(),
        }
    }
}

impl<C: Clock> TacticsEngine<C> {
    pub(super) fn resolve<G>(
        &mut self,
        grid: &mut G,
        entry: &mut TurnEntry,
        intent: Intent,
    ) -> Resolution
    where
        G: GridMut + ?Sized,
    {
        let id = intent.actor;
        let Some(origin) = self.actors.get(id).map(|actor| actor.position) else {
            return Resolution::new(IntentKind::Wait);
        };

        let reachable = |target: Position| target.chebyshev(origin) <= 1;
        let target = match (intent.kind, intent.target) {
            (IntentKind::Wait, _) | (_, None) => return Resolution::new(IntentKind::Wait),
            (_, Some(target)) if !reachable(target) => {
                debug!(actor = %id, target = %target, "intent out of reach; waiting");
                return Resolution::new(IntentKind::Wait);
            }
            (_, Some(target)) => target,
        };

        let mut resolution = Resolution::new(IntentKind::Wait);
        match intent.kind {
            IntentKind::Move => {
                if target == origin {
                    return resolution;
                }
                entry.set_destination(target);
                self.move_into(grid, entry, id, target, &mut resolution);
            }
            IntentKind::Attack => match self.living_occupant(target, id) {
                Some(defender) => self.strike(id, defender, &mut resolution),
                None => debug!(actor = %id, target = %target, "attack target gone; waiting"),
            },
            IntentKind::Interact => {
                if self.interact(grid, id, target, &mut resolution).is_some() {
                    resolution.performed = IntentKind::Interact;
                }
            }
            IntentKind::Wait => {}
        }
        resolution
    }

    fn living_occupant(&self, position: Position, except: EntityId) -> Option<EntityId> {
        self.actors
            .actor_at(position)
            .map(|actor| actor.id)
            .filter(|occupant| *occupant != except)
    }

    fn actor_kind(&self, id: EntityId) -> ActorKind {
        match self.actors.get(id) {
            Some(actor) if actor.is_player_controlled() => ActorKind::Player,
            _ => ActorKind::Creature,
        }
    }

    /// Moving into an occupied cell collides with the occupant: hostile
    /// occupants are attacked, anyone else blocks the move.
    fn move_into<G>(
        &mut self,
        grid: &mut G,
        entry: &mut TurnEntry,
        id: EntityId,
        target: Position,
        resolution: &mut Resolution,
    ) where
        G: GridMut + ?Sized,
    {
        if let Some(occupant) = self.living_occupant(target, id) {
            entry.set_collision(occupant);
            let hostile = match (self.actors.get(id), self.actors.get(occupant)) {
                (Some(mover), Some(other)) => is_aggressive(mover.faction, other.faction),
                _ => false,
            };
            if hostile {
                self.strike(id, occupant, resolution);
            } else {
                debug!(actor = %id, occupant = %occupant, "bumped into non-hostile");
            }
            return;
        }

        let held = self.interact(grid, id, target, resolution);
        if held == Some(true) {
            resolution.performed = IntentKind::Interact;
            return;
        }

        if grid.is_traversable(target) {
            if let Some(actor) = self.actors.get_mut(id) {
                actor.position = target;
            }
            resolution.performed = IntentKind::Move;
        } else if held.is_some() {
            resolution.performed = IntentKind::Interact;
        }
    }

    /// Applies every table effect of the objects on `target`.
    ///
    /// Returns `None` if nothing reacted, otherwise whether any effect holds
    /// the mover in place.
    fn interact<G>(
        &mut self,
        grid: &mut G,
        id: EntityId,
        target: Position,
        resolution: &mut Resolution,
    ) -> Option<bool>
    where
        G: GridMut + ?Sized,
    {
        let kind = self.actor_kind(id);
        let objects: Vec<TileObject> = grid.objects_at(target).to_vec();

        let mut reacted = None;
        for object in objects {
            let effect = match self.interactions.effect(kind, object.kind) {
                InteractionEffect::OpenDoor if object.flags.is_traversable() => {
                    InteractionEffect::Nothing
                }
                effect => effect,
            };
            if effect == InteractionEffect::Nothing {
                continue;
            }

            self.apply_effect(grid, id, target, object, effect, resolution);
            reacted = Some(reacted.unwrap_or(false) || effect.holds_mover());
        }
        reacted
    }

    fn apply_effect<G>(
        &mut self,
        grid: &mut G,
        id: EntityId,
        target: Position,
        object: TileObject,
        effect: InteractionEffect,
        resolution: &mut Resolution,
    ) where
        G: GridMut + ?Sized,
    {
        match effect {
            InteractionEffect::Nothing => {}
            InteractionEffect::OpenDoor => {
                if grid.set_object_flags(target, ObjectKind::Door, TileFlags::TRAVERSABLE) {
                    debug!(actor = %id, at = %target, "door opened");
                    self.events.push(PresentationEvent::DoorOpened {
                        actor: id,
                        position: target,
                    });
                }
            }
            InteractionEffect::OpenContainer => {
                self.events.push(PresentationEvent::ChestOpened {
                    actor: id,
                    position: target,
                });
            }
            InteractionEffect::Collect => {
                if grid.take_object(target, object.kind).is_some() {
                    self.events.push(PresentationEvent::ItemCollected {
                        actor: id,
                        position: target,
                    });
                }
            }
            InteractionEffect::Trigger => {
                let Some(victim) = self.actors.get_mut(id) else {
                    return;
                };
                let damage = calculate_damage(object.potency, victim.stats.endurance);
                apply_damage(&mut victim.stats, damage);
                let died = !victim.is_alive();

                self.events.push(PresentationEvent::TrapTriggered {
                    actor: id,
                    position: target,
                    damage,
                });
                if died && !resolution.deaths.contains(&id) {
                    info!(actor = %id, at = %target, "killed by trap");
                    self.events.push(PresentationEvent::Death {
                        actor: id,
                        killer: None,
                    });
                    resolution.deaths.push(id);
                }
            }
        }
    }

    fn strike(&mut self, attacker: EntityId, defender: EntityId, resolution: &mut Resolution) {
        let base_hp = self.config.base_hp;
        let Some((striker, victim)) = self.actors.pair_mut(attacker, defender) else {
            return;
        };

        let result = resolve_attack(&mut striker.stats, &mut victim.stats, base_hp);
        let level = striker.stats.level;
        resolution.performed = IntentKind::Attack;

        debug!(
            attacker = %attacker,
            defender = %defender,
            damage = result.damage,
            hp = result.defender_hp,
            "hit"
        );
        self.events.push(PresentationEvent::Hit {
            attacker,
            defender,
            damage: result.damage,
        });

        if result.killed {
            info!(actor = %defender, killer = %attacker, xp = result.xp_awarded, "slain");
            self.events.push(PresentationEvent::Death {
                actor: defender,
                killer: Some(attacker),
            });
            resolution.deaths.push(defender);
        }

        for reached in (level + 1 - result.levels_gained)..=level {
            info!(actor = %attacker, level = reached, "level up");
            self.events.push(PresentationEvent::LevelUp {
                actor: attacker,
                level: reached,
            });
        }
    }
}
