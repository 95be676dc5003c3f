//! Per-actor decision state machine.
//!
//! ```text
//!            hostile perceived              path committed
//!   IDLE ─────────────────────▶ SEEKING ─────────────────────▶ PATHFINDING
//!    ▲                            │                                 │
//!    └──── target lost ───────────┘◀── path exhausted / invalid ────┘
//!
//!   any ── suspend ──▶ INACTIVE ── reactivate ──▶ IDLE
//! ```
//!
//! [`decide`] is pure: it reads the acting actor and a [`Situation`] snapshot
//! and returns a [`Decision`] the engine applies afterwards. Player-controlled
//! actors never pass through here.

mod steering;
mod targeting;

pub use steering::{HuntingStep, fleeing_step, hunting_step};
pub use targeting::{nearest_hostile, perceives, tracked_target};

use tracing::debug;

use crate::config::TacticsConfig;
use crate::desire::DesireField;
use crate::env::{GridOracle, PathFinder};
use crate::intent::Intent;
use crate::state::{Actor, ActorArena, BehaviorState, EntityId, Position};
use crate::vision::LightField;

/// Read-only world view for one decision.
pub struct Situation<'a, G: GridOracle + ?Sized> {
    pub grid: &'a G,
    pub actors: &'a ActorArena,
    /// Light field computed around the deciding actor with its perception
    /// radius.
    pub light: &'a LightField,
    pub config: &'a TacticsConfig,
}

impl<G: GridOracle + ?Sized> Situation<'_, G> {
    /// Traversable and not occupied by a living actor.
    pub fn is_free(&self, position: Position) -> bool {
        self.grid.is_traversable(position) && !self.actors.is_occupied(position)
    }
}

/// New decision state for one actor plus the intent it produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub intent: Intent,
    pub behavior: BehaviorState,
    pub target: Option<EntityId>,
    pub path: Vec<Position>,
    pub interest: u32,
    /// Set when a hostile was noticed this turn.
    pub spotted: Option<EntityId>,
    /// Set when a committed path was dropped because its next cell is invalid.
    pub abandoned_path: bool,
}

impl Decision {
    /// Leaves the actor as it is and waits.
    fn keep(actor: &Actor) -> Self {
        Self {
            intent: Intent::wait(actor.id),
            behavior: actor.behavior,
            target: actor.target,
            path: actor.path.clone(),
            interest: actor.interest,
            spotted: None,
            abandoned_path: false,
        }
    }

    /// Drops target and path and goes back to IDLE.
    fn lose_target(mut self) -> Self {
        self.behavior = BehaviorState::Idle;
        self.target = None;
        self.path.clear();
        self.interest = 0;
        self.intent = Intent::wait(self.intent.actor);
        self
    }

    /// Writes the decision state into `actor`, returning the intent.
    pub fn apply_to(self, actor: &mut Actor) -> Intent {
        actor.behavior = self.behavior;
        actor.target = self.target;
        actor.path = self.path;
        actor.interest = self.interest;
        self.intent
    }
}

/// Runs one turn of the state machine for `actor`.
pub fn decide<G, P>(actor: &Actor, situation: &Situation<'_, G>, pathfinder: &P) -> Decision
where
    G: GridOracle + ?Sized,
    P: PathFinder + ?Sized,
{
    let decision = Decision::keep(actor);
    if actor.is_player_controlled() {
        return decision;
    }

    match actor.behavior {
        BehaviorState::Inactive => decision,
        BehaviorState::Idle => idle(actor, situation, pathfinder, decision),
        BehaviorState::Seeking => {
            let target =
                tracked_target(actor, situation).or_else(|| nearest_hostile(actor, situation));
            match target {
                Some(target) => seek(actor, target, situation, pathfinder, decision),
                None => {
                    debug!(actor = %actor.id, "target lost");
                    decision.lose_target()
                }
            }
        }
        BehaviorState::Pathfinding => follow(actor, situation, pathfinder, decision),
    }
}

fn idle<G, P>(actor: &Actor, situation: &Situation<'_, G>, pathfinder: &P, mut decision: Decision) -> Decision
where
    G: GridOracle + ?Sized,
    P: PathFinder + ?Sized,
{
    let Some(target) = nearest_hostile(actor, situation) else {
        return decision;
    };

    if actor.target != Some(target.id) {
        debug!(actor = %actor.id, target = %target.id, "hostile spotted");
        decision.spotted = Some(target.id);
    }
    decision.behavior = BehaviorState::Seeking;
    seek(actor, target, situation, pathfinder, decision)
}

fn seek<G, P>(
    actor: &Actor,
    target: &Actor,
    situation: &Situation<'_, G>,
    pathfinder: &P,
    mut decision: Decision,
) -> Decision
where
    G: GridOracle + ?Sized,
    P: PathFinder + ?Sized,
{
    decision.behavior = BehaviorState::Seeking;
    decision.target = Some(target.id);
    decision.path.clear();

    let desire = DesireField::toward(
        situation.grid,
        situation.light,
        target.position,
        target.desire_seed,
    );
    decision.interest = actor
        .position
        .neighbors()
        .map(|cell| desire.interest(cell))
        .max()
        .unwrap_or(0);

    let is_free = |cell| situation.is_free(cell);

    if actor.stats.hp_percent() <= situation.config.flee_hp_percent {
        decision.intent = match fleeing_step(actor.position, &desire, is_free) {
            Some(cell) => {
                debug!(actor = %actor.id, to = %cell, "fleeing");
                Intent::move_to(actor.id, cell)
            }
            None => Intent::wait(actor.id),
        };
        return decision;
    }

    if actor.position.is_adjacent(target.position) {
        decision.intent = Intent::attack(actor.id, target.position);
        return decision;
    }

    let step = hunting_step(actor.position, target.position, &desire, is_free);

    if step.blocked {
        let mut path = pathfinder.find_path(actor.position, target.position, &desire);
        path.truncate(situation.config.max_path_len);

        let first = path.first().copied();
        if let Some(first) = first.filter(|cell| cell.is_adjacent(actor.position) && is_free(*cell)) {
            debug!(actor = %actor.id, len = path.len(), "path committed");
            path.remove(0);
            decision.behavior = BehaviorState::Pathfinding;
            decision.path = path;
            decision.intent = Intent::move_to(actor.id, first);
            return decision;
        }
    }

    decision.intent = match step.best_free {
        Some(cell) => Intent::move_to(actor.id, cell),
        None => Intent::wait(actor.id),
    };
    decision
}

fn follow<G, P>(
    actor: &Actor,
    situation: &Situation<'_, G>,
    pathfinder: &P,
    mut decision: Decision,
) -> Decision
where
    G: GridOracle + ?Sized,
    P: PathFinder + ?Sized,
{
    let Some(target) = tracked_target(actor, situation) else {
        debug!(actor = %actor.id, "target left perception");
        return decision.lose_target();
    };

    if actor.position.is_adjacent(target.position) {
        return seek(actor, target, situation, pathfinder, decision);
    }

    let Some(&next) = actor.path.first() else {
        debug!(actor = %actor.id, "path exhausted");
        // IDLE re-evaluates perception within this same turn.
        decision.behavior = BehaviorState::Idle;
        decision.path.clear();
        return idle(actor, situation, pathfinder, decision);
    };

    if !next.is_adjacent(actor.position) || !situation.is_free(next) {
        debug!(actor = %actor.id, cell = %next, "path obstructed");
        let mut decision = decision.lose_target();
        decision.abandoned_path = true;
        return decision;
    }

    let desire = DesireField::toward(
        situation.grid,
        situation.light,
        target.position,
        target.desire_seed,
    );
    let shortcut = actor
        .position
        .neighbors()
        .filter(|cell| situation.is_free(*cell))
        .map(|cell| desire.value(cell))
        .min();
    if shortcut.is_some_and(|value| value < desire.value(next)) {
        debug!(actor = %actor.id, "desire field beats path");
        return seek(actor, target, situation, pathfinder, decision);
    }

    decision.path.remove(0);
    decision.interest = desire.interest(next);
    decision.intent = Intent::move_to(actor.id, next);
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affinity::Faction;
    use crate::env::NoPathFinder;
    use crate::intent::IntentKind;
    use crate::state::{ActorStats, Controller};
    use crate::test_support::TestGrid;
    use crate::vision::compute_lighting;

    struct FixedPath(Vec<Position>);

    impl PathFinder for FixedPath {
        fn find_path(&self, _start: Position, _goal: Position, _cost: &DesireField) -> Vec<Position> {
            self.0.clone()
        }
    }

    fn creature(faction: Faction, x: i32, y: i32) -> Actor {
        Actor::new(EntityId(0), faction, Position::new(x, y), ActorStats::default())
            .with_perception(6)
    }

    fn hero(x: i32, y: i32) -> Actor {
        creature(Faction::Player, x, y).with_controller(Controller::Player)
    }

    fn decide_for<P: PathFinder>(
        grid: &TestGrid,
        actors: &ActorArena,
        id: EntityId,
        pathfinder: &P,
    ) -> Decision {
        let config = TacticsConfig::default();
        let actor = actors.get(id).unwrap();
        let light = compute_lighting(
            grid,
            actor.position.x,
            actor.position.y,
            actor.perception_radius,
            config.darkness_factor,
        );
        let situation = Situation {
            grid,
            actors,
            light: &light,
            config: &config,
        };
        decide(actor, &situation, pathfinder)
    }

    #[test]
    fn idle_without_hostiles_waits() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        actors.spawn(creature(Faction::Enemy, 4, 1)).unwrap();

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert_eq!(decision.behavior, BehaviorState::Idle);
        assert!(decision.intent.is_wait());
    }

    #[test]
    fn spotting_a_hostile_starts_the_hunt_in_the_same_turn() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        let player = actors.spawn(hero(5, 1)).unwrap();

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert_eq!(decision.behavior, BehaviorState::Seeking);
        assert_eq!(decision.spotted, Some(player));
        assert_eq!(decision.target, Some(player));
        assert_eq!(decision.intent, Intent::move_to(orc, Position::new(2, 1)));
    }

    #[test]
    fn neutrals_are_ignored() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        let merchant = actors.spawn(creature(Faction::Neutral, 2, 1)).unwrap();
        actors.spawn(hero(5, 2)).unwrap();

        assert!(decide_for(&grid, &actors, merchant, &NoPathFinder).intent.is_wait());
        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert_ne!(decision.target, Some(merchant));
    }

    #[test]
    fn hostile_behind_wall_is_not_seen() {
        let mut grid = TestGrid::open(7, 3);
        for y in 0..3 {
            grid.set_wall(Position::new(3, y));
        }
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        actors.spawn(hero(5, 1)).unwrap();

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert_eq!(decision.behavior, BehaviorState::Idle);
        assert!(decision.intent.is_wait());
    }

    #[test]
    fn adjacent_hostile_is_attacked() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        actors.spawn(hero(2, 2)).unwrap();

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert_eq!(decision.intent, Intent::attack(orc, Position::new(2, 2)));
    }

    #[test]
    fn seeking_loses_target_out_of_sight() {
        let mut grid = TestGrid::open(7, 3);
        for y in 0..3 {
            grid.set_wall(Position::new(3, y));
        }
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        let player = actors.spawn(hero(5, 1)).unwrap();
        {
            let actor = actors.get_mut(orc).unwrap();
            actor.behavior = BehaviorState::Seeking;
            actor.target = Some(player);
        }

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert_eq!(decision.behavior, BehaviorState::Idle);
        assert_eq!(decision.target, None);
        assert_eq!(decision.interest, 0);
    }

    #[test]
    fn blocked_hunter_falls_back_without_a_path() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        actors.spawn(creature(Faction::Enemy, 2, 1)).unwrap();
        actors.spawn(hero(5, 1)).unwrap();

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert_eq!(decision.behavior, BehaviorState::Seeking);
        assert_eq!(decision.intent, Intent::move_to(orc, Position::new(2, 2)));
    }

    #[test]
    fn blocked_hunter_commits_path_and_steps_at_once() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        actors.spawn(creature(Faction::Enemy, 2, 1)).unwrap();
        actors.spawn(hero(5, 1)).unwrap();

        let detour = FixedPath(vec![
            Position::new(2, 0),
            Position::new(3, 0),
            Position::new(4, 0),
        ]);
        let decision = decide_for(&grid, &actors, orc, &detour);
        assert_eq!(decision.behavior, BehaviorState::Pathfinding);
        assert_eq!(decision.intent, Intent::move_to(orc, Position::new(2, 0)));
        assert_eq!(decision.path, vec![Position::new(3, 0), Position::new(4, 0)]);
    }

    #[test]
    fn obstructed_path_is_abandoned() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        actors.spawn(creature(Faction::Enemy, 2, 1)).unwrap();
        let player = actors.spawn(hero(5, 1)).unwrap();
        {
            let actor = actors.get_mut(orc).unwrap();
            actor.behavior = BehaviorState::Pathfinding;
            actor.target = Some(player);
            actor.path = vec![Position::new(2, 1), Position::new(3, 1)];
        }

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert!(decision.abandoned_path);
        assert_eq!(decision.behavior, BehaviorState::Idle);
        assert!(decision.path.is_empty());
        assert!(decision.intent.is_wait());
    }

    #[test]
    fn exhausted_path_resumes_hunting_without_new_sighting() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        let player = actors.spawn(hero(5, 1)).unwrap();
        {
            let actor = actors.get_mut(orc).unwrap();
            actor.behavior = BehaviorState::Pathfinding;
            actor.target = Some(player);
        }

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert_eq!(decision.behavior, BehaviorState::Seeking);
        assert_eq!(decision.spotted, None);
        assert_eq!(decision.intent.kind, IntentKind::Move);
    }

    #[test]
    fn wounded_hunter_flees() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let mut wounded = creature(Faction::Enemy, 3, 1);
        wounded.stats = ActorStats::new(5, 5, 0, 1, 20);
        wounded.stats.hp = 1;
        let orc = actors.spawn(wounded).unwrap();
        actors.spawn(hero(5, 1)).unwrap();

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert_eq!(decision.behavior, BehaviorState::Seeking);
        assert_eq!(decision.intent, Intent::move_to(orc, Position::new(2, 0)));
    }

    #[test]
    fn inactive_actor_waits() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        actors.spawn(hero(2, 1)).unwrap();
        actors.get_mut(orc).unwrap().suspend();

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        assert_eq!(decision.behavior, BehaviorState::Inactive);
        assert!(decision.intent.is_wait());
    }

    #[test]
    fn applying_a_decision_updates_the_actor() {
        let grid = TestGrid::open(7, 3);
        let mut actors = ActorArena::new();
        let orc = actors.spawn(creature(Faction::Enemy, 1, 1)).unwrap();
        let player = actors.spawn(hero(5, 1)).unwrap();

        let decision = decide_for(&grid, &actors, orc, &NoPathFinder);
        let intent = decision.apply_to(actors.get_mut(orc).unwrap());
        let actor = actors.get(orc).unwrap();
        assert_eq!(intent.kind, IntentKind::Move);
        assert_eq!(actor.behavior, BehaviorState::Seeking);
        assert_eq!(actor.target, Some(player));
        assert!(actor.interest > 0);
    }
}
