//! Host loop around [`TacticsEngine`].
//!
//! A [`Session`] owns the engine together with the grid, the pathfinder and
//! the event history. Frontends call [`Session::frame`] as often as they like;
//! it only does work when the next turn is due. Headless runs use
//! [`Session::run_headless`], which jumps a [`ManualClock`] from one due time
//! to the next so a whole fight resolves instantly and deterministically.
use tracing::{debug, info};

use tactics_content::ContentBundle;
use tactics_core::{
    ArchetypeOracle, Clock, Controller, EntityId, Faction, InitialActorSpec, Intent,
    ManualClock, Position, PresentationEvent, TacticsEngine, TickOutcome, is_aggressive,
};

use crate::error::{Result, RuntimeError};
use crate::log::{EventLog, JsonlEventWriter};
use crate::oracle::{GreedyPathFinder, GridMap};
use crate::providers::InputProvider;

pub struct Session<C: Clock> {
    engine: TacticsEngine<C>,
    grid: GridMap,
    pathfinder: GreedyPathFinder,
    log: EventLog,
    recorder: Option<JsonlEventWriter>,
    input: Option<Box<dyn InputProvider>>,
}

impl<C: Clock> Session<C> {
    pub fn new(engine: TacticsEngine<C>, grid: GridMap) -> Self {
        let pathfinder = GreedyPathFinder::new(engine.config().max_path_len);
        Self {
            engine,
            grid,
            pathfinder,
            log: EventLog::default(),
            recorder: None,
            input: None,
        }
    }

    /// Builds the grid from the bundled map and spawns its actors in order.
    pub fn from_content(bundle: &ContentBundle, clock: C) -> Result<Self> {
        let engine = TacticsEngine::new(bundle.config.clone(), clock)?;
        let grid = GridMap::from_layout(&bundle.map)?;
        let mut session = Self::new(engine, grid);
        for spec in &bundle.map.spawns {
            session.spawn_from_spec(&bundle.archetypes, spec)?;
        }
        info!(actors = session.engine.actors().len(), "session ready");
        Ok(session)
    }

    #[must_use]
    pub fn with_input(mut self, provider: impl InputProvider + 'static) -> Self {
        self.input = Some(Box::new(provider));
        self
    }

    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log = EventLog::with_capacity(capacity);
        self
    }

    /// Mirrors every presentation event into `recorder`.
    #[must_use]
    pub fn record_to(mut self, recorder: JsonlEventWriter) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn engine(&self) -> &TacticsEngine<C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TacticsEngine<C> {
        &mut self.engine
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn render(&self) -> String {
        self.grid.render(self.engine.actors())
    }

    pub fn spawn_from_spec<A>(&mut self, archetypes: &A, spec: &InitialActorSpec) -> Result<EntityId>
    where
        A: ArchetypeOracle + ?Sized,
    {
        self.spawn_archetype(archetypes, &spec.archetype, spec.position, spec.controller)
    }

    pub fn spawn_archetype<A>(
        &mut self,
        archetypes: &A,
        name: &str,
        position: Position,
        controller: Controller,
    ) -> Result<EntityId>
    where
        A: ArchetypeOracle + ?Sized,
    {
        let archetype = archetypes
            .archetype(name)
            .ok_or_else(|| RuntimeError::UnknownArchetype(name.to_owned()))?;
        let actor = archetype.instantiate(position, controller, self.engine.config());
        let id = self.engine.spawn(actor)?;
        debug!(actor = %id, archetype = name, at = %position, "spawned");
        Ok(id)
    }

    /// Whether no two living actors are hostile to each other.
    pub fn is_battle_over(&self) -> bool {
        let actors: Vec<_> = self.engine.actors().iter().filter(|a| a.is_alive()).collect();
        !actors.iter().enumerate().any(|(i, a)| {
            actors[i + 1..]
                .iter()
                .any(|b| is_aggressive(a.faction, b.faction))
        })
    }

    /// Runs the next turn if it is due, otherwise reports how long to wait.
    pub fn frame(&mut self) -> Result<TickOutcome> {
        match self.engine.time_until_next() {
            None => return Ok(TickOutcome::Idle),
            Some(remaining) if remaining > 0 => return Ok(TickOutcome::NotDue { remaining }),
            Some(_) => {}
        }

        self.pathfinder.set_obstacles(
            self.engine
                .actors()
                .iter()
                .filter(|actor| actor.is_alive())
                .map(|actor| actor.position),
        );

        let mut outcome = self.engine.tick(&mut self.grid, &self.pathfinder)?;
        if let TickOutcome::AwaitingInput(id) = outcome {
            if let Some(intent) = self.poll_input(id) {
                self.engine.submit_player_intent(intent)?;
                outcome = self.engine.tick(&mut self.grid, &self.pathfinder)?;
            }
        }

        self.collect_events()?;
        Ok(outcome)
    }

    fn poll_input(&mut self, id: EntityId) -> Option<Intent> {
        let provider = self.input.as_mut()?;
        let actor = self.engine.actor(id)?;
        provider.provide_intent(actor, self.engine.actors())
    }

    /// Moves engine events into the log, provoking neutrals that were hit.
    fn collect_events(&mut self) -> Result<()> {
        let events: Vec<PresentationEvent> = self.engine.drain_events().collect();
        let now = self.engine.now();

        for event in events {
            if let PresentationEvent::Hit {
                attacker, defender, ..
            } = event
            {
                self.provoke_if_neutral(attacker, defender)?;
            }

            let entry = self.log.push(now, event);
            if let Some(recorder) = self.recorder.as_mut() {
                recorder.append(&entry)?;
            }
        }
        Ok(())
    }

    fn provoke_if_neutral(&mut self, attacker: EntityId, defender: EntityId) -> Result<()> {
        let Some(attacker_faction) = self.engine.actor(attacker).map(|a| a.faction) else {
            return Ok(());
        };
        let retaliate_as = match attacker_faction {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
            Faction::Neutral => return Ok(()),
        };
        if self.engine.actor(defender).is_none() {
            return Ok(());
        }
        if self.engine.provoke(defender, retaliate_as)? {
            info!(actor = %defender, faction = %retaliate_as, "neutral provoked");
        }
        Ok(())
    }
}

/// Why [`Session::run_headless`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    TurnLimit,
    /// No hostile pair of actors is left.
    BattleOver,
    /// Nobody is scheduled.
    Idle,
    /// A player-controlled actor is due and the input provider had nothing.
    AwaitingInput(EntityId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub turns: usize,
    pub deaths: Vec<EntityId>,
    pub stop: StopReason,
}

impl Session<ManualClock> {
    /// Runs up to `max_turns` resolved turns as fast as possible.
    pub fn run_headless(&mut self, max_turns: usize) -> Result<HeadlessSummary> {
        let mut turns = 0;
        let mut deaths = Vec::new();

        let stop = loop {
            if self.is_battle_over() {
                break StopReason::BattleOver;
            }
            if turns >= max_turns {
                break StopReason::TurnLimit;
            }
            if self.engine.advance_to_next_due().is_none() {
                break StopReason::Idle;
            }

            match self.frame()? {
                TickOutcome::Acted(report) => {
                    turns += 1;
                    deaths.extend(report.deaths);
                }
                TickOutcome::AwaitingInput(id) => break StopReason::AwaitingInput(id),
                TickOutcome::Idle | TickOutcome::NotDue { .. } => break StopReason::Idle,
            }
        };

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.flush()?;
        }
        info!(turns, deaths = deaths.len(), stop = ?stop, "headless run finished");
        Ok(HeadlessSummary { turns, deaths, stop })
    }
}
