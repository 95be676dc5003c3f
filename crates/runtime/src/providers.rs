//! Sources of player intent.
//!
//! A session asks its [`InputProvider`] whenever a player-controlled actor is
//! due. Returning `None` leaves the turn pending so an interactive frontend can
//! answer on a later frame.
use std::collections::VecDeque;

use tactics_core::{Actor, ActorArena, Intent};

pub trait InputProvider {
    fn provide_intent(&mut self, actor: &Actor, actors: &ActorArena) -> Option<Intent>;
}

/// Always waits. Useful for headless runs and as a fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaitInputProvider;

impl InputProvider for WaitInputProvider {
    fn provide_intent(&mut self, actor: &Actor, _actors: &ActorArena) -> Option<Intent> {
        Some(Intent::wait(actor.id))
    }
}

/// Replays a fixed list of intents in order.
///
/// Intents addressed to another actor are skipped. Once the script runs out
/// the provider has nothing more to say.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInputProvider {
    script: VecDeque<Intent>,
}

impl ScriptedInputProvider {
    pub fn new(script: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputProvider for ScriptedInputProvider {
    fn provide_intent(&mut self, actor: &Actor, _actors: &ActorArena) -> Option<Intent> {
        while let Some(intent) = self.script.pop_front() {
            if intent.actor == actor.id {
                return Some(intent);
            }
            tracing::debug!(actor = %actor.id, scripted_for = %intent.actor, "skipping scripted intent");
        }
        None
    }
}
