//! Actor record: identity, allegiance, stat block and decision state.

use super::{EntityId, Position};
use crate::affinity::Faction;
use crate::combat::experience::xp_for_level;

/// Who chooses this actor's intents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Controller {
    /// Intents arrive from external input; the behavior machine is bypassed.
    Player,
    /// Intents come from the behavior state machine.
    #[default]
    Ai,
}

/// Decision state of an AI-controlled actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BehaviorState {
    /// Suspended; every turn resolves to WAIT until reactivated.
    Inactive,
    /// No committed target.
    #[default]
    Idle,
    /// Hostile identified; closing distance through the desire field.
    Seeking,
    /// Consuming a committed path, one cell per turn.
    Pathfinding,
}

/// Numeric stat block used by combat and leveling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStats {
    pub strength: u32,
    pub endurance: u32,
    pub agility: u32,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
}

impl ActorStats {
    /// Fresh stat block at full health with the threshold for the next level.
    pub fn new(strength: u32, endurance: u32, agility: u32, level: u32, max_hp: u32) -> Self {
        let level = level.max(1);
        Self {
            strength,
            endurance,
            agility,
            level,
            hp: max_hp,
            max_hp,
            xp: 0,
            xp_to_next_level: xp_for_level(level + 1),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Current hp as a percentage of max hp (0 when max hp is 0).
    pub fn hp_percent(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        self.hp.saturating_mul(100) / self.max_hp
    }
}

impl Default for ActorStats {
    fn default() -> Self {
        Self::new(5, 5, 0, 1, 10)
    }
}

/// Everything the tactical core tracks about one actor.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub faction: Faction,
    pub controller: Controller,
    pub position: Position,
    /// Cell the actor returns to on reactivation.
    pub spawn: Position,
    pub stats: ActorStats,
    pub behavior: BehaviorState,
    /// Committed path, next cell first.
    pub path: Vec<Position>,
    /// Desire-field interest of the best cell seen last turn; 0 when nothing
    /// has caught the actor's attention.
    pub interest: u32,
    /// Seed written at this actor's cell when others build a desire field
    /// toward it. Lower seeds make the actor more attractive.
    pub desire_seed: u32,
    pub perception_radius: i32,
    /// Actor this one is currently hunting, if any.
    pub target: Option<EntityId>,
}

impl Actor {
    pub fn new(id: EntityId, faction: Faction, position: Position, stats: ActorStats) -> Self {
        Self {
            id,
            name: String::new(),
            faction,
            controller: Controller::Ai,
            position,
            spawn: position,
            stats,
            behavior: BehaviorState::Idle,
            path: Vec::new(),
            interest: 0,
            desire_seed: 0,
            perception_radius: crate::config::TacticsConfig::DEFAULT_PERCEPTION_RADIUS,
            target: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_perception(mut self, radius: i32) -> Self {
        self.perception_radius = radius;
        self
    }

    pub fn with_desire_seed(mut self, seed: u32) -> Self {
        self.desire_seed = seed;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    #[inline]
    pub fn is_player_controlled(&self) -> bool {
        self.controller == Controller::Player
    }

    /// Drops the committed path and the current target.
    pub fn forget_target(&mut self) {
        self.path.clear();
        self.target = None;
    }

    /// Puts the actor into the suspended state.
    pub fn suspend(&mut self) {
        self.behavior = BehaviorState::Inactive;
        self.forget_target();
    }

    /// Returns a suspended actor to IDLE at its spawn cell with interest reset.
    pub fn reactivate(&mut self) {
        self.behavior = BehaviorState::Idle;
        self.position = self.spawn;
        self.interest = 0;
        self.forget_target();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_start_full_with_threshold() {
        let stats = ActorStats::new(6, 3, 2, 1, 16);
        assert_eq!(stats.hp, 16);
        assert_eq!(stats.xp, 0);
        assert_eq!(stats.xp_to_next_level, xp_for_level(2));
    }

    #[test]
    fn level_is_at_least_one() {
        assert_eq!(ActorStats::new(1, 1, 1, 0, 10).level, 1);
    }

    #[test]
    fn reactivation_resets_position_and_interest() {
        let mut actor = Actor::new(
            EntityId(3),
            Faction::Enemy,
            Position::new(2, 2),
            ActorStats::default(),
        );
        actor.position = Position::new(6, 4);
        actor.interest = 12;
        actor.behavior = BehaviorState::Seeking;
        actor.path.push(Position::new(7, 4));

        actor.suspend();
        assert_eq!(actor.behavior, BehaviorState::Inactive);
        assert!(actor.path.is_empty());

        actor.reactivate();
        assert_eq!(actor.behavior, BehaviorState::Idle);
        assert_eq!(actor.position, Position::new(2, 2));
        assert_eq!(actor.interest, 0);
    }
}
