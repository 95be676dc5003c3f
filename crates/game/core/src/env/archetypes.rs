use crate::affinity::Faction;
use crate::config::TacticsConfig;
use crate::state::{Actor, ActorStats, Controller, EntityId, Position};

/// Initial stat block and disposition for one kind of actor.
///
/// Authored outside the core (see the content loaders) and turned into an
/// [`Actor`] at spawn time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Archetype {
    pub name: String,
    pub faction: Faction,
    pub strength: u32,
    pub endurance: u32,
    pub agility: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
    /// Starting hp. When absent, `base_hp + endurance * level` is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub perception_radius: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub desire_seed: u32,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

impl Archetype {
    pub fn new(name: impl Into<String>, faction: Faction) -> Self {
        Self {
            name: name.into(),
            faction,
            strength: 5,
            endurance: 5,
            agility: 0,
            level: 1,
            hp: None,
            perception_radius: None,
            desire_seed: 0,
        }
    }

    pub fn with_stats(mut self, strength: u32, endurance: u32, agility: u32) -> Self {
        self.strength = strength;
        self.endurance = endurance;
        self.agility = agility;
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn stats(&self, config: &TacticsConfig) -> ActorStats {
        let level = self.level.max(1);
        let max_hp = self.hp.unwrap_or_else(|| {
            config
                .base_hp
                .saturating_add(self.endurance.saturating_mul(level))
        });
        ActorStats::new(self.strength, self.endurance, self.agility, level, max_hp)
    }

    /// Builds an actor from this archetype. The id is assigned by the arena.
    pub fn instantiate(
        &self,
        position: Position,
        controller: Controller,
        config: &TacticsConfig,
    ) -> Actor {
        Actor::new(EntityId(0), self.faction, position, self.stats(config))
            .with_name(self.name.clone())
            .with_controller(controller)
            .with_perception(self.perception_radius.unwrap_or(match controller {
                Controller::Player => config.sight_radius,
                Controller::Ai => config.perception_radius,
            }))
            .with_desire_seed(self.desire_seed)
    }
}

/// Lookup of archetypes by name.
pub trait ArchetypeOracle {
    fn archetype(&self, name: &str) -> Option<&Archetype>;
}

/// Actor that should exist when a session starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialActorSpec {
    pub archetype: String,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub controller: Controller,
}
