//! Faction tags and the aggression rule between them.
//!
//! Affinity is deliberately coarse: a faction is one of three tags and the
//! resolver answers a single yes/no question. Richer diplomacy belongs to
//! external collaborators, which may retag an actor (for example a neutral
//! that was attacked) before the next query.

/// Coarse allegiance of an actor.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    /// Controlled by, or allied with, the player.
    Player,
    /// Hostile to the player.
    Enemy,
    /// Neither targets nor is targeted.
    #[default]
    Neutral,
}

/// Returns whether actors of faction `a` and faction `b` fight on sight.
///
/// Only a PLAYER/ENEMY pairing (in either order) is aggressive. Equal factions
/// and every pairing involving NEUTRAL are not.
pub fn is_aggressive(a: Faction, b: Faction) -> bool {
    if a == b {
        return false;
    }

    match (a, b) {
        (Faction::Neutral, _) | (_, Faction::Neutral) => false,
        (Faction::Player, Faction::Enemy) | (Faction::Enemy, Faction::Player) => true,
        _ => false,
    }
}
