//! Damage calculation and application.

use crate::state::ActorStats;

/// Damage dealt by `strength` against `endurance`.
///
/// ```text
/// damage = strength² / (strength + endurance)
/// ```
///
/// Sub-linear in the defender's endurance: high endurance reduces exposure but
/// never removes it while strength is positive. Zero when both are zero.
pub fn calculate_damage(strength: u32, endurance: u32) -> u32 {
    let strength = u64::from(strength);
    let total = strength + u64::from(endurance);
    if total == 0 {
        return 0;
    }
    u32::try_from(strength * strength / total).unwrap_or(u32::MAX)
}

/// Subtracts `damage` from the defender's hp, clamping at 0.
///
/// Returns the hp actually removed.
pub fn apply_damage(defender: &mut ActorStats, damage: u32) -> u32 {
    let removed = damage.min(defender.hp);
    defender.hp -= removed;
    removed
}

/// One swing: computes damage from the attacker's strength and the defender's
/// endurance and applies it. Returns the computed damage.
pub fn attack(attacker: &ActorStats, defender: &mut ActorStats) -> u32 {
    let damage = calculate_damage(attacker.strength, defender.endurance);
    apply_damage(defender, damage);
    damage
}
