//! Full attack resolution: damage, death, experience and level-ups.

use crate::state::ActorStats;

use super::damage::{apply_damage, calculate_damage};
use super::experience::{gain_xp, xp_reward};

/// What one attack did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    /// Damage from the formula, before clamping to the defender's hp.
    pub damage: u32,

    /// Hp actually removed.
    pub hp_removed: u32,

    /// Defender's hp after the hit.
    pub defender_hp: u32,

    pub killed: bool,

    /// Experience granted to the attacker; 0 unless `killed`.
    pub xp_awarded: u32,

    /// Levels the attacker gained from `xp_awarded`.
    pub levels_gained: u32,
}

/// Resolves an attack and, on a kill, rewards the attacker.
pub fn resolve_attack(
    attacker: &mut ActorStats,
    defender: &mut ActorStats,
    base_hp: u32,
) -> AttackResult {
    let damage = calculate_damage(attacker.strength, defender.endurance);
    let hp_removed = apply_damage(defender, damage);
    let killed = hp_removed > 0 && !defender.is_alive();

    let (xp_awarded, levels_gained) = if killed {
        let xp = xp_reward(defender, attacker.level);
        (xp, gain_xp(attacker, xp, base_hp))
    } else {
        (0, 0)
    };

    AttackResult {
        damage,
        hp_removed,
        defender_hp: defender.hp,
        killed,
        xp_awarded,
        levels_gained,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TacticsConfig;

    #[test]
    fn non_lethal_hit_awards_nothing() {
        let mut attacker = ActorStats::new(6, 3, 0, 1, 13);
        let mut defender = ActorStats::new(2, 3, 0, 1, 13);

        let result = resolve_attack(&mut attacker, &mut defender, TacticsConfig::BASE_HP);

        assert_eq!(result.damage, 4);
        assert_eq!(result.defender_hp, 9);
        assert!(!result.killed);
        assert_eq!(result.xp_awarded, 0);
        assert_eq!(attacker.xp, 0);
    }

    #[test]
    fn kill_awards_experience_to_attacker() {
        let mut attacker = ActorStats::new(6, 3, 0, 1, 13);
        let mut defender = ActorStats::new(2, 3, 0, 1, 4);

        let result = resolve_attack(&mut attacker, &mut defender, TacticsConfig::BASE_HP);

        assert!(result.killed);
        assert_eq!(result.hp_removed, 4);
        // (4 + 2 + 3) * 1 / 2 = 4.5, halves round away from zero
        assert_eq!(result.xp_awarded, 5);
        assert_eq!(attacker.xp, 5);
        assert_eq!(result.levels_gained, 0);
    }

    #[test]
    fn kill_can_level_the_attacker() {
        let mut attacker = ActorStats::new(20, 3, 0, 1, 13);
        attacker.xp = attacker.xp_to_next_level - 1;
        let mut defender = ActorStats::new(2, 3, 0, 3, 4);

        let result = resolve_attack(&mut attacker, &mut defender, TacticsConfig::BASE_HP);

        assert!(result.killed);
        assert_eq!(result.levels_gained, 1);
        assert_eq!(attacker.level, 2);
        assert_eq!(attacker.strength, 21);
    }

    #[test]
    fn already_dead_defender_is_not_killed_again() {
        let mut attacker = ActorStats::new(6, 3, 0, 1, 13);
        let mut defender = ActorStats::new(2, 3, 0, 1, 4);
        defender.hp = 0;

        let result = resolve_attack(&mut attacker, &mut defender, TacticsConfig::BASE_HP);

        assert!(!result.killed);
        assert_eq!(result.xp_awarded, 0);
    }
}
