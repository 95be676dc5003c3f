//! Experience rewards and leveling.

use crate::state::ActorStats;

/// Experience needed to reach `level`.
///
/// ```text
/// floor(floor(level + 300 * 2^(level / 7)) / 4)
/// ```
///
/// `level / 7` is integer division, so the curve doubles every seven levels.
pub fn xp_for_level(level: u32) -> u32 {
    let exponent = i32::try_from(level / 7).unwrap_or(i32::MAX);
    let points = (f64::from(level) + 300.0 * 2f64.powi(exponent)).floor();
    let threshold = (points / 4.0).floor();
    if threshold >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        threshold as u32
    }
}

/// Experience granted for killing `target` at `killer_level`.
///
/// Shrinks as the killer outlevels the target.
pub fn xp_reward(target: &ActorStats, killer_level: u32) -> u32 {
    let worth = f64::from(target.max_hp) + f64::from(target.strength) + f64::from(target.endurance);
    let reward = worth * f64::from(target.level) / (f64::from(killer_level) + 1.0);
    reward.round().min(f64::from(u32::MAX)) as u32
}

/// Advances one level, carrying leftover experience forward.
///
/// Hp is left as is but clamped if the new max falls below it.
pub fn level_up(stats: &mut ActorStats, base_hp: u32) {
    let threshold = stats.xp_to_next_level;

    stats.level += 1;
    stats.xp = stats.xp.saturating_sub(threshold);
    stats.xp_to_next_level = xp_for_level(stats.level + 1);
    stats.strength += 1;
    stats.endurance += 1;
    stats.max_hp = base_hp.saturating_add(stats.endurance.saturating_mul(stats.level));
    stats.hp = stats.hp.min(stats.max_hp);
}

/// Adds experience and levels up as many times as it covers.
///
/// Returns the number of levels gained.
pub fn gain_xp(stats: &mut ActorStats, amount: u32, base_hp: u32) -> u32 {
    stats.xp = stats.xp.saturating_add(amount);

    let mut gained = 0;
    while stats.xp_to_next_level > 0 && stats.xp >= stats.xp_to_next_level {
        level_up(stats, base_hp);
        gained += 1;
    }
    gained
}
