//! Agility-scaled turn delays.

/// Movement speed on a 100 = normal scale, clamped to 50..=200.
pub fn speed_from_agility(agility: u32) -> u64 {
    let speed = 100 + u64::from(agility) * 8 / 10;
    speed.clamp(50, 200)
}

/// Delay until an actor with `agility` acts again.
///
/// ```text
/// delay = default_delay * 100 / speed
/// ```
pub fn turn_delay(agility: u32, default_delay: u64) -> u64 {
    default_delay.saturating_mul(100) / speed_from_agility(agility)
}
