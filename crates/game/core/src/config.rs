use crate::error::{ErrorSeverity, TacticsError};

/// Tunable parameters shared by the engine and its collaborators.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TacticsConfig {
    /// Light radius computed around player-controlled actors.
    pub sight_radius: i32,

    /// Perception radius used when an archetype does not specify one.
    pub perception_radius: i32,

    /// Peak light intensity. Lower values give darker lighting; must be > 0.
    pub darkness_factor: f64,

    /// Delay applied when a turn is scheduled without an explicit delay.
    pub default_turn_delay: u64,

    /// Hit points every actor has before endurance and level are added.
    pub base_hp: u32,

    /// Seeking actors at or below this share of max hp flee instead of hunting.
    pub flee_hp_percent: u32,

    /// Upper bound on the length of a committed path.
    pub max_path_len: usize,
}

impl TacticsConfig {
    // ===== compile-time constants =====
    pub const MAX_OBJECTS_PER_TILE: usize = 4;
    pub const MAX_ACTORS: usize = 1024;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SIGHT_RADIUS: i32 = 8;
    pub const DEFAULT_PERCEPTION_RADIUS: i32 = 6;
    pub const DEFAULT_DARKNESS_FACTOR: f64 = 1.0;
    pub const DEFAULT_TURN_DELAY: u64 = 1000;
    pub const BASE_HP: u32 = 10;
    pub const DEFAULT_FLEE_HP_PERCENT: u32 = 20;
    pub const DEFAULT_MAX_PATH_LEN: usize = 64;

    pub fn new() -> Self {
        Self {
            sight_radius: Self::DEFAULT_SIGHT_RADIUS,
            perception_radius: Self::DEFAULT_PERCEPTION_RADIUS,
            darkness_factor: Self::DEFAULT_DARKNESS_FACTOR,
            default_turn_delay: Self::DEFAULT_TURN_DELAY,
            base_hp: Self::BASE_HP,
            flee_hp_percent: Self::DEFAULT_FLEE_HP_PERCENT,
            max_path_len: Self::DEFAULT_MAX_PATH_LEN,
        }
    }

    pub fn with_darkness_factor(mut self, darkness_factor: f64) -> Self {
        self.darkness_factor = darkness_factor;
        self
    }

    pub fn with_turn_delay(mut self, delay: u64) -> Self {
        self.default_turn_delay = delay;
        self
    }

    /// Rejects values the engine cannot work with.
    ///
    /// Radii are not checked: a non-positive radius is a legal request that
    /// lights only the origin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.darkness_factor > 0.0) || !self.darkness_factor.is_finite() {
            return Err(ConfigError::DarknessFactor(self.darkness_factor));
        }
        if self.default_turn_delay == 0 {
            return Err(ConfigError::ZeroTurnDelay);
        }
        if self.flee_hp_percent > 100 {
            return Err(ConfigError::FleeThreshold(self.flee_hp_percent));
        }
        Ok(())
    }
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Invalid tunable detected by [`TacticsConfig::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("darkness factor must be a positive finite number (got {0})")]
    DarknessFactor(f64),

    #[error("default turn delay must be non-zero")]
    ZeroTurnDelay,

    #[error("flee threshold must be a percentage (got {0})")]
    FleeThreshold(u32),
}

impl TacticsError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(TacticsConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_darkness() {
        let config = TacticsConfig::default().with_darkness_factor(0.0);
        assert_eq!(config.validate(), Err(ConfigError::DarknessFactor(0.0)));

        let config = TacticsConfig::default().with_darkness_factor(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_delay() {
        let config = TacticsConfig::default().with_turn_delay(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTurnDelay));
    }
}
