//! Engine configuration loader.

use std::path::Path;

use tactics_core::TacticsConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine tunables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`TacticsConfig::default`]. The result is
    /// validated before it is returned.
    pub fn load(path: &Path) -> LoadResult<TacticsConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TacticsConfig> {
        let config: TacticsConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_tables_keep_defaults() {
        let config = ConfigLoader::parse("darkness_factor = 0.5\nflee_hp_percent = 30\n")
            .expect("valid config");
        assert_eq!(config.darkness_factor, 0.5);
        assert_eq!(config.flee_hp_percent, 30);
        assert_eq!(config.default_turn_delay, TacticsConfig::DEFAULT_TURN_DELAY);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = ConfigLoader::parse("darkness_factor = -1.0").unwrap_err();
        assert!(err.to_string().contains("darkness factor"));
    }
}
