//! Simulation settings read from the process environment.

use std::env;
use std::path::PathBuf;

/// Settings for one headless run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub content_dir: PathBuf,
    pub map: String,
    pub max_turns: usize,
    /// Append every presentation event to this JSON-lines file.
    pub event_log: Option<PathBuf>,
    pub show_map: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data")),
            map: "arena".to_owned(),
            max_turns: 500,
            event_log: None,
            show_map: true,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_CONTENT_DIR` - Data directory (default: the bundled `data/`)
    /// - `TACTICS_MAP` - Map name under `maps/` (default: arena)
    /// - `TACTICS_MAX_TURNS` - Turn limit (default: 500)
    /// - `TACTICS_EVENT_LOG` - JSON-lines event file to create (default: none)
    /// - `TACTICS_SHOW_MAP` - Print the map before and after the run (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("TACTICS_CONTENT_DIR") {
            config.content_dir = dir;
        }
        if let Some(map) = read_env::<String>("TACTICS_MAP") {
            config.map = map;
        }
        if let Some(turns) = read_env::<usize>("TACTICS_MAX_TURNS") {
            config.max_turns = turns;
        }
        config.event_log = read_env::<PathBuf>("TACTICS_EVENT_LOG");
        if let Some(show) = read_env_bool("TACTICS_SHOW_MAP") {
            config.show_map = show;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_boolean_spellings() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn default_points_at_bundled_content() {
        let config = SimConfig::default();
        assert!(config.content_dir.ends_with("data"));
        assert!(config.content_dir.join("archetypes.ron").exists());
    }
}
