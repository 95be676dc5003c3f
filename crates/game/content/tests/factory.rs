//! Loading a complete data directory from disk.

use std::fs;
use std::path::Path;

use tactics_content::ContentFactory;
use tactics_core::{ArchetypeOracle, Controller, Faction, Position, TacticsConfig};

const ARCHETYPES: &str = r#"[
    (name: "hero", faction: Player, strength: 5, endurance: 5, agility: 20, hp: Some(30)),
    (name: "orc", faction: Enemy, strength: 6, endurance: 3, agility: 0),
]"#;

const MAP: &str = "(
    rows: [
        \"######\",
        \"#....#\",
        \"######\",
    ],
    spawns: [
        (archetype: \"hero\", position: (x: 1, y: 1), controller: Player),
        (archetype: \"orc\", position: (x: 4, y: 1)),
    ],
)";

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create data dir");
    }
    fs::write(path, content).expect("write fixture");
}

#[test]
fn loads_bundle_from_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "config.toml", "sight_radius = 10\nbase_hp = 12\n");
    write(dir.path(), "archetypes.ron", ARCHETYPES);
    write(dir.path(), "maps/arena.ron", MAP);

    let bundle = ContentFactory::new(dir.path())
        .load_bundle("arena")
        .expect("bundle loads");

    assert_eq!(bundle.config.sight_radius, 10);
    assert_eq!(bundle.config.base_hp, 12);
    assert_eq!(
        bundle.archetypes.archetype("orc").map(|a| a.faction),
        Some(Faction::Enemy)
    );
    assert_eq!(bundle.map.spawns.len(), 2);
    assert_eq!(bundle.map.spawns[0].controller, Controller::Player);
    assert_eq!(bundle.map.spawns[1].position, Position::new(4, 1));
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "archetypes.ron", ARCHETYPES);
    write(dir.path(), "maps/arena.ron", MAP);

    let bundle = ContentFactory::new(dir.path())
        .load_bundle("arena")
        .expect("bundle loads");
    assert_eq!(bundle.config, TacticsConfig::default());
}

#[test]
fn unknown_spawn_archetype_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "archetypes.ron", ARCHETYPES);
    write(dir.path(), "maps/arena.ron", &MAP.replace("orc", "dragon"));

    let err = ContentFactory::new(dir.path())
        .load_bundle("arena")
        .unwrap_err();
    assert!(err.to_string().contains("unknown archetype 'dragon'"));
}

#[test]
fn missing_map_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = ContentFactory::new(dir.path()).load_map("nowhere").unwrap_err();
    assert!(err.to_string().contains("nowhere.ron"));
}
