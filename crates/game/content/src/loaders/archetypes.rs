//! Archetype catalog loader.
//!
//! RON format: a list of [`Archetype`] records.
//!
//! ```ron
//! [
//!     (name: "orc", faction: Enemy, strength: 6, endurance: 3, agility: 10),
//!     (name: "hero", faction: Player, strength: 5, endurance: 5, agility: 20, hp: Some(30)),
//! ]
//! ```

use std::path::Path;

use tactics_core::Archetype;

use crate::catalog::ArchetypeCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for archetype catalogs from RON files.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    pub fn load(path: &Path) -> LoadResult<ArchetypeCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a catalog, rejecting unnamed and duplicate archetypes.
    pub fn parse(content: &str) -> LoadResult<ArchetypeCatalog> {
        let archetypes: Vec<Archetype> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype RON: {}", e))?;

        let mut catalog = ArchetypeCatalog::new();
        for archetype in archetypes {
            anyhow::ensure!(!archetype.name.is_empty(), "Archetype with empty name");
            let name = archetype.name.clone();
            if catalog.insert(archetype).is_some() {
                anyhow::bail!("Duplicate archetype '{}'", name);
            }
        }

        tracing::debug!(count = catalog.len(), "archetypes loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{ArchetypeOracle, Faction};

    #[test]
    fn optional_fields_take_defaults() {
        let catalog = ArchetypeLoader::parse(
            r#"[
                (name: "rat", faction: Enemy, strength: 2, endurance: 1, agility: 40),
                (name: "hero", faction: Player, strength: 5, endurance: 5, agility: 0,
                 level: 3, hp: Some(30), perception_radius: Some(10)),
            ]"#,
        )
        .expect("valid catalog");

        let rat = catalog.archetype("rat").expect("rat exists");
        assert_eq!(rat.faction, Faction::Enemy);
        assert_eq!(rat.level, 1);
        assert_eq!(rat.hp, None);

        let hero = catalog.archetype("hero").expect("hero exists");
        assert_eq!(hero.level, 3);
        assert_eq!(hero.hp, Some(30));
        assert_eq!(hero.perception_radius, Some(10));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ArchetypeLoader::parse(
            r#"[
                (name: "rat", faction: Enemy, strength: 2, endurance: 1, agility: 0),
                (name: "rat", faction: Neutral, strength: 2, endurance: 1, agility: 0),
            ]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate archetype 'rat'"));
    }
}
