//! In-memory archetype lookup.

use std::collections::HashMap;

use tactics_core::{Archetype, ArchetypeOracle};

/// Archetypes keyed by name.
#[derive(Clone, Debug, Default)]
pub struct ArchetypeCatalog {
    by_name: HashMap<String, Archetype>,
}

impl ArchetypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an archetype, returning the one it replaced.
    pub fn insert(&mut self, archetype: Archetype) -> Option<Archetype> {
        self.by_name.insert(archetype.name.clone(), archetype)
    }

    pub fn get(&self, name: &str) -> Option<&Archetype> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Archetype names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ArchetypeOracle for ArchetypeCatalog {
    fn archetype(&self, name: &str) -> Option<&Archetype> {
        self.get(name)
    }
}

impl FromIterator<Archetype> for ArchetypeCatalog {
    fn from_iter<I: IntoIterator<Item = Archetype>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for archetype in iter {
            catalog.insert(archetype);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::Faction;

    #[test]
    fn later_entries_replace_earlier_ones() {
        let catalog: ArchetypeCatalog = [
            Archetype::new("orc", Faction::Enemy).with_stats(6, 3, 0),
            Archetype::new("rat", Faction::Enemy),
            Archetype::new("orc", Faction::Enemy).with_stats(8, 4, 0),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names(), vec!["orc", "rat"]);
        assert_eq!(catalog.archetype("orc").map(|a| a.strength), Some(8));
        assert!(catalog.archetype("dragon").is_none());
    }
}
