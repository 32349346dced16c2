// Champion-keyed map with multi-key, case-insensitive lookup.
//
// Table keys are raw identifiers from whichever tool produced the JSON
// ("MonkeyKing", "kaisa", "Dr. Mundo"). Each entry is indexed under every
// candidate key its identifier derives (raw, resolved, lookup key), and
// queries try their own candidate keys in `CANDIDATE_KEYS` order.

use std::collections::HashMap;

use tracing::warn;

use crate::champion::names::{lookup_key, NameIndex};

#[derive(Debug, Clone)]
pub struct ChampionMap<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for ChampionMap<T> {
    fn default() -> Self {
        ChampionMap {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> ChampionMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the canonical name of `raw_key`. A second identifier
    /// resolving to an already-present champion is ignored.
    pub fn insert(&mut self, raw_key: &str, value: T, names: &NameIndex) {
        let canonical = names.resolve(raw_key);
        if canonical.is_empty() {
            return;
        }
        if self.index.contains_key(&canonical.to_lowercase()) {
            warn!(
                "duplicate table entry '{}' for champion '{}', keeping the first",
                raw_key, canonical
            );
            return;
        }

        let slot = self.entries.len();
        let mut keys = names.candidate_keys(raw_key);
        keys.push(lookup_key(&canonical).to_lowercase());
        for key in keys {
            self.index.entry(key).or_insert(slot);
        }
        // The canonical key always points at this entry.
        self.index.insert(canonical.to_lowercase(), slot);
        self.entries.push((canonical, value));
    }

    /// Look up by any spelling of the champion.
    pub fn get(&self, raw: &str, names: &NameIndex) -> Option<&T> {
        self.get_entry(raw, names).map(|(_, v)| v)
    }

    /// Like [`get`](Self::get), also returning the stored display name.
    pub fn get_entry(&self, raw: &str, names: &NameIndex) -> Option<(&str, &T)> {
        names
            .candidate_keys(raw)
            .iter()
            .find_map(|key| self.index.get(key))
            .map(|&slot| {
                let (name, value) = &self.entries[slot];
                (name.as_str(), value)
            })
    }

    /// Entries in insertion order as (display name, value).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> NameIndex {
        NameIndex::new(["Wukong", "Kai'Sa", "Dr. Mundo", "Ahri"])
    }

    #[test]
    fn lookup_by_any_spelling() {
        let names = names();
        let mut map = ChampionMap::new();
        map.insert("MonkeyKing", 1, &names);
        map.insert("kaisa", 2, &names);
        map.insert("DrMundo", 3, &names);

        assert_eq!(map.get("Wukong", &names), Some(&1));
        assert_eq!(map.get("monkeyking", &names), Some(&1));
        assert_eq!(map.get("Kai'Sa", &names), Some(&2));
        assert_eq!(map.get("KAISA", &names), Some(&2));
        assert_eq!(map.get("dr. mundo", &names), Some(&3));
        assert_eq!(map.get("Ahri", &names), None);
        assert_eq!(map.get("", &names), None);
    }

    #[test]
    fn entries_carry_display_names() {
        let names = names();
        let mut map = ChampionMap::new();
        map.insert("MonkeyKing", (), &names);
        let (name, _) = map.get_entry("wukong", &names).unwrap();
        assert_eq!(name, "Wukong");
        let listed: Vec<&str> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(listed, vec!["Wukong"]);
    }

    #[test]
    fn unknown_identifiers_still_match_their_own_spelling() {
        let names = names();
        let mut map = ChampionMap::new();
        map.insert("Ambessa", 7, &names);
        assert_eq!(map.get("ambessa", &names), Some(&7));
        assert_eq!(map.get("Ambessa", &names), Some(&7));
    }

    #[test]
    fn duplicate_champion_keeps_first() {
        let names = names();
        let mut map = ChampionMap::new();
        map.insert("Wukong", 1, &names);
        map.insert("MonkeyKing", 2, &names);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("monkeyking", &names), Some(&1));
    }
}
