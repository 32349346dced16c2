// Champion roster loading.
//
// The roster comes from the tags CSV: one row per champion with up to four
// descriptive tag columns. Extra columns are ignored; malformed rows are
// skipped with a warning rather than failing the whole load.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use super::names::NameIndex;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One champion with its descriptive tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChampionEntry {
    pub name: String,
    /// Gameplay1 / Gameplay2, in column order, empty cells dropped.
    pub gameplay: Vec<String>,
    pub power_spike: Option<String>,
    pub synergy_focus: Option<String>,
}

/// The loaded champion roster, in file order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<ChampionEntry>,
    by_name: HashMap<String, usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV row
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawTagRow {
    #[serde(rename = "Champion")]
    champion: String,
    #[serde(rename = "Gameplay1", default)]
    gameplay1: String,
    #[serde(rename = "Gameplay2", default)]
    gameplay2: String,
    #[serde(rename = "Power Spike", default)]
    power_spike: String,
    #[serde(rename = "Synergy Focus", default)]
    synergy_focus: String,
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

impl Roster {
    /// Parse the tags CSV from any reader.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
        let mut roster = Roster::default();
        for result in reader.deserialize::<RawTagRow>() {
            match result {
                Ok(raw) => {
                    let Some(name) = non_empty(&raw.champion) else {
                        warn!("skipping roster row with empty Champion column");
                        continue;
                    };
                    let entry = ChampionEntry {
                        gameplay: [&raw.gameplay1, &raw.gameplay2]
                            .into_iter()
                            .filter_map(|s| non_empty(s))
                            .collect(),
                        power_spike: non_empty(&raw.power_spike),
                        synergy_focus: non_empty(&raw.synergy_focus),
                        name,
                    };
                    roster.insert(entry);
                }
                Err(e) => {
                    warn!("skipping malformed roster row: {}", e);
                }
            }
        }
        Ok(roster)
    }

    /// Build a roster from bare names (no tags).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Roster::default();
        for name in names {
            if let Some(name) = non_empty(name.as_ref()) {
                roster.insert(ChampionEntry {
                    name,
                    gameplay: Vec::new(),
                    power_spike: None,
                    synergy_focus: None,
                });
            }
        }
        roster
    }

    fn insert(&mut self, entry: ChampionEntry) {
        if let Some(&idx) = self.by_name.get(&entry.name) {
            warn!("duplicate roster entry for '{}', using latest row", entry.name);
            self.entries[idx] = entry;
        } else {
            self.by_name.insert(entry.name.clone(), self.entries.len());
            self.entries.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by exact display name.
    pub fn get(&self, name: &str) -> Option<&ChampionEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[ChampionEntry] {
        &self.entries
    }

    /// Display names sorted case-insensitively, as shown in pick/ban lists.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
        names.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        names
    }

    /// Name index seeded from this roster.
    pub fn name_index(&self) -> NameIndex {
        NameIndex::new(self.entries.iter().map(|e| e.name.as_str()))
    }
}

/// Load the roster from a CSV file.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Roster::from_reader(file).map_err(|e| RosterError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}
