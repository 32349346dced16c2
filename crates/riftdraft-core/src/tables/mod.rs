// Statistical lookup tables.
//
// Every table is parsed once from JSON into an immutable structure keyed by
// canonical champion names. A table that fails to load is replaced by an
// empty one and its failure is reported through `TableStatus`; the engine
// never distinguishes "empty" from "failed".

pub mod bans;
pub mod combo;
pub mod keyed;
pub mod numeric;
pub mod pair;
pub mod solo;

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::champion::NameIndex;

pub use bans::{BanStat, BanTable};
pub use combo::{Combo, ComboMember, ComboTable};
pub use pair::{MatchupStat, MatchupTable, SynergyStat, SynergyTable};
pub use solo::{SoloStat, SoloTable};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("unexpected table layout: {message}")]
    Shape { message: String },
}

/// Outcome of loading one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TableStatus {
    /// No path configured.
    #[default]
    Absent,
    Loaded { entries: usize },
    Failed { reason: String },
}

impl TableStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, TableStatus::Loaded { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableStatuses {
    pub solo: TableStatus,
    pub synergy: TableStatus,
    pub matchup: TableStatus,
    pub combo: TableStatus,
    pub bans: TableStatus,
}

/// All loaded tables. Missing or failed tables are empty.
#[derive(Debug, Clone, Default)]
pub struct StatTables {
    pub solo: SoloTable,
    pub synergy: SynergyTable,
    pub matchup: MatchupTable,
    pub combos: ComboTable,
    pub bans: BanTable,
    pub status: TableStatuses,
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value, TableError> {
    let content = std::fs::read_to_string(path).map_err(|e| TableError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| TableError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

pub fn load_solo(path: &Path, names: &NameIndex) -> Result<SoloTable, TableError> {
    SoloTable::from_value(&read_json(path)?, names)
}

pub fn load_synergy(path: &Path, names: &NameIndex) -> Result<SynergyTable, TableError> {
    SynergyTable::from_value(&read_json(path)?, names)
}

pub fn load_matchup(path: &Path, names: &NameIndex) -> Result<MatchupTable, TableError> {
    MatchupTable::from_value(&read_json(path)?, names)
}

pub fn load_combos(path: &Path, names: &NameIndex) -> Result<ComboTable, TableError> {
    ComboTable::from_value(&read_json(path)?, names)
}

pub fn load_bans(path: &Path, names: &NameIndex) -> Result<BanTable, TableError> {
    BanTable::from_value(&read_json(path)?, names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("riftdraft_tables_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn read_json_reports_io_and_parse_errors() {
        let missing = Path::new("/nonexistent/riftdraft/solo.json");
        assert!(matches!(read_json(missing), Err(TableError::Io { .. })));

        let bad = temp_file("bad.json", "{not json");
        let err = read_json(&bad).unwrap_err();
        assert!(matches!(err, TableError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn load_solo_from_file() {
        let path = temp_file("solo.json", r#"{"Ahri": {"MIDDLE": {"win_rate": 51.5, "games": 10}}}"#);
        let names = NameIndex::new(["Ahri"]);
        let table = load_solo(&path, &names).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn status_serializes_with_state_tag() {
        let json = serde_json::to_value(TableStatus::Loaded { entries: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({"state": "loaded", "entries": 3}));
        let json = serde_json::to_value(TableStatus::Absent).unwrap();
        assert_eq!(json, serde_json::json!({"state": "absent"}));
        assert!(!TableStatus::Failed { reason: "x".into() }.is_loaded());
    }
}
