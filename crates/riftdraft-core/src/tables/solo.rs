// Per-champion, per-role solo win rates.
//
// Layout: `{champion: {ROLE: {win_rate, games, ...}}}`.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use super::keyed::ChampionMap;
use super::numeric::{games_field, percent_field};
use super::TableError;
use crate::champion::NameIndex;
use crate::draft::role::Role;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoloStat {
    /// Percent, 0–100.
    pub win_rate: Option<f64>,
    pub games: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct SoloTable {
    champions: ChampionMap<BTreeMap<Role, SoloStat>>,
}

impl SoloTable {
    pub fn from_value(value: &Value, names: &NameIndex) -> Result<Self, TableError> {
        let root = value.as_object().ok_or_else(|| TableError::Shape {
            message: "solo table must be a JSON object keyed by champion".into(),
        })?;

        let mut champions = ChampionMap::new();
        for (champion, by_role) in root {
            let Some(by_role) = by_role.as_object() else {
                warn!("solo table: skipping '{}', expected an object of roles", champion);
                continue;
            };
            let mut roles = BTreeMap::new();
            for (role_key, record) in by_role {
                let Ok(role) = Role::parse(role_key) else {
                    warn!("solo table: unknown role '{}' for '{}'", role_key, champion);
                    continue;
                };
                let Some(record) = record.as_object() else {
                    continue;
                };
                roles.insert(
                    role,
                    SoloStat {
                        win_rate: percent_field(record, &["win_rate", "winrate"]),
                        games: games_field(record),
                    },
                );
            }
            champions.insert(champion, roles, names);
        }
        Ok(SoloTable { champions })
    }

    pub fn get(&self, champion: &str, role: Role, names: &NameIndex) -> Option<&SoloStat> {
        self.champions.get(champion, names)?.get(&role)
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_roles_and_normalizes_rates() {
        let names = NameIndex::new(["Ahri", "Garen"]);
        let table = SoloTable::from_value(
            &json!({
                "Ahri": {"MIDDLE": {"win_rate": 0.52, "games": 1200}},
                "garen": {"TOP": {"win_rate": 50.5, "win_rate_weighted": 51.0, "games": "300"},
                          "mid": {"win_rate": 47.0}}
            }),
            &names,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        let ahri = table.get("ahri", Role::Middle, &names).unwrap();
        assert_eq!(ahri.win_rate, Some(52.0));
        assert_eq!(ahri.games, Some(1200.0));

        let garen_top = table.get("Garen", Role::Top, &names).unwrap();
        assert_eq!(garen_top.win_rate, Some(51.0));
        assert_eq!(garen_top.games, Some(300.0));

        let garen_mid = table.get("Garen", Role::Middle, &names).unwrap();
        assert_eq!(garen_mid.games, None);
        assert!(table.get("Garen", Role::Utility, &names).is_none());
    }

    #[test]
    fn skips_unknown_roles_and_bad_shapes() {
        let names = NameIndex::default();
        let table = SoloTable::from_value(
            &json!({"Zed": {"FLEX": {"win_rate": 50}, "MIDDLE": 3}, "Lux": []}),
            &names,
        )
        .unwrap();
        assert!(table.get("Zed", Role::Middle, &names).is_none());
        assert!(table.get("Lux", Role::Middle, &names).is_none());
    }

    #[test]
    fn rejects_non_object_root() {
        let err = SoloTable::from_value(&json!([1, 2]), &NameIndex::default()).unwrap_err();
        assert!(matches!(err, TableError::Shape { .. }));
    }
}
