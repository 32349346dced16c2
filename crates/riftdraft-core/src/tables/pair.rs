// Pairwise tables: synergy (ally partners) and matchup (lane opponents).
//
// Both share one layout, stored from the "self" champion's perspective:
// `{champion: {ROLE: {OTHER_ROLE: {other_champion: record}}}}`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::keyed::ChampionMap;
use super::numeric::{games_field, number_field, percent_field, role_field};
use super::TableError;
use crate::champion::NameIndex;
use crate::draft::role::Role;

/// Records of one champion in one role, bucketed by the other side's role.
pub type RoleBuckets<R> = BTreeMap<Role, ChampionMap<R>>;

/// One directional synergy fact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynergyStat {
    /// Signed percentage points.
    pub delta: f64,
    /// Duo win rate, percent.
    pub win_rate: Option<f64>,
    pub games: Option<f64>,
    /// Role the record says the "self" champion played, when reported.
    pub self_role: Option<Role>,
    /// Role the record says the partner played, when reported.
    pub ally_role: Option<Role>,
}

/// One directional matchup fact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchupStat {
    pub delta: f64,
    /// Counter win rate, percent.
    pub win_rate: Option<f64>,
    /// Early-game win rate, percent.
    pub early_win_rate: Option<f64>,
    pub games: Option<f64>,
    pub self_role: Option<Role>,
    pub enemy_role: Option<Role>,
}

/// Parses one leaf record; `None` means the record is unusable.
pub trait PairRecord: Sized {
    const TABLE: &'static str;
    fn from_record(record: &Map<String, Value>) -> Option<Self>;
}

impl PairRecord for SynergyStat {
    const TABLE: &'static str = "synergy";

    fn from_record(record: &Map<String, Value>) -> Option<Self> {
        Some(SynergyStat {
            delta: number_field(record, &["synergy_delta", "delta"])?,
            win_rate: percent_field(record, &["duo_win_rate", "win_rate"]),
            games: games_field(record),
            self_role: role_field(record, &["self_role", "role"]),
            ally_role: role_field(record, &["ally_role", "partner_role"]),
        })
    }
}

impl PairRecord for MatchupStat {
    const TABLE: &'static str = "matchup";

    fn from_record(record: &Map<String, Value>) -> Option<Self> {
        Some(MatchupStat {
            delta: number_field(record, &["matchup_delta", "delta"])?,
            win_rate: percent_field(record, &["counter_win_rate", "win_rate"]),
            early_win_rate: percent_field(record, &["early_win_rate", "early_winrate"]),
            games: games_field(record),
            self_role: role_field(record, &["self_role", "role"]),
            enemy_role: role_field(record, &["enemy_role", "opponent_role"]),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PairTable<R> {
    champions: ChampionMap<BTreeMap<Role, RoleBuckets<R>>>,
}

impl<R> Default for PairTable<R> {
    fn default() -> Self {
        PairTable {
            champions: ChampionMap::new(),
        }
    }
}

pub type SynergyTable = PairTable<SynergyStat>;
pub type MatchupTable = PairTable<MatchupStat>;

fn parse_role(key: &str, table: &str, champion: &str) -> Option<Role> {
    match Role::parse(key) {
        Ok(role) => Some(role),
        Err(_) => {
            warn!("{} table: unknown role '{}' under '{}'", table, key, champion);
            None
        }
    }
}

impl<R: PairRecord> PairTable<R> {
    pub fn from_value(value: &Value, names: &NameIndex) -> Result<Self, TableError> {
        let root = value.as_object().ok_or_else(|| TableError::Shape {
            message: format!("{} table must be a JSON object keyed by champion", R::TABLE),
        })?;

        let mut champions = ChampionMap::new();
        let mut dropped = 0usize;

        for (champion, by_role) in root {
            let Some(by_role) = by_role.as_object() else {
                warn!("{} table: skipping '{}', expected an object of roles", R::TABLE, champion);
                continue;
            };
            let mut roles = BTreeMap::new();
            for (role_key, by_other_role) in by_role {
                let Some(role) = parse_role(role_key, R::TABLE, champion) else {
                    continue;
                };
                let Some(by_other_role) = by_other_role.as_object() else {
                    continue;
                };
                let mut buckets: RoleBuckets<R> = BTreeMap::new();
                for (other_role_key, others) in by_other_role {
                    let Some(other_role) = parse_role(other_role_key, R::TABLE, champion) else {
                        continue;
                    };
                    let Some(others) = others.as_object() else {
                        continue;
                    };
                    let mut bucket = ChampionMap::new();
                    for (other, record) in others {
                        match record.as_object().and_then(R::from_record) {
                            Some(stat) => bucket.insert(other, stat, names),
                            None => dropped += 1,
                        }
                    }
                    buckets.insert(other_role, bucket);
                }
                roles.insert(role, buckets);
            }
            champions.insert(champion, roles, names);
        }

        if dropped > 0 {
            debug!("{} table: dropped {} records without a usable delta", R::TABLE, dropped);
        }
        Ok(PairTable { champions })
    }
}

impl<R> PairTable<R> {
    /// All role buckets of `champion` playing `role`.
    pub fn buckets(&self, champion: &str, role: Role, names: &NameIndex) -> Option<&RoleBuckets<R>> {
        self.champions.get(champion, names)?.get(&role)
    }

    /// Every (role, buckets) entry of `champion`, in role order.
    pub fn roles(
        &self,
        champion: &str,
        names: &NameIndex,
    ) -> impl Iterator<Item = (Role, &RoleBuckets<R>)> {
        self.champions
            .get(champion, names)
            .into_iter()
            .flat_map(|roles| roles.iter().map(|(role, buckets)| (*role, buckets)))
    }

    /// The record `champion`@`role` holds about `other`@`other_role`, with
    /// the stored display name of `other`.
    pub fn get(
        &self,
        champion: &str,
        role: Role,
        other: &str,
        other_role: Role,
        names: &NameIndex,
    ) -> Option<(&str, &R)> {
        self.buckets(champion, role, names)?
            .get(&other_role)?
            .get_entry(other, names)
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

    fn names() -> NameIndex {
        NameIndex::new(["Ahri", "Lee Sin", "Zed", "Wukong"])
    }

    #[test]
    fn synergy_layout_parses() {
        let names = names();
        let table = SynergyTable::from_value(
            &json!({
                "Ahri": {"MIDDLE": {"JUNGLE": {
                    "LeeSin": {"synergy_delta": 2.5, "duo_win_rate": 0.53, "games": 400,
                               "self_role": "MIDDLE", "ally_role": "JUNGLE"},
                    "MonkeyKing": {"delta": "-1.5", "games_weighted": 90.5, "games": 100}
                }}}
            }),
            &names,
        )
        .unwrap();

        let (name, lee) = table
            .get("ahri", Role::Middle, "Lee Sin", Role::Jungle, &names)
            .unwrap();
        assert_eq!(name, "Lee Sin");
        assert_eq!(lee.delta, 2.5);
        assert_eq!(lee.win_rate, Some(53.0));
        assert_eq!(lee.games, Some(400.0));
        assert_eq!(lee.self_role, Some(Role::Middle));
        assert_eq!(lee.ally_role, Some(Role::Jungle));

        let (name, wu) = table
            .get("Ahri", Role::Middle, "wukong", Role::Jungle, &names)
            .unwrap();
        assert_eq!(name, "Wukong");
        assert_eq!(wu.delta, -1.5);
        assert_eq!(wu.games, Some(90.5));
        assert_eq!(wu.self_role, None);
    }

    #[test]
    fn records_without_delta_are_dropped() {
        let names = names();
        let table = SynergyTable::from_value(
            &json!({"Ahri": {"MIDDLE": {"JUNGLE": {"Zed": {"games": 100}, "Lee Sin": {"delta": null}}}}}),
            &names,
        )
        .unwrap();
        assert!(table.get("Ahri", Role::Middle, "Zed", Role::Jungle, &names).is_none());
        let buckets = table.buckets("Ahri", Role::Middle, &names).unwrap();
        assert!(buckets.get(&Role::Jungle).unwrap().is_empty());
    }

    #[test]
    fn matchup_layout_parses() {
        let names = names();
        let table = MatchupTable::from_value(
            &json!({"Zed": {"MID": {"MIDDLE": {"Ahri": {
                "matchup_delta": 3.2, "counter_win_rate": 54.0, "early_win_rate_weighted": 0.75,
                "early_win_rate": 0.5, "games": 250, "enemy_role": "MIDDLE"
            }}}}}),
            &names,
        )
        .unwrap();
        let (_, m) = table
            .get("Zed", Role::Middle, "Ahri", Role::Middle, &names)
            .unwrap();
        assert_eq!(m.delta, 3.2);
        assert_eq!(m.win_rate, Some(54.0));
        assert_eq!(m.early_win_rate, Some(75.0));
        assert_eq!(m.enemy_role, Some(Role::Middle));
    }

    #[test]
    fn roles_iterates_in_role_order() {
        let names = names();
        let table = MatchupTable::from_value(
            &json!({"Zed": {
                "MIDDLE": {"MIDDLE": {"Ahri": {"delta": 1}}},
                "TOP": {"TOP": {"Ahri": {"delta": 2}}}
            }}),
            &names,
        )
        .unwrap();
        let roles: Vec<Role> = table.roles("zed", &names).map(|(r, _)| r).collect();
        assert_eq!(roles, vec![Role::Top, Role::Middle]);
        assert_eq!(table.roles("nobody", &names).count(), 0);
    }

    #[test]
    fn shape_error_names_table() {
        let err = MatchupTable::from_value(&json!("nope"), &names()).unwrap_err();
        assert!(err.to_string().contains("matchup"));
    }
}
