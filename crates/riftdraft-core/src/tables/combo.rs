// Team combos: sets of two or three champions with an aggregate win rate.
//
// Accepted shapes: a bare array of combo objects, or `{"combos": [...]}`.
// Members are either plain names (roles then come from a parallel `roles`
// array, when present) or `{champion, role}` objects.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::numeric::{games_field, percent_field};
use super::TableError;
use crate::champion::NameIndex;
use crate::draft::role::Role;

pub const MIN_COMBO_SIZE: usize = 2;
pub const MAX_COMBO_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboMember {
    pub champion: String,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combo {
    pub members: Vec<ComboMember>,
    /// Percent.
    pub win_rate: Option<f64>,
    /// Occurrence count.
    pub games: Option<f64>,
}

impl Combo {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, champion: &str) -> bool {
        self.members.iter().any(|m| m.champion == champion)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComboTable {
    combos: Vec<Combo>,
}

fn parse_member(value: &Value, role_hint: Option<Role>, names: &NameIndex) -> Option<ComboMember> {
    let (raw, role) = match value {
        Value::String(s) => (s.as_str(), role_hint),
        Value::Object(obj) => {
            let raw = obj
                .get("champion")
                .or_else(|| obj.get("name"))
                .and_then(Value::as_str)?;
            let role = obj
                .get("role")
                .and_then(Value::as_str)
                .and_then(|r| Role::parse(r).ok())
                .or(role_hint);
            (raw, role)
        }
        _ => return None,
    };
    let champion = names.resolve(raw);
    (!champion.is_empty()).then_some(ComboMember { champion, role })
}

fn parse_combo(record: &Map<String, Value>, names: &NameIndex) -> Option<Combo> {
    let champions = record
        .get("champions")
        .or_else(|| record.get("members"))
        .and_then(Value::as_array)?;
    let roles: Vec<Option<Role>> = record
        .get("roles")
        .and_then(Value::as_array)
        .map(|roles| {
            roles
                .iter()
                .map(|r| r.as_str().and_then(|s| Role::parse(s).ok()))
                .collect()
        })
        .unwrap_or_default();

    let mut members = Vec::with_capacity(champions.len());
    for (i, value) in champions.iter().enumerate() {
        let member = parse_member(value, roles.get(i).copied().flatten(), names)?;
        if members.iter().any(|m: &ComboMember| m.champion == member.champion) {
            return None;
        }
        members.push(member);
    }
    if !(MIN_COMBO_SIZE..=MAX_COMBO_SIZE).contains(&members.len()) {
        return None;
    }

    Some(Combo {
        members,
        win_rate: percent_field(record, &["win_rate", "winrate"]),
        games: games_field(record),
    })
}

impl ComboTable {
    pub fn from_value(value: &Value, names: &NameIndex) -> Result<Self, TableError> {
        let list = match value {
            Value::Array(list) => list,
            Value::Object(obj) => obj
                .get("combos")
                .and_then(Value::as_array)
                .ok_or_else(|| TableError::Shape {
                    message: "combo table object must carry a `combos` array".into(),
                })?,
            _ => {
                return Err(TableError::Shape {
                    message: "combo table must be an array of combos".into(),
                })
            }
        };

        let mut combos = Vec::with_capacity(list.len());
        for (i, entry) in list.iter().enumerate() {
            match entry.as_object().and_then(|r| parse_combo(r, names)) {
                Some(combo) => combos.push(combo),
                None => warn!("combo table: skipping entry #{}", i),
            }
        }
        Ok(ComboTable { combos })
    }

    pub fn combos(&self) -> &[Combo] {
        &self.combos
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names() -> NameIndex {
        NameIndex::new(["Yasuo", "Malphite", "Diana", "Wukong"])
    }

    #[test]
    fn parses_string_and_object_members() {
        let names = names();
        let table = ComboTable::from_value(
            &json!([
                {"champions": ["yasuo", "Malphite"], "roles": ["MID", "TOP"],
                 "win_rate": 0.5, "occurrences": 320},
                {"champions": [{"champion": "MonkeyKing", "role": "JUNGLE"}, "Yasuo", "Diana"],
                 "win_rate_weighted": 57.5, "games": 40}
            ]),
            &names,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.combos()[0];
        assert_eq!(first.members[0].champion, "Yasuo");
        assert_eq!(first.members[0].role, Some(Role::Middle));
        assert_eq!(first.members[1].role, Some(Role::Top));
        assert_eq!(first.win_rate, Some(50.0));
        assert_eq!(first.games, Some(320.0));

        let second = &table.combos()[1];
        assert_eq!(second.size(), 3);
        assert_eq!(second.members[0].champion, "Wukong");
        assert_eq!(second.members[0].role, Some(Role::Jungle));
        assert_eq!(second.members[2].role, None);
        assert!(second.contains("Diana"));
        assert_eq!(second.win_rate, Some(57.5));
    }

    #[test]
    fn wrapped_object_is_accepted() {
        let table = ComboTable::from_value(
            &json!({"combos": [{"champions": ["Yasuo", "Diana"], "win_rate": 51}]}),
            &names(),
        )
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn invalid_sizes_and_duplicates_are_skipped() {
        let table = ComboTable::from_value(
            &json!([
                {"champions": ["Yasuo"]},
                {"champions": ["Yasuo", "Diana", "Malphite", "Wukong"]},
                {"champions": ["Yasuo", "yasuo"]},
                {"champions": "Yasuo"},
                7
            ]),
            &names(),
        )
        .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn rejects_scalar_root() {
        assert!(ComboTable::from_value(&json!(3), &names()).is_err());
        assert!(ComboTable::from_value(&json!({"other": []}), &names()).is_err());
    }
}
