// Per-champion ban rates.
//
// Layout: `{champion: {ban_rate, win_rate?, games?}}`.

use serde_json::Value;
use tracing::warn;

use super::keyed::ChampionMap;
use super::numeric::{games_field, percent_field};
use super::TableError;
use crate::champion::NameIndex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BanStat {
    /// Percent.
    pub ban_rate: f64,
    pub win_rate: Option<f64>,
    pub games: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct BanTable {
    champions: ChampionMap<BanStat>,
}

impl BanTable {
    pub fn from_value(value: &Value, names: &NameIndex) -> Result<Self, TableError> {
        let root = value.as_object().ok_or_else(|| TableError::Shape {
            message: "ban table must be a JSON object keyed by champion".into(),
        })?;

        let mut champions = ChampionMap::new();
        for (champion, record) in root {
            let stat = record.as_object().and_then(|r| {
                Some(BanStat {
                    ban_rate: percent_field(r, &["ban_rate", "banrate"])?,
                    win_rate: percent_field(r, &["win_rate", "winrate"]),
                    games: games_field(r),
                })
            });
            match stat {
                Some(stat) => champions.insert(champion, stat, names),
                None => warn!("ban table: skipping '{}', no usable ban rate", champion),
            }
        }
        Ok(BanTable { champions })
    }

    pub fn get(&self, champion: &str, names: &NameIndex) -> Option<&BanStat> {
        self.champions.get(champion, names)
    }

    /// Entries as (display name, stat), in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BanStat)> {
        self.champions.iter()
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }
}
