// Matchup rows: every team pick against every enemy pick.

use std::cmp::Ordering;

use serde::Serialize;

use crate::champion::NameIndex;
use crate::draft::context::{DraftContext, MatchupVisibility};
use crate::draft::role::Role;
use crate::draft::state::Pick;
use crate::tables::{MatchupStat, MatchupTable};

/// Deltas beyond this many points (either sign) are decisive.
pub const DECISIVE_DELTA: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchupClass {
    Favorable,
    Even,
    Unfavorable,
}

impl MatchupClass {
    pub fn of(delta: f64) -> Self {
        if delta > DECISIVE_DELTA {
            MatchupClass::Favorable
        } else if delta < -DECISIVE_DELTA {
            MatchupClass::Unfavorable
        } else {
            MatchupClass::Even
        }
    }

    pub fn visible(&self, visibility: &MatchupVisibility) -> bool {
        match self {
            MatchupClass::Favorable => visibility.favorable,
            MatchupClass::Even => visibility.even,
            MatchupClass::Unfavorable => visibility.unfavorable,
        }
    }
}

/// One ally-vs-enemy fact, from the ally's perspective.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupRow {
    pub ally: String,
    pub ally_role: Role,
    pub enemy: String,
    pub enemy_role: Role,
    pub delta: f64,
    pub win_rate: Option<f64>,
    pub early_win_rate: Option<f64>,
    pub games: Option<f64>,
    /// The row's roles are the roles actually selected for both picks.
    pub matches_selection: bool,
    pub class: MatchupClass,
}

fn complement(rate: Option<f64>) -> Option<f64> {
    rate.map(|r| 100.0 - r)
}

/// Ordering for duplicates of one (ally, enemy) pair: selection-matching
/// first, then larger magnitude, then larger sample.
fn better_row(a: &MatchupRow, b: &MatchupRow) -> Ordering {
    a.matches_selection
        .cmp(&b.matches_selection)
        .then_with(|| a.delta.abs().total_cmp(&b.delta.abs()))
        .then_with(|| a.games.unwrap_or(0.0).total_cmp(&b.games.unwrap_or(0.0)))
}

/// All candidate rows for one pair, forward and mirrored.
fn candidates(
    table: &MatchupTable,
    ally: &Pick,
    enemy: &Pick,
    names: &NameIndex,
) -> Vec<MatchupRow> {
    let mut rows = Vec::new();
    let mut push = |ally_role: Role, enemy_role: Role, stat: &MatchupStat, mirrored: bool| {
        let (delta, win_rate, early_win_rate) = if mirrored {
            (-stat.delta, complement(stat.win_rate), complement(stat.early_win_rate))
        } else {
            (stat.delta, stat.win_rate, stat.early_win_rate)
        };
        rows.push(MatchupRow {
            ally: ally.champion.clone(),
            ally_role,
            enemy: enemy.champion.clone(),
            enemy_role,
            delta,
            win_rate,
            early_win_rate,
            games: stat.games,
            matches_selection: ally_role == ally.role && enemy_role == enemy.role,
            class: MatchupClass::of(delta),
        });
    };

    for (role, buckets) in table.roles(&ally.champion, names) {
        for (opp_role, bucket) in buckets {
            if let Some(stat) = bucket.get(&enemy.champion, names) {
                push(
                    stat.self_role.unwrap_or(role),
                    stat.enemy_role.unwrap_or(*opp_role),
                    stat,
                    false,
                );
            }
        }
    }
    for (role, buckets) in table.roles(&enemy.champion, names) {
        for (opp_role, bucket) in buckets {
            if let Some(stat) = bucket.get(&ally.champion, names) {
                push(
                    stat.enemy_role.unwrap_or(*opp_role),
                    stat.self_role.unwrap_or(role),
                    stat,
                    true,
                );
            }
        }
    }
    rows
}

/// One row per (ally, enemy) pair that has any data, in pick order.
pub fn build_matchup_rows(
    table: &MatchupTable,
    team: &[Pick],
    enemy: &[Pick],
    names: &NameIndex,
) -> Vec<MatchupRow> {
    let mut rows = Vec::new();
    for ally in team {
        for opponent in enemy {
            let mut best: Option<MatchupRow> = None;
            for row in candidates(table, ally, opponent, names) {
                let replace = best
                    .as_ref()
                    .map_or(true, |current| better_row(&row, current) == Ordering::Greater);
                if replace {
                    best = Some(row);
                }
            }
            rows.extend(best);
        }
    }
    rows
}

/// Rows that feed the matchup and early scores.
pub fn scoring_rows(rows: &[MatchupRow]) -> impl Iterator<Item = &MatchupRow> {
    rows.iter().filter(|r| r.matches_selection)
}

/// The displayed matchup list: visible classes only, best deltas first.
pub fn matchup_panel(rows: &[MatchupRow], ctx: &DraftContext) -> Vec<MatchupRow> {
    let mut shown: Vec<MatchupRow> = rows
        .iter()
        .filter(|r| r.class.visible(&ctx.visibility))
        .cloned()
        .collect();
    shown.sort_by(|a, b| {
        b.delta
            .total_cmp(&a.delta)
            .then_with(|| b.games.unwrap_or(0.0).total_cmp(&a.games.unwrap_or(0.0)))
            .then_with(|| a.ally.cmp(&b.ally))
            .then_with(|| a.enemy.cmp(&b.enemy))
    });
    shown.truncate(ctx.display_count);
    shown
}
