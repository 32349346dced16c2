// Side scores: four 0-100 components and their fixed-weight aggregate.
//
// Every component is neutral (50) without data. Weights and clamps are
// fixed empirical constants.

use serde::Serialize;

use super::matchup::{scoring_rows, MatchupRow, DECISIVE_DELTA};
use super::synergy::pair_synergy;
use crate::champion::NameIndex;
use crate::draft::role::Role;
use crate::draft::state::Pick;
use crate::tables::StatTables;

pub const NEUTRAL_SCORE: u8 = 50;
const NEUTRAL_WIN_RATE: f64 = 50.0;

/// Per-pair synergy deltas are clamped to this magnitude.
pub const SYNERGY_DELTA_CAP: f64 = 10.0;
/// Points of score per point of average synergy delta.
const SYNERGY_SCALE: f64 = 5.0;
/// Early-game advantage (win rate minus 50) is clamped to this magnitude.
pub const EARLY_ADVANTAGE_CAP: f64 = 20.0;

/// Aggregate weights in whole percent; they sum to exactly 100.
pub const SOLO_WEIGHT: u32 = 30;
pub const SYNERGY_WEIGHT: u32 = 30;
pub const MATCHUP_WEIGHT: u32 = 30;
pub const EARLY_WEIGHT: u32 = 10;
const WEIGHT_TOTAL: u32 = SOLO_WEIGHT + SYNERGY_WEIGHT + MATCHUP_WEIGHT + EARLY_WEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreComponents {
    pub solo: u8,
    pub synergy: u8,
    pub matchup: u8,
    pub early: u8,
}

impl Default for ScoreComponents {
    fn default() -> Self {
        ScoreComponents {
            solo: NEUTRAL_SCORE,
            synergy: NEUTRAL_SCORE,
            matchup: NEUTRAL_SCORE,
            early: NEUTRAL_SCORE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SideScore {
    pub total: u8,
    pub components: ScoreComponents,
}

impl SideScore {
    pub fn from_components(components: ScoreComponents) -> Self {
        SideScore {
            total: aggregate_score(
                components.solo,
                components.synergy,
                components.matchup,
                components.early,
            ),
            components,
        }
    }
}

/// Round and clamp to [0, 100]; non-finite input is neutral.
pub fn to_score(value: f64) -> u8 {
    if !value.is_finite() {
        return NEUTRAL_SCORE;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Weighted mean of (value, weight) pairs; `None` when the total weight is
/// not positive.
fn weighted_mean<I: IntoIterator<Item = (f64, f64)>>(items: I) -> Option<f64> {
    let (sum, weight) = items
        .into_iter()
        .fold((0.0, 0.0), |(s, w), (value, weight)| (s + value * weight, w + weight));
    (weight > 0.0).then(|| sum / weight)
}

/// How much a synergy between two roles counts. Symmetric; lane partners and
/// jungle-lane pairs weigh most.
pub fn role_weight(a: Role, b: Role) -> f64 {
    use Role::*;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match (lo, hi) {
        (Top, Jungle) | (Jungle, Middle) | (Bottom, Utility) => 1.3,
        (Jungle, Utility) => 1.15,
        (Middle, Utility) | (Jungle, Bottom) => 1.1,
        (Top, Middle) | (Middle, Bottom) => 1.05,
        _ => 1.0,
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// Sample-weighted mean of each pick's win rate in its role. Picks without
/// data count as a 50% win rate with weight 1.
pub fn solo_score(picks: &[Pick], tables: &StatTables, names: &NameIndex) -> u8 {
    let mean = weighted_mean(picks.iter().map(|p| {
        let stat = tables.solo.get(&p.champion, p.role, names);
        let win_rate = stat.and_then(|s| s.win_rate).unwrap_or(NEUTRAL_WIN_RATE);
        let games = stat.and_then(|s| s.games).unwrap_or(1.0);
        (win_rate, games)
    }));
    mean.map_or(NEUTRAL_SCORE, to_score)
}

/// Role-weighted mean synergy delta over every pair of picks, scaled
/// around 50.
pub fn synergy_score(picks: &[Pick], tables: &StatTables, names: &NameIndex) -> u8 {
    if picks.len() < 2 {
        return NEUTRAL_SCORE;
    }
    let mut pairs = Vec::new();
    for (i, a) in picks.iter().enumerate() {
        for b in &picks[i + 1..] {
            if let Some(p) = pair_synergy(&tables.synergy, &a.champion, a.role, &b.champion, b.role, names) {
                let weight = p.games.unwrap_or(1.0) * role_weight(a.role, b.role);
                pairs.push((p.delta.clamp(-SYNERGY_DELTA_CAP, SYNERGY_DELTA_CAP), weight));
            }
        }
    }
    weighted_mean(pairs).map_or(NEUTRAL_SCORE, |avg| to_score(50.0 + avg * SYNERGY_SCALE))
}

/// Share of decisive matchups (by games) won minus lost, scaled around 50.
pub fn matchup_score(rows: &[MatchupRow]) -> u8 {
    let mut favorable = 0.0;
    let mut unfavorable = 0.0;
    let mut total = 0.0;
    for row in scoring_rows(rows) {
        let weight = row.games.unwrap_or(1.0);
        total += weight;
        if row.delta > DECISIVE_DELTA {
            favorable += weight;
        } else if row.delta < -DECISIVE_DELTA {
            unfavorable += weight;
        }
    }
    if total <= 0.0 {
        return NEUTRAL_SCORE;
    }
    to_score(50.0 + 50.0 * (favorable - unfavorable) / total)
}

/// Game-weighted early-game advantage, scaled so a capped advantage maps to
/// 0 or 100.
pub fn early_score(rows: &[MatchupRow]) -> u8 {
    let mean = weighted_mean(scoring_rows(rows).filter_map(|row| {
        let early = row.early_win_rate?;
        let advantage = (early - NEUTRAL_WIN_RATE).clamp(-EARLY_ADVANTAGE_CAP, EARLY_ADVANTAGE_CAP);
        Some((advantage, row.games.unwrap_or(1.0)))
    }));
    mean.map_or(NEUTRAL_SCORE, |avg| to_score(50.0 + 50.0 * avg / EARLY_ADVANTAGE_CAP))
}

/// Fixed-weight combination of the four components.
pub fn aggregate_score(solo: u8, synergy: u8, matchup: u8, early: u8) -> u8 {
    // Integer arithmetic so exact halves round up.
    let weighted = SOLO_WEIGHT * u32::from(solo.min(100))
        + SYNERGY_WEIGHT * u32::from(synergy.min(100))
        + MATCHUP_WEIGHT * u32::from(matchup.min(100))
        + EARLY_WEIGHT * u32::from(early.min(100));
    let rounded = (weighted + WEIGHT_TOTAL / 2) / WEIGHT_TOTAL;
    rounded.min(100) as u8
}

/// Scores for both sides. Matchup rows are from the team's perspective; the
/// enemy's matchup and early components are their complements, while solo
/// and synergy are computed per side.
pub fn side_scores(
    team: &[Pick],
    enemy: &[Pick],
    rows: &[MatchupRow],
    tables: &StatTables,
    names: &NameIndex,
) -> (SideScore, SideScore) {
    let matchup = matchup_score(rows);
    let early = early_score(rows);
    let team_score = SideScore::from_components(ScoreComponents {
        solo: solo_score(team, tables, names),
        synergy: synergy_score(team, tables, names),
        matchup,
        early,
    });
    let enemy_score = SideScore::from_components(ScoreComponents {
        solo: solo_score(enemy, tables, names),
        synergy: synergy_score(enemy, tables, names),
        matchup: 100 - matchup,
        early: 100 - early,
    });
    (team_score, enemy_score)
}
