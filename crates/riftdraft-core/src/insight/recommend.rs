// Synergy recommendations for the team side.
//
// Three shapes depending on the draft:
// - no team picks: nothing to recommend from;
// - team complete: the synergies among the five picks;
// - otherwise candidates drawn from the teammates' synergy tables, either
//   best single pairing per candidate (free mode) or, when the lane filter
//   names an open role, every teammate's contribution aggregated.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::score::role_weight;
use super::synergy::pair_synergy;
use super::DataSnapshot;
use crate::draft::context::DraftContext;
use crate::draft::role::{LaneFilter, Role, Side};
use crate::draft::state::{DraftState, Pick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "role", rename_all = "snake_case")]
pub enum RecommendationMode {
    Free,
    LaneAggregate(Role),
}

/// One teammate's part in an aggregated suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub teammate: Pick,
    pub delta: f64,
    pub win_rate: Option<f64>,
    pub games: f64,
    /// games × role weight.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynergySuggestion {
    pub partner: String,
    pub partner_role: Role,
    /// Teammates the numbers come from.
    pub sources: Vec<Pick>,
    pub delta: f64,
    pub win_rate: Option<f64>,
    pub games: Option<f64>,
    /// The partner's role is still open on the team.
    pub fills_missing_role: bool,
    pub is_aggregate: bool,
    pub contributions: Vec<Contribution>,
}

/// Synergy between two existing picks, listed once the team is complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPair {
    pub first: Pick,
    pub second: Pick,
    pub delta: f64,
    pub win_rate: Option<f64>,
    pub games: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SynergyPanel {
    InsufficientSelection,
    Suggestions {
        mode: RecommendationMode,
        items: Vec<SynergySuggestion>,
    },
    TeamComplete {
        pairs: Vec<TeamPair>,
    },
}

fn by_games_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(0.0).total_cmp(&a.unwrap_or(0.0))
}

/// Display order: open-role fillers first, then delta, then sample size.
fn rank(a: &SynergySuggestion, b: &SynergySuggestion) -> Ordering {
    b.fills_missing_role
        .cmp(&a.fills_missing_role)
        .then_with(|| b.delta.total_cmp(&a.delta))
        .then_with(|| by_games_desc(a.games, b.games))
        .then_with(|| a.partner.cmp(&b.partner))
        .then_with(|| a.partner_role.cmp(&b.partner_role))
}

/// Same criteria as `rank`, as "is `a` the better pairing".
fn better_pairing(a: &SynergySuggestion, b: &SynergySuggestion) -> bool {
    a.fills_missing_role
        .cmp(&b.fills_missing_role)
        .then_with(|| a.delta.total_cmp(&b.delta))
        .then_with(|| by_games_desc(b.games, a.games))
        == Ordering::Greater
}

/// Candidate partners offered by the teammates' tables, optionally limited to
/// one partner role, minus anything already picked or banned. Sorted and
/// deduplicated.
fn candidates(
    snapshot: &DataSnapshot,
    state: &DraftState,
    team: &[Pick],
    only_role: Option<Role>,
) -> Vec<(String, Role)> {
    let mut out = Vec::new();
    for mate in team {
        let Some(buckets) = snapshot
            .tables
            .synergy
            .buckets(&mate.champion, mate.role, &snapshot.names)
        else {
            continue;
        };
        for (role, bucket) in buckets {
            if only_role.is_some_and(|r| r != *role) {
                continue;
            }
            for (name, _) in bucket.iter() {
                if state.find_pick(name).is_none() && !state.is_banned(name) {
                    out.push((name.to_string(), *role));
                }
            }
        }
    }
    out.sort();
    out.dedup();
    out
}

fn free_mode(
    snapshot: &DataSnapshot,
    state: &DraftState,
    team: &[Pick],
    ctx: &DraftContext,
) -> Vec<SynergySuggestion> {
    let open = state.open_roles(Side::Team);
    let mut best: BTreeMap<String, SynergySuggestion> = BTreeMap::new();

    for (candidate, role) in candidates(snapshot, state, team, None) {
        for mate in team {
            let Some(pair) = pair_synergy(
                &snapshot.tables.synergy,
                &mate.champion,
                mate.role,
                &candidate,
                role,
                &snapshot.names,
            ) else {
                continue;
            };
            if pair.games.unwrap_or(0.0) < ctx.min_synergy_games {
                continue;
            }
            let suggestion = SynergySuggestion {
                partner: candidate.clone(),
                partner_role: role,
                sources: vec![mate.clone()],
                delta: pair.delta,
                win_rate: pair.win_rate,
                games: pair.games,
                fills_missing_role: open.contains(&role),
                is_aggregate: false,
                contributions: Vec::new(),
            };
            let replace = best
                .get(&candidate)
                .map_or(true, |current| better_pairing(&suggestion, current));
            if replace {
                best.insert(candidate.clone(), suggestion);
            }
        }
    }
    best.into_values().collect()
}

fn lane_aggregate(
    snapshot: &DataSnapshot,
    state: &DraftState,
    team: &[Pick],
    lane: Role,
    ctx: &DraftContext,
) -> Vec<SynergySuggestion> {
    let mut out = Vec::new();
    for (candidate, _) in candidates(snapshot, state, team, Some(lane)) {
        let contributions: Vec<Contribution> = team
            .iter()
            .filter_map(|mate| {
                let pair = pair_synergy(
                    &snapshot.tables.synergy,
                    &mate.champion,
                    mate.role,
                    &candidate,
                    lane,
                    &snapshot.names,
                )?;
                let games = pair.games.filter(|g| *g >= ctx.min_synergy_games)?;
                Some(Contribution {
                    teammate: mate.clone(),
                    delta: pair.delta,
                    win_rate: pair.win_rate,
                    games,
                    weight: games * role_weight(mate.role, lane),
                })
            })
            .collect();
        if contributions.is_empty() {
            continue;
        }

        let total_weight: f64 = contributions.iter().map(|c| c.weight).sum();
        if total_weight <= 0.0 {
            continue;
        }
        let delta = contributions.iter().map(|c| c.delta * c.weight).sum::<f64>() / total_weight;
        let rated: Vec<&Contribution> = contributions.iter().filter(|c| c.win_rate.is_some()).collect();
        let rated_weight: f64 = rated.iter().map(|c| c.weight).sum();
        let win_rate = (rated_weight > 0.0).then(|| {
            rated
                .iter()
                .map(|c| c.win_rate.unwrap_or(0.0) * c.weight)
                .sum::<f64>()
                / rated_weight
        });

        out.push(SynergySuggestion {
            partner: candidate,
            partner_role: lane,
            sources: contributions.iter().map(|c| c.teammate.clone()).collect(),
            delta,
            win_rate,
            games: Some(contributions.iter().map(|c| c.games).sum()),
            fills_missing_role: true,
            is_aggregate: true,
            contributions,
        });
    }
    out
}

fn team_pairs(snapshot: &DataSnapshot, team: &[Pick], ctx: &DraftContext) -> Vec<TeamPair> {
    let mut pairs = Vec::new();
    for (i, a) in team.iter().enumerate() {
        for b in &team[i + 1..] {
            if let Some(p) = pair_synergy(
                &snapshot.tables.synergy,
                &a.champion,
                a.role,
                &b.champion,
                b.role,
                &snapshot.names,
            ) {
                pairs.push(TeamPair {
                    first: a.clone(),
                    second: b.clone(),
                    delta: p.delta,
                    win_rate: p.win_rate,
                    games: p.games,
                });
            }
        }
    }
    pairs.sort_by(|a, b| {
        b.delta
            .total_cmp(&a.delta)
            .then_with(|| by_games_desc(a.games, b.games))
    });
    pairs.truncate(ctx.display_count);
    pairs
}

/// The synergy panel for the team side.
pub fn recommend_synergies(
    snapshot: &DataSnapshot,
    state: &DraftState,
    ctx: &DraftContext,
) -> SynergyPanel {
    let team = state.picks(Side::Team);
    if team.is_empty() {
        return SynergyPanel::InsufficientSelection;
    }
    if state.is_complete(Side::Team) {
        return SynergyPanel::TeamComplete {
            pairs: team_pairs(snapshot, &team, ctx),
        };
    }

    let lane = match ctx.lane_filter {
        LaneFilter::Only(role) if state.pick_at(Side::Team, role).is_none() => Some(role),
        LaneFilter::Only(role) => {
            debug!("lane filter {} already filled, recommending freely", role);
            None
        }
        LaneFilter::All => None,
    };

    let (mode, mut items) = match lane {
        Some(role) => (
            RecommendationMode::LaneAggregate(role),
            lane_aggregate(snapshot, state, &team, role, ctx),
        ),
        None => (
            RecommendationMode::Free,
            free_mode(snapshot, state, &team, ctx),
        ),
    };
    items.sort_by(rank);
    items.truncate(ctx.display_count);
    SynergyPanel::Suggestions { mode, items }
}
