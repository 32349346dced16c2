// Insight engine: everything derived from the current draft.
//
// All functions here are pure over an immutable `DataSnapshot`, a
// `DraftState` and a `DraftContext`; picks or bans changing means calling
// `evaluate` again.

pub mod bans;
pub mod combos;
pub mod matchup;
pub mod recommend;
pub mod score;
pub mod synergy;

use serde::Serialize;
use tracing::debug;

use crate::champion::tags::{tag_cloud, TagCloud};
use crate::champion::{NameIndex, Roster};
use crate::draft::context::DraftContext;
use crate::draft::role::Side;
use crate::draft::state::DraftState;
use crate::tables::{StatTables, TableStatuses};

pub use bans::{recommend_bans, BanSuggestion};
pub use combos::{recommend_combos, ComboHighlight, ComboPanel};
pub use matchup::{build_matchup_rows, matchup_panel, MatchupClass, MatchupRow};
pub use recommend::{recommend_synergies, RecommendationMode, SynergyPanel, SynergySuggestion};
pub use score::{aggregate_score, ScoreComponents, SideScore};
pub use synergy::{pair_synergy, PairSynergy};

/// Loaded data, built once and shared read-only by every evaluation.
///
/// `names` must be the index the tables were parsed with.
#[derive(Debug, Clone, Default)]
pub struct DataSnapshot {
    pub roster: Roster,
    pub names: NameIndex,
    pub tables: StatTables,
}

/// Everything one side's panels show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideInsights {
    pub score: SideScore,
    pub tags: TagCloud,
    pub combos: ComboPanel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftInsights {
    pub team: SideInsights,
    pub enemy: SideInsights,
    pub synergy: SynergyPanel,
    pub matchups: Vec<MatchupRow>,
    pub ban_suggestions: Vec<BanSuggestion>,
    pub tables: TableStatuses,
}

/// Run every panel for the current draft.
pub fn evaluate(snapshot: &DataSnapshot, state: &DraftState, ctx: &DraftContext) -> DraftInsights {
    let team = state.picks(Side::Team);
    let enemy = state.picks(Side::Enemy);
    let tables = &snapshot.tables;

    let rows = build_matchup_rows(&tables.matchup, &team, &enemy, &snapshot.names);
    let (team_score, enemy_score) = score::side_scores(&team, &enemy, &rows, tables, &snapshot.names);
    debug!(
        "evaluated draft: team {} vs enemy {} ({} matchup rows)",
        team_score.total,
        enemy_score.total,
        rows.len()
    );

    DraftInsights {
        team: SideInsights {
            score: team_score,
            tags: tag_cloud(&snapshot.roster, team.iter().map(|p| p.champion.as_str())),
            combos: recommend_combos(snapshot, state, Side::Team, ctx),
        },
        enemy: SideInsights {
            score: enemy_score,
            tags: tag_cloud(&snapshot.roster, enemy.iter().map(|p| p.champion.as_str())),
            combos: recommend_combos(snapshot, state, Side::Enemy, ctx),
        },
        synergy: recommend_synergies(snapshot, state, ctx),
        matchups: matchup_panel(&rows, ctx),
        ban_suggestions: recommend_bans(&tables.bans, state, ctx),
        tables: tables.status.clone(),
    }
}
