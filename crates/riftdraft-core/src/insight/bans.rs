// Ban suggestions: the most-banned champions still available.

use serde::Serialize;

use crate::draft::context::DraftContext;
use crate::draft::state::DraftState;
use crate::tables::BanTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BanSuggestion {
    pub champion: String,
    pub ban_rate: f64,
    pub win_rate: Option<f64>,
    pub games: Option<f64>,
}

pub fn recommend_bans(table: &BanTable, state: &DraftState, ctx: &DraftContext) -> Vec<BanSuggestion> {
    let mut out: Vec<BanSuggestion> = table
        .iter()
        .filter(|(name, _)| !state.is_banned(name) && state.find_pick(name).is_none())
        .map(|(name, stat)| BanSuggestion {
            champion: name.to_string(),
            ban_rate: stat.ban_rate,
            win_rate: stat.win_rate,
            games: stat.games,
        })
        .collect();
    out.sort_by(|a, b| {
        b.ban_rate
            .total_cmp(&a.ban_rate)
            .then_with(|| b.games.unwrap_or(0.0).total_cmp(&a.games.unwrap_or(0.0)))
            .then_with(|| a.champion.cmp(&b.champion))
    });
    out.truncate(ctx.display_count);
    out
}
