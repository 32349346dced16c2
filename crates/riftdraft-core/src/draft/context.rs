// Engine context: the UI filter state every panel is computed under.

use serde::Serialize;

use super::role::LaneFilter;
use crate::config::{Config, ConfigError};

pub const DEFAULT_MIN_SYNERGY_GAMES: f64 = 20.0;
pub const DEFAULT_DISPLAY_COUNT: usize = 12;

/// Matchup classes shown in the matchup panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchupVisibility {
    pub favorable: bool,
    pub even: bool,
    pub unfavorable: bool,
}

impl Default for MatchupVisibility {
    fn default() -> Self {
        MatchupVisibility {
            favorable: true,
            even: true,
            unfavorable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftContext {
    pub lane_filter: LaneFilter,
    pub visibility: MatchupVisibility,
    /// Always at least 1.
    pub min_synergy_games: f64,
    pub display_count: usize,
}

impl Default for DraftContext {
    fn default() -> Self {
        DraftContext {
            lane_filter: LaneFilter::All,
            visibility: MatchupVisibility::default(),
            min_synergy_games: DEFAULT_MIN_SYNERGY_GAMES,
            display_count: DEFAULT_DISPLAY_COUNT,
        }
    }
}

impl DraftContext {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let rec = &config.recommendations;
        let lane_filter =
            LaneFilter::parse(&rec.lane_filter).map_err(|e| ConfigError::ValidationError {
                field: "recommendations.lane_filter".into(),
                message: e.to_string(),
            })?;
        Ok(DraftContext {
            lane_filter,
            visibility: MatchupVisibility {
                favorable: config.matchups.show_favorable,
                even: config.matchups.show_even,
                unfavorable: config.matchups.show_unfavorable,
            },
            min_synergy_games: f64::from(rec.min_synergy_games.max(1)),
            display_count: rec.display_count.max(1),
        })
    }

    /// Override the minimum sample size, clamped to at least 1.
    pub fn with_min_synergy_games(mut self, games: u32) -> Self {
        self.min_synergy_games = f64::from(games.max(1));
        self
    }

    pub fn with_lane_filter(mut self, lane_filter: LaneFilter) -> Self {
        self.lane_filter = lane_filter;
        self
    }
}
