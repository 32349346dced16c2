// Draft model: roles, picks and bans, and the engine context.

pub mod context;
pub mod role;
pub mod state;

pub use context::{DraftContext, MatchupVisibility};
pub use role::{LaneFilter, Role, RoleError, Side};
pub use state::{DraftError, DraftState, Pick};
