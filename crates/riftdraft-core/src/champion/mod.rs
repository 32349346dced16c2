// Champion identity: name canonicalization, roster and tag cloud.

pub mod names;
pub mod roster;
pub mod tags;

pub use names::{lookup_key, NameIndex};
pub use roster::{load_roster, ChampionEntry, Roster, RosterError};
