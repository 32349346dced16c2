// Draft state: picks per side and role, plus the shared ban pool.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::role::{Role, Side};
use crate::champion::{NameIndex, Roster};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{champion} is banned")]
    Banned { champion: String },

    #[error("{champion} is already picked by the {side} side")]
    PickedByOpponent { champion: String, side: Side },

    #[error("{champion} is already picked at {role}")]
    AlreadyPicked { champion: String, role: Role },

    #[error("{champion} is picked by the {side} side and cannot be banned")]
    BanCollidesWithPick { champion: String, side: Side },

    #[error("{champion} is already banned")]
    DuplicateBan { champion: String },

    #[error("ban requires a champion name")]
    EmptyBan,
}

/// One filled slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pick {
    pub role: Role,
    pub champion: String,
}

/// The complete draft: at most one champion per (side, role), plus bans.
///
/// Champion names are stored in canonical display form; every mutator
/// resolves its input through the [`NameIndex`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftState {
    /// Team picks keyed by role.
    pub team: BTreeMap<Role, String>,
    /// Enemy picks keyed by role.
    pub enemy: BTreeMap<Role, String>,
    /// Shared ban pool, in the order bans were added.
    pub bans: Vec<String>,
}

impl DraftState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(&self, side: Side) -> &BTreeMap<Role, String> {
        match side {
            Side::Team => &self.team,
            Side::Enemy => &self.enemy,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BTreeMap<Role, String> {
        match side {
            Side::Team => &mut self.team,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Picks of one side, top to support.
    pub fn picks(&self, side: Side) -> Vec<Pick> {
        self.side(side)
            .iter()
            .map(|(role, champion)| Pick {
                role: *role,
                champion: champion.clone(),
            })
            .collect()
    }

    pub fn pick_at(&self, side: Side, role: Role) -> Option<&str> {
        self.side(side).get(&role).map(String::as_str)
    }

    pub fn is_banned(&self, champion: &str) -> bool {
        self.bans.iter().any(|b| b == champion)
    }

    /// Where `champion` is picked, if anywhere.
    pub fn find_pick(&self, champion: &str) -> Option<(Side, Role)> {
        [Side::Team, Side::Enemy].into_iter().find_map(|side| {
            self.side(side)
                .iter()
                .find(|(_, c)| c.as_str() == champion)
                .map(|(role, _)| (side, *role))
        })
    }

    /// Roles of `side` that have no pick yet.
    pub fn open_roles(&self, side: Side) -> Vec<Role> {
        let filled = self.side(side);
        Role::ALL
            .into_iter()
            .filter(|r| !filled.contains_key(r))
            .collect()
    }

    pub fn is_complete(&self, side: Side) -> bool {
        self.side(side).len() == Role::ALL.len()
    }

    /// Place `raw` at (side, role). An empty name clears the slot.
    ///
    /// Re-picking the champion already in this slot is a no-op.
    pub fn set_pick(
        &mut self,
        side: Side,
        role: Role,
        raw: &str,
        names: &NameIndex,
    ) -> Result<(), DraftError> {
        let champion = names.resolve(raw);
        if champion.is_empty() {
            self.clear_slot(side, role);
            return Ok(());
        }
        if self.is_banned(&champion) {
            return Err(DraftError::Banned { champion });
        }
        match self.find_pick(&champion) {
            Some((s, r)) if s == side && r == role => return Ok(()),
            Some((s, r)) if s == side => {
                return Err(DraftError::AlreadyPicked { champion, role: r })
            }
            Some((s, _)) => return Err(DraftError::PickedByOpponent { champion, side: s }),
            None => {}
        }
        self.side_mut(side).insert(role, champion);
        Ok(())
    }

    /// Empty a slot; returns the champion that was there.
    pub fn clear_slot(&mut self, side: Side, role: Role) -> Option<String> {
        self.side_mut(side).remove(&role)
    }

    pub fn add_ban(&mut self, raw: &str, names: &NameIndex) -> Result<(), DraftError> {
        let champion = names.resolve(raw);
        if champion.is_empty() {
            return Err(DraftError::EmptyBan);
        }
        if self.is_banned(&champion) {
            return Err(DraftError::DuplicateBan { champion });
        }
        if let Some((side, _)) = self.find_pick(&champion) {
            return Err(DraftError::BanCollidesWithPick { champion, side });
        }
        self.bans.push(champion);
        Ok(())
    }

    /// Remove a ban; returns whether it was present.
    pub fn remove_ban(&mut self, raw: &str, names: &NameIndex) -> bool {
        let champion = names.resolve(raw);
        let before = self.bans.len();
        self.bans.retain(|b| *b != champion);
        self.bans.len() != before
    }

    pub fn reset(&mut self) {
        self.team.clear();
        self.enemy.clear();
        self.bans.clear();
    }

    /// Roster champions selectable at (side, role): sorted, minus bans, minus
    /// the other side's picks, minus same-side picks in other roles. The
    /// slot's own champion stays selectable.
    pub fn available_champions<'r>(&self, roster: &'r Roster, side: Side, role: Role) -> Vec<&'r str> {
        roster
            .sorted_names()
            .into_iter()
            .filter(|name| !self.is_banned(name))
            .filter(|name| match self.find_pick(name) {
                None => true,
                Some((s, r)) => s == side && r == role,
            })
            .collect()
    }
}
