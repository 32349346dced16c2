// Combo highlights: known 2-3 champion combos reachable from one side's picks.

use std::cmp::Ordering;

use serde::Serialize;

use super::DataSnapshot;
use crate::draft::context::DraftContext;
use crate::draft::role::{Role, Side};
use crate::draft::state::DraftState;
use crate::tables::Combo;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboHighlight {
    pub champions: Vec<String>,
    pub roles: Vec<Option<Role>>,
    pub win_rate: Option<f64>,
    pub games: Option<f64>,
    pub size: usize,
    /// Members already picked by the side.
    pub picked: usize,
    /// An unpicked member's role is still open on the side.
    pub fills_missing_role: bool,
}

impl ComboHighlight {
    pub fn is_realized(&self) -> bool {
        self.picked == self.size
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ComboPanel {
    InsufficientSelection,
    Combos { items: Vec<ComboHighlight> },
}

/// Whether `combo` is still reachable for `scope`, and if so its highlight.
///
/// Excluded: any banned member, any member on the opposing side, a member
/// picked by the side in a different role than the combo names, or an
/// unpicked member whose role slot already holds someone else. At least one
/// member must already be picked by the side.
fn highlight(combo: &Combo, state: &DraftState, scope: Side) -> Option<ComboHighlight> {
    let mut picked = 0;
    let mut fills_missing_role = false;

    for member in &combo.members {
        if state.is_banned(&member.champion) {
            return None;
        }
        match state.find_pick(&member.champion) {
            Some((side, _)) if side != scope => return None,
            Some((_, role)) => {
                if member.role.is_some_and(|r| r != role) {
                    return None;
                }
                picked += 1;
            }
            None => {
                if let Some(role) = member.role {
                    if state.pick_at(scope, role).is_some() {
                        return None;
                    }
                    fills_missing_role = true;
                }
            }
        }
    }
    if picked == 0 {
        return None;
    }

    Some(ComboHighlight {
        champions: combo.members.iter().map(|m| m.champion.clone()).collect(),
        roles: combo.members.iter().map(|m| m.role).collect(),
        win_rate: combo.win_rate,
        games: combo.games,
        size: combo.size(),
        picked,
        fills_missing_role,
    })
}

fn rank(a: &ComboHighlight, b: &ComboHighlight) -> Ordering {
    b.fills_missing_role
        .cmp(&a.fills_missing_role)
        .then_with(|| {
            b.win_rate
                .unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&a.win_rate.unwrap_or(f64::NEG_INFINITY))
        })
        .then_with(|| b.games.unwrap_or(0.0).total_cmp(&a.games.unwrap_or(0.0)))
        .then_with(|| a.champions.cmp(&b.champions))
}

/// Combo panel for one side. Once the side is complete only fully picked
/// combos are listed.
pub fn recommend_combos(
    snapshot: &DataSnapshot,
    state: &DraftState,
    scope: Side,
    ctx: &DraftContext,
) -> ComboPanel {
    if state.side(scope).is_empty() {
        return ComboPanel::InsufficientSelection;
    }
    let complete = state.is_complete(scope);
    let mut items: Vec<ComboHighlight> = snapshot
        .tables
        .combos
        .combos()
        .iter()
        .filter_map(|combo| highlight(combo, state, scope))
        .filter(|h| !complete || h.is_realized())
        .collect();
    items.sort_by(rank);
    items.truncate(ctx.display_count);
    ComboPanel::Combos { items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::champion::Roster;
    use crate::tables::{ComboTable, StatTables};
    use serde_json::{json, Value};

    fn snapshot(combos: Value) -> DataSnapshot {
        let roster = Roster::from_names([
            "Yasuo", "Malphite", "Diana", "Orianna", "Jarvan IV", "Lee Sin", "Garen", "Jinx",
            "Leona", "Zed",
        ]);
        let names = roster.name_index();
        let tables = StatTables {
            combos: ComboTable::from_value(&combos, &names).unwrap(),
            ..StatTables::default()
        };
        DataSnapshot {
            roster,
            names,
            tables,
        }
    }

    fn items(panel: ComboPanel) -> Vec<ComboHighlight> {
        match panel {
            ComboPanel::Combos { items } => items,
            other => panic!("expected combos, got {other:?}"),
        }
    }

    fn combos() -> Value {
        json!([
            {"champions": ["Yasuo", "Malphite"], "roles": ["MIDDLE", "TOP"], "win_rate": 54.0, "games": 300},
            {"champions": ["Yasuo", "Diana"], "roles": ["MIDDLE", "JUNGLE"], "win_rate": 56.0, "games": 100},
            {"champions": ["Orianna", "Jarvan IV"], "roles": ["MIDDLE", "JUNGLE"], "win_rate": 58.0, "games": 200},
            {"champions": ["Yasuo", "Diana", "Malphite"], "win_rate": 60.0, "games": 50}
        ])
    }

    #[test]
    fn empty_side_is_insufficient() {
        let snap = snapshot(combos());
        let panel = recommend_combos(&snap, &DraftState::new(), Side::Team, &DraftContext::default());
        assert_eq!(panel, ComboPanel::InsufficientSelection);
    }

    #[test]
    fn combos_need_a_picked_member_and_rank_by_win_rate() {
        let snap = snapshot(combos());
        let mut state = DraftState::new();
        state.set_pick(Side::Team, Role::Middle, "Yasuo", &snap.names).unwrap();
        let got = items(recommend_combos(&snap, &state, Side::Team, &DraftContext::default()));
        let win_rates: Vec<Option<f64>> = got.iter().map(|h| h.win_rate).collect();
        // The 3-member combo names no roles, so it fills nothing.
        assert_eq!(win_rates, vec![Some(56.0), Some(54.0), Some(60.0)]);
        assert!(got.iter().all(|h| h.picked == 1));
    }

    #[test]
    fn banned_or_opposing_members_exclude_the_combo() {
        let snap = snapshot(combos());
        let mut state = DraftState::new();
        state.set_pick(Side::Team, Role::Middle, "Yasuo", &snap.names).unwrap();
        state.add_ban("Diana", &snap.names).unwrap();
        state.set_pick(Side::Enemy, Role::Top, "Malphite", &snap.names).unwrap();
        let got = items(recommend_combos(&snap, &state, Side::Team, &DraftContext::default()));
        assert!(got.is_empty());

        let enemy = items(recommend_combos(&snap, &state, Side::Enemy, &DraftContext::default()));
        assert!(enemy.is_empty());
    }

    #[test]
    fn occupied_role_slot_excludes_the_combo() {
        let snap = snapshot(combos());
        let mut state = DraftState::new();
        state.set_pick(Side::Team, Role::Middle, "Yasuo", &snap.names).unwrap();
        state.set_pick(Side::Team, Role::Top, "Garen", &snap.names).unwrap();
        let got = items(recommend_combos(&snap, &state, Side::Team, &DraftContext::default()));
        let sets: Vec<Vec<String>> = got.iter().map(|h| h.champions.clone()).collect();
        assert!(!sets.contains(&vec!["Yasuo".to_string(), "Malphite".to_string()]));
        assert!(sets.contains(&vec!["Yasuo".to_string(), "Diana".to_string()]));
    }

    #[test]
    fn wrong_role_for_picked_member_excludes_the_combo() {
        let snap = snapshot(combos());
        let mut state = DraftState::new();
        state.set_pick(Side::Team, Role::Top, "Yasuo", &snap.names).unwrap();
        let got = items(recommend_combos(&snap, &state, Side::Team, &DraftContext::default()));
        // Only the role-less trio remains.
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].size, 3);
    }

    #[test]
    fn complete_side_lists_only_realized() {
        let snap = snapshot(combos());
        let mut state = DraftState::new();
        for (role, name) in [
            (Role::Top, "Malphite"),
            (Role::Jungle, "Lee Sin"),
            (Role::Middle, "Yasuo"),
            (Role::Bottom, "Jinx"),
            (Role::Utility, "Leona"),
        ] {
            state.set_pick(Side::Team, role, name, &snap.names).unwrap();
        }
        let got = items(recommend_combos(&snap, &state, Side::Team, &DraftContext::default()));
        assert_eq!(got.len(), 1);
        assert!(got[0].is_realized());
        assert_eq!(got[0].champions, vec!["Yasuo", "Malphite"]);
    }
}
