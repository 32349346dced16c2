// Pair synergy: the best-known synergy fact between two picks.
//
// Synergy records are directional (A's table may name B without B's table
// naming A, or with a different sample). Both directions are probed and
// reconciled; the larger sample wins.

use std::cmp::Ordering;

use serde::Serialize;

use crate::champion::NameIndex;
use crate::draft::role::Role;
use crate::tables::{SynergyStat, SynergyTable};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairSynergy {
    pub delta: f64,
    pub win_rate: Option<f64>,
    /// Sample size as reported; never filled in when absent.
    pub games: Option<f64>,
    pub ally_role: Role,
    pub partner_role: Role,
}

/// Pick one of two optional facts. `prefer` returns `Greater` when its first
/// argument should win; on `Equal` the first fact is kept.
pub fn reconcile<T, F>(first: Option<T>, second: Option<T>, prefer: F) -> Option<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    match (first, second) {
        (Some(a), Some(b)) => {
            if prefer(&b, &a) == Ordering::Greater {
                Some(b)
            } else {
                Some(a)
            }
        }
        (a, b) => a.or(b),
    }
}

/// Larger sample first, then larger magnitude.
pub fn prefer_sample(a: &PairSynergy, b: &PairSynergy) -> Ordering {
    a.games
        .unwrap_or(0.0)
        .total_cmp(&b.games.unwrap_or(0.0))
        .then_with(|| a.delta.abs().total_cmp(&b.delta.abs()))
}

/// Probe `champion`@`role`'s table for `partner`@`partner_role`, rejecting
/// records whose reported roles disagree with the probe.
fn probe(
    table: &SynergyTable,
    champion: &str,
    role: Role,
    partner: &str,
    partner_role: Role,
    names: &NameIndex,
) -> Option<SynergyStat> {
    let (_, stat) = table.get(champion, role, partner, partner_role, names)?;
    let roles_agree = stat.self_role.map_or(true, |r| r == role)
        && stat.ally_role.map_or(true, |r| r == partner_role);
    roles_agree.then_some(*stat)
}

/// Best synergy between `a`@`role_a` and `b`@`role_b`, expressed from `a`'s
/// perspective. `None` when neither direction has a usable record.
pub fn pair_synergy(
    table: &SynergyTable,
    a: &str,
    role_a: Role,
    b: &str,
    role_b: Role,
    names: &NameIndex,
) -> Option<PairSynergy> {
    let to_pair = |stat: SynergyStat| PairSynergy {
        delta: stat.delta,
        win_rate: stat.win_rate,
        games: stat.games,
        ally_role: role_a,
        partner_role: role_b,
    };
    let forward = probe(table, a, role_a, b, role_b, names).map(to_pair);
    let mirror = probe(table, b, role_b, a, role_a, names).map(to_pair);
    reconcile(forward, mirror, prefer_sample)
}
