// Draft description file (TOML): bans plus role -> champion tables per side.
//
//   bans = ["Zed"]
//   [team]
//   TOP = "Garen"
//   [enemy]
//   MID = "Ahri"

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context};
use riftdraft_core::champion::NameIndex;
use riftdraft_core::draft::{DraftState, Role, Side};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftFile {
    #[serde(default)]
    pub bans: Vec<String>,
    #[serde(default)]
    pub team: BTreeMap<String, String>,
    #[serde(default)]
    pub enemy: BTreeMap<String, String>,
}

impl DraftFile {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid draft file")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read draft file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Apply bans, then team picks, then enemy picks, through the same
    /// collision rules an interactive draft uses.
    pub fn to_state(&self, names: &NameIndex) -> anyhow::Result<DraftState> {
        let mut state = DraftState::new();
        for ban in &self.bans {
            state
                .add_ban(ban, names)
                .with_context(|| format!("cannot ban '{ban}'"))?;
        }
        for (side, picks) in [(Side::Team, &self.team), (Side::Enemy, &self.enemy)] {
            let mut seen: BTreeMap<Role, &str> = BTreeMap::new();
            for (role_key, champion) in picks {
                let role = Role::parse(role_key)
                    .with_context(|| format!("bad role key in [{side}]"))?;
                if let Some(first) = seen.insert(role, role_key) {
                    bail!("[{side}] names {role} twice ('{first}' and '{role_key}')");
                }
                state
                    .set_pick(side, role, champion, names)
                    .with_context(|| format!("cannot pick '{champion}' for {side} {role}"))?;
            }
        }
        Ok(state)
    }
}
