// Lane roles, draft sides and the lane filter.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    #[error("unknown role `{0}`")]
    Unknown(String),
}

/// The five positional slots of a team.
///
/// Variant order is the slot display order (top to support) and is relied on
/// for deterministic iteration wherever roles key an ordered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Top,
        Role::Jungle,
        Role::Middle,
        Role::Bottom,
        Role::Utility,
    ];

    /// Parse a role name, accepting the common aliases.
    ///
    /// - "MID" -> Middle
    /// - "ADC" / "BOT" -> Bottom
    /// - "SUPPORT" / "SUP" -> Utility
    /// - "JG" / "JUNGLER" -> Jungle
    pub fn parse(s: &str) -> Result<Self, RoleError> {
        match s.trim().to_uppercase().as_str() {
            "TOP" => Ok(Role::Top),
            "JUNGLE" | "JG" | "JUNGLER" => Ok(Role::Jungle),
            "MIDDLE" | "MID" => Ok(Role::Middle),
            "BOTTOM" | "BOT" | "ADC" => Ok(Role::Bottom),
            "UTILITY" | "SUPPORT" | "SUP" => Ok(Role::Utility),
            _ => Err(RoleError::Unknown(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Middle => "MIDDLE",
            Role::Bottom => "BOTTOM",
            Role::Utility => "UTILITY",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of the draft a pick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Team,
    Enemy,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Team => Side::Enemy,
            Side::Enemy => Side::Team,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Team => write!(f, "team"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

/// Lane filter applied to the recommendation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaneFilter {
    #[default]
    All,
    Only(Role),
}

impl LaneFilter {
    /// Parse "ALL" or any role name accepted by [`Role::parse`].
    pub fn parse(s: &str) -> Result<Self, RoleError> {
        if s.trim().eq_ignore_ascii_case("ALL") {
            return Ok(LaneFilter::All);
        }
        Role::parse(s).map(LaneFilter::Only)
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            LaneFilter::All => None,
            LaneFilter::Only(role) => Some(*role),
        }
    }
}

impl fmt::Display for LaneFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneFilter::All => write!(f, "ALL"),
            LaneFilter::Only(role) => write!(f, "{role}"),
        }
    }
}

impl Serialize for LaneFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
