//! Team names and their case-insensitive identity.
//!
//! This module provides:
//! - The single canonicalisation function used by every registry lookup
//! - `TeamName`, which keeps the caller's spelling for display
//! - Name and pair validation

use crate::error::{Result, ScoreboardError};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Canonical form of a team name. "Spain", "spain" and "SPAIN" all map to "SPAIN".
///
/// Full Unicode uppercasing, so multi-char expansions fold too: "Straße" and
/// "STRASSE" are the same team.
pub fn normalize(name: &str) -> String {
    name.to_uppercase()
}

/// Team name as supplied by the caller, plus its canonical key.
///
/// Equality, ordering and hashing only look at the key.
#[derive(Debug, Clone)]
pub struct TeamName {
    display: String,
    key: String,
}

impl TeamName {
    /// Validate and canonicalise a raw name.
    ///
    /// Empty names are always rejected; whitespace-only names are rejected
    /// when `reject_blank` is set.
    pub fn parse(raw: &str, reject_blank: bool) -> Result<Self> {
        if raw.is_empty() || (reject_blank && raw.trim().is_empty()) {
            return Err(ScoreboardError::InvalidTeamName(raw.to_string()));
        }

        Ok(Self {
            display: raw.to_string(),
            key: normalize(raw),
        })
    }

    /// Name as first given by the caller
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Canonical key used for registry lookups
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for TeamName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TeamName {}

impl Hash for TeamName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl Serialize for TeamName {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.display)
    }
}

/// Parse both names and make sure they are two different teams.
pub fn validate_pair(
    home: &str,
    away: &str,
    reject_blank: bool,
) -> Result<(TeamName, TeamName)> {
    let home = TeamName::parse(home, reject_blank)?;
    let away = TeamName::parse(away, reject_blank)?;

    if home == away {
        return Err(ScoreboardError::SameTeamName {
            home: home.display,
            away: away.display,
        });
    }

    Ok((home, away))
}
