//! Runtime configuration for a scoreboard.
//!
//! Values come from environment variables (a `.env` file is honoured),
//! falling back to defaults when a variable is missing or unparsable:
//! - `SCOREBOARD_MAX_MATCHES`: cap on simultaneously active matches (0 or unset = unlimited)
//! - `SCOREBOARD_REJECT_BLANK_NAMES`: also reject whitespace-only team names (default off)

use dotenv::dotenv;
use std::env;

/// Only empty names are invalid unless configured otherwise
pub const DEFAULT_REJECT_BLANK_NAMES: bool = false;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardConfig {
    /// `None` means no limit
    pub max_active_matches: Option<usize>,
    pub reject_blank_names: bool,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            max_active_matches: None,
            reject_blank_names: DEFAULT_REJECT_BLANK_NAMES,
        }
    }
}

impl ScoreboardConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_active_matches = lookup("SCOREBOARD_MAX_MATCHES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&limit| limit > 0);

        let reject_blank_names = lookup("SCOREBOARD_REJECT_BLANK_NAMES")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(DEFAULT_REJECT_BLANK_NAMES);

        Self {
            max_active_matches,
            reject_blank_names,
        }
    }

    pub fn with_max_active_matches(mut self, limit: usize) -> Self {
        self.max_active_matches = Some(limit).filter(|&l| l > 0);
        self
    }

    pub fn with_reject_blank_names(mut self, reject: bool) -> Self {
        self.reject_blank_names = reject;
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
