//! Errors returned by scoreboard operations.
//!
//! Every failure is detected before the registry is touched, so an `Err`
//! always means the scoreboard is exactly as it was before the call.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ScoreboardError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreboardError {
    /// Team name was empty (or blank, depending on config)
    #[error("Team name cannot be empty! Got: {0:?}")]
    InvalidTeamName(String),

    #[error("HomeTeam and AwayTeam must be different! Got: {home} and {away}")]
    SameTeamName { home: String, away: String },

    #[error("The match for {home} and {away} has already started!")]
    DuplicateMatch { home: String, away: String },

    /// `team` is already playing in another active match
    #[error("Team {team} has already started a match!")]
    TeamBusy { team: String },

    #[error("There is no such pair on the scoreboard: {home} and {away}")]
    MatchNotFound { home: String, away: String },

    #[error("Score for team cannot be a negative number! Got: {home} - {away}")]
    InvalidScore { home: i32, away: i32 },

    #[error("Scoreboard is full: {limit} matches already in progress")]
    ScoreboardFull { limit: usize },
}

impl ScoreboardError {
    /// Stable snake_case tag for logs and events
    pub fn kind(&self) -> &'static str {
        match self {
            ScoreboardError::InvalidTeamName(_) => "invalid_team_name",
            ScoreboardError::SameTeamName { .. } => "same_team_name",
            ScoreboardError::DuplicateMatch { .. } => "duplicate_match",
            ScoreboardError::TeamBusy { .. } => "team_busy",
            ScoreboardError::MatchNotFound { .. } => "match_not_found",
            ScoreboardError::InvalidScore { .. } => "invalid_score",
            ScoreboardError::ScoreboardFull { .. } => "scoreboard_full",
        }
    }
}
