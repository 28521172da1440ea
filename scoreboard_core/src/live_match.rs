//! A single ongoing match.
//!
//! Team identities and start order are fixed at construction; only the
//! score pair changes afterwards.

use crate::error::{Result, ScoreboardError};
use crate::team::TeamName;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Start-order counter shared by every match in the process
static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Serialize)]
pub struct Match {
    home_team: TeamName,
    away_team: TeamName,
    home_score: u32,
    away_score: u32,
    /// Monotonic start order, used only to break ties in summaries
    #[serde(skip)]
    sequence: u64,
    started_at: DateTime<Utc>,
}

impl Match {
    /// New match at 0 - 0
    pub fn new(home_team: TeamName, away_team: TeamName) -> Self {
        Self {
            home_team,
            away_team,
            home_score: 0,
            away_score: 0,
            sequence: NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed),
            started_at: Utc::now(),
        }
    }

    /// Match with a given starting score, e.g. to compare against a summary.
    pub fn with_scores(
        home_team: TeamName,
        away_team: TeamName,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        let mut game = Self::new(home_team, away_team);
        game.home_score = home_score;
        game.away_score = away_score;
        game
    }

    pub fn home_team(&self) -> &TeamName {
        &self.home_team
    }

    pub fn away_team(&self) -> &TeamName {
        &self.away_team
    }

    pub fn home_score(&self) -> u32 {
        self.home_score
    }

    pub fn away_score(&self) -> u32 {
        self.away_score
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Replace both scores. Nothing changes if either value is negative.
    pub fn update_score(&mut self, home_score: i32, away_score: i32) -> Result<()> {
        let (home, away) = match (u32::try_from(home_score), u32::try_from(away_score)) {
            (Ok(home), Ok(away)) => (home, away),
            _ => {
                warn!(
                    "Rejected negative score {} - {} for {} vs {}",
                    home_score, away_score, self.home_team, self.away_team
                );
                return Err(ScoreboardError::InvalidScore {
                    home: home_score,
                    away: away_score,
                });
            }
        };

        debug!(
            "Score {} vs {}: {}-{} -> {}-{}",
            self.home_team, self.away_team, self.home_score, self.away_score, home, away
        );
        self.home_score = home;
        self.away_score = away;
        Ok(())
    }

    /// Sum of both scores
    pub fn total_score(&self) -> u32 {
        self.home_score + self.away_score
    }

    /// True if `team` plays in this match, in either role
    pub fn involves(&self, team: &TeamName) -> bool {
        self.home_team == *team || self.away_team == *team
    }
}

// Start order and timestamp are not part of a match's identity.
impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.home_team == other.home_team
            && self.away_team == other.away_team
            && self.home_score == other.home_score
            && self.away_score == other.away_score
    }
}

impl Eq for Match {}

impl Hash for Match {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.home_team.hash(state);
        self.away_team.hash(state);
        self.home_score.hash(state);
        self.away_score.hash(state);
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            self.home_team, self.home_score, self.away_team, self.away_score
        )
    }
}
