//! Observability hooks for scoreboard changes.
//!
//! A scoreboard never installs a global logger. Callers register
//! observers and receive one `ScoreboardEvent` per operation outcome.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoreboardEvent {
    MatchStarted {
        home_team: String,
        away_team: String,
        timestamp: DateTime<Utc>,
    },
    ScoreUpdated {
        home_team: String,
        away_team: String,
        home_score: u32,
        away_score: u32,
        timestamp: DateTime<Utc>,
    },
    MatchFinished {
        home_team: String,
        away_team: String,
        home_score: u32,
        away_score: u32,
        timestamp: DateTime<Utc>,
    },
    /// An operation failed validation; nothing was changed
    OperationRejected {
        operation: &'static str,
        reason: &'static str,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl ScoreboardEvent {
    /// Event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ScoreboardEvent::MatchStarted { .. } => "match_started",
            ScoreboardEvent::ScoreUpdated { .. } => "score_updated",
            ScoreboardEvent::MatchFinished { .. } => "match_finished",
            ScoreboardEvent::OperationRejected { .. } => "operation_rejected",
        }
    }
}

/// Receives scoreboard events. Called synchronously, inside the operation.
pub trait ScoreboardObserver: Send + Sync {
    fn on_event(&self, event: &ScoreboardEvent);
}

/// Writes every event to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScoreboardObserver for TracingObserver {
    fn on_event(&self, event: &ScoreboardEvent) {
        match event {
            ScoreboardEvent::MatchStarted {
                home_team,
                away_team,
                ..
            } => info!("Match started: {} vs {}", home_team, away_team),
            ScoreboardEvent::ScoreUpdated {
                home_team,
                away_team,
                home_score,
                away_score,
                ..
            } => info!(
                "Score updated: {} {} - {} {}",
                home_team, home_score, away_team, away_score
            ),
            ScoreboardEvent::MatchFinished {
                home_team,
                away_team,
                home_score,
                away_score,
                ..
            } => info!(
                "Match finished: {} {} - {} {}",
                home_team, home_score, away_team, away_score
            ),
            ScoreboardEvent::OperationRejected {
                operation,
                reason,
                message,
                ..
            } => warn!("{} rejected ({}): {}", operation, reason, message),
        }
    }
}

/// Keeps events in memory, in arrival order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ScoreboardEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<ScoreboardEvent> {
        self.events.lock().clone()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<ScoreboardEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl ScoreboardObserver for RecordingObserver {
    fn on_event(&self, event: &ScoreboardEvent) {
        self.events.lock().push(event.clone());
    }
}
