//! Thread-safe handle to a scoreboard.
//!
//! Every operation reads and then writes the same registry, so each call
//! holds one lock for its whole duration.

use crate::config::ScoreboardConfig;
use crate::error::Result;
use crate::events::ScoreboardObserver;
use crate::live_match::Match;
use crate::scoreboard::Scoreboard;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle; clones share the same board
#[derive(Debug, Clone, Default)]
pub struct SharedScoreboard {
    inner: Arc<Mutex<Scoreboard>>,
}

impl SharedScoreboard {
    pub fn new() -> Self {
        Self::from_scoreboard(Scoreboard::new())
    }

    pub fn with_config(config: ScoreboardConfig) -> Self {
        Self::from_scoreboard(Scoreboard::with_config(config))
    }

    pub fn from_scoreboard(scoreboard: Scoreboard) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scoreboard)),
        }
    }

    pub fn add_observer(&self, observer: Arc<dyn ScoreboardObserver>) {
        self.inner.lock().add_observer(observer);
    }

    pub fn start_game(&self, home_team: &str, away_team: &str) -> Result<()> {
        self.inner.lock().start_game(home_team, away_team)
    }

    pub fn update_game(
        &self,
        home_team: &str,
        away_team: &str,
        home_score: i32,
        away_score: i32,
    ) -> Result<()> {
        self.inner
            .lock()
            .update_game(home_team, away_team, home_score, away_score)
    }

    pub fn finish_game(&self, home_team: &str, away_team: &str) -> Result<Match> {
        self.inner.lock().finish_game(home_team, away_team)
    }

    pub fn summary(&self) -> Vec<Match> {
        self.inner.lock().summary()
    }

    /// Active match for exactly this pairing, copied out of the lock
    pub fn get_match(&self, home_team: &str, away_team: &str) -> Option<Match> {
        self.inner.lock().get_match(home_team, away_team).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run several operations under a single lock.
    pub fn with_board<R>(&self, f: impl FnOnce(&mut Scoreboard) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
