//! Registry of active matches.
//!
//! This module provides:
//! - Start / update / finish of matches keyed by canonical home team
//! - A team index so each team is in at most one active match, in either role
//! - The ranked summary of everything in progress
//!
//! All validation happens before the registry is mutated, so a failed call
//! leaves the scoreboard untouched.

use crate::config::ScoreboardConfig;
use crate::error::{Result, ScoreboardError};
use crate::events::{ScoreboardEvent, ScoreboardObserver};
use crate::live_match::Match;
use crate::ordering::sort_for_summary;
use crate::team::{normalize, validate_pair, TeamName};
use chrono::Utc;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Scoreboard {
    config: ScoreboardConfig,
    /// canonical home team -> its match
    matches: FxHashMap<String, Match>,
    /// canonical team (home or away) -> canonical home team of its match
    teams: FxHashMap<String, String>,
    observers: Vec<Arc<dyn ScoreboardObserver>>,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    /// Empty scoreboard with default configuration
    pub fn new() -> Self {
        Self::with_config(ScoreboardConfig::default())
    }

    pub fn with_config(config: ScoreboardConfig) -> Self {
        Self {
            config,
            matches: FxHashMap::default(),
            teams: FxHashMap::default(),
            observers: Vec::new(),
        }
    }

    /// Register an observer (builder style)
    pub fn with_observer(mut self, observer: Arc<dyn ScoreboardObserver>) -> Self {
        self.add_observer(observer);
        self
    }

    pub fn add_observer(&mut self, observer: Arc<dyn ScoreboardObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    /// Start a new match at 0 - 0.
    ///
    /// Fails if either name is empty, both names are the same team, this exact
    /// pairing is already running, either team is busy in another match, or
    /// the configured capacity is reached.
    pub fn start_game(&mut self, home_team: &str, away_team: &str) -> Result<()> {
        self.try_start(home_team, away_team)
            .map_err(|e| self.rejected("start_game", e))
    }

    /// Replace the score of an active match. Team names are case-insensitive.
    pub fn update_game(
        &mut self,
        home_team: &str,
        away_team: &str,
        home_score: i32,
        away_score: i32,
    ) -> Result<()> {
        self.try_update(home_team, away_team, home_score, away_score)
            .map_err(|e| self.rejected("update_game", e))
    }

    /// Remove an active match from the board and return it.
    pub fn finish_game(&mut self, home_team: &str, away_team: &str) -> Result<Match> {
        self.try_finish(home_team, away_team)
            .map_err(|e| self.rejected("finish_game", e))
    }

    /// All active matches, highest total first, ties by start order.
    pub fn summary(&self) -> Vec<Match> {
        let mut matches: Vec<Match> = self.matches.values().cloned().collect();
        sort_for_summary(&mut matches);
        matches
    }

    /// Summary rendered as a JSON array
    pub fn summary_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.summary())
    }

    /// Active match for exactly this pairing, if any
    pub fn get_match(&self, home_team: &str, away_team: &str) -> Option<&Match> {
        let away_key = normalize(away_team);
        self.matches
            .get(&normalize(home_team))
            .filter(|game| game.away_team().key() == away_key)
    }

    /// Active match the team is playing in, home or away
    pub fn active_team(&self, team: &str) -> Option<&Match> {
        self.teams
            .get(&normalize(team))
            .and_then(|home_key| self.matches.get(home_key))
    }

    /// Number of active matches
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    fn try_start(&mut self, home_team: &str, away_team: &str) -> Result<()> {
        debug!("Starting new game for home: {} and away: {}", home_team, away_team);

        let (home, away) =
            validate_pair(home_team, away_team, self.config.reject_blank_names)?;

        if let Some(existing) = self.matches.get(home.key()) {
            if *existing.away_team() == away {
                return Err(ScoreboardError::DuplicateMatch {
                    home: existing.home_team().to_string(),
                    away: existing.away_team().to_string(),
                });
            }
        }

        for team in [&home, &away] {
            if self.teams.contains_key(team.key()) {
                return Err(ScoreboardError::TeamBusy {
                    team: team.to_string(),
                });
            }
        }

        if let Some(limit) = self.config.max_active_matches {
            if self.matches.len() >= limit {
                return Err(ScoreboardError::ScoreboardFull { limit });
            }
        }

        let home_key = home.key().to_string();
        self.teams.insert(home_key.clone(), home_key.clone());
        self.teams.insert(away.key().to_string(), home_key.clone());
        self.matches.insert(home_key, Match::new(home.clone(), away.clone()));

        info!("Game for {} and {} added successfully", home, away);
        self.emit(ScoreboardEvent::MatchStarted {
            home_team: home.to_string(),
            away_team: away.to_string(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    fn try_update(
        &mut self,
        home_team: &str,
        away_team: &str,
        home_score: i32,
        away_score: i32,
    ) -> Result<()> {
        let (home, away) = self.parse_names(home_team, away_team)?;
        let game = self
            .matches
            .get_mut(home.key())
            .filter(|game| *game.away_team() == away)
            .ok_or_else(|| not_found(&home, &away))?;

        game.update_score(home_score, away_score)?;

        let event = ScoreboardEvent::ScoreUpdated {
            home_team: game.home_team().to_string(),
            away_team: game.away_team().to_string(),
            home_score: game.home_score(),
            away_score: game.away_score(),
            timestamp: Utc::now(),
        };
        info!("Updated score: {}", game);
        self.emit(event);
        Ok(())
    }

    fn try_finish(&mut self, home_team: &str, away_team: &str) -> Result<Match> {
        let (home, away) = self.parse_names(home_team, away_team)?;
        let game = match self.matches.entry(home.key().to_string()) {
            Entry::Occupied(entry) if *entry.get().away_team() == away => entry.remove(),
            _ => return Err(not_found(&home, &away)),
        };
        self.teams.remove(game.home_team().key());
        self.teams.remove(game.away_team().key());

        info!("Finished game: {}", game);
        self.emit(ScoreboardEvent::MatchFinished {
            home_team: game.home_team().to_string(),
            away_team: game.away_team().to_string(),
            home_score: game.home_score(),
            away_score: game.away_score(),
            timestamp: Utc::now(),
        });
        Ok(game)
    }

    fn parse_names(&self, home_team: &str, away_team: &str) -> Result<(TeamName, TeamName)> {
        let reject_blank = self.config.reject_blank_names;
        Ok((
            TeamName::parse(home_team, reject_blank)?,
            TeamName::parse(away_team, reject_blank)?,
        ))
    }

    fn rejected(&self, operation: &'static str, err: ScoreboardError) -> ScoreboardError {
        self.emit(ScoreboardEvent::OperationRejected {
            operation,
            reason: err.kind(),
            message: err.to_string(),
            timestamp: Utc::now(),
        });
        err
    }

    fn emit(&self, event: ScoreboardEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }
}

fn not_found(home: &TeamName, away: &TeamName) -> ScoreboardError {
    ScoreboardError::MatchNotFound {
        home: home.to_string(),
        away: away.to_string(),
    }
}

impl fmt::Debug for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scoreboard")
            .field("config", &self.config)
            .field("matches", &self.matches)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingObserver;

    const HOME_TEAM: &str = "GONDOR";
    const HOME_TEAM_LOWER: &str = "gondor";
    const HOME_TEAM_2: &str = "ROHAN";
    const AWAY_TEAM: &str = "MORDOR";
    const AWAY_TEAM_LOWER: &str = "mordor";
    const AWAY_TEAM_2: &str = "SHIRE";

    fn game(home: &str, away: &str, home_score: u32, away_score: u32) -> Match {
        Match::with_scores(
            TeamName::parse(home, true).unwrap(),
            TeamName::parse(away, true).unwrap(),
            home_score,
            away_score,
        )
    }

    fn two_game_board() -> Scoreboard {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();
        board.start_game(HOME_TEAM_2, AWAY_TEAM_2).unwrap();
        board
    }

    #[test]
    fn test_start_adds_match_at_zero() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();

        assert_eq!(board.len(), 1);
        assert_eq!(board.summary(), vec![game(HOME_TEAM, AWAY_TEAM, 0, 0)]);
    }

    #[test]
    fn test_start_same_pair_any_case_is_duplicate() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();

        for (home, away) in [
            (HOME_TEAM, AWAY_TEAM),
            (HOME_TEAM_LOWER, AWAY_TEAM),
            (HOME_TEAM, AWAY_TEAM_LOWER),
        ] {
            let err = board.start_game(home, away).unwrap_err();
            assert_eq!(err.kind(), "duplicate_match", "{} vs {}", home, away);
        }
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_start_with_busy_team_fails() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();

        for (home, away) in [
            (HOME_TEAM, AWAY_TEAM_2),
            (HOME_TEAM_2, AWAY_TEAM),
            (HOME_TEAM_2, HOME_TEAM_LOWER),
            (AWAY_TEAM_LOWER, HOME_TEAM_2),
            (AWAY_TEAM, HOME_TEAM),
        ] {
            let err = board.start_game(home, away).unwrap_err();
            assert_eq!(err.kind(), "team_busy", "{} vs {}", home, away);
        }
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_start_with_empty_names_fails() {
        let mut board = Scoreboard::new();
        assert_eq!(
            board.start_game("", AWAY_TEAM),
            Err(ScoreboardError::InvalidTeamName(String::new()))
        );
        assert_eq!(
            board.start_game(HOME_TEAM, ""),
            Err(ScoreboardError::InvalidTeamName(String::new()))
        );
        assert!(board.is_empty());
    }

    #[test]
    fn test_start_with_same_team_fails() {
        let mut board = Scoreboard::new();
        let err = board.start_game(HOME_TEAM, HOME_TEAM_LOWER).unwrap_err();
        assert_eq!(err.kind(), "same_team_name");
        assert!(board.is_empty());
    }

    #[test]
    fn test_capacity_limit() {
        let config = ScoreboardConfig::default().with_max_active_matches(1);
        let mut board = Scoreboard::with_config(config);
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();

        assert_eq!(
            board.start_game(HOME_TEAM_2, AWAY_TEAM_2),
            Err(ScoreboardError::ScoreboardFull { limit: 1 })
        );

        board.finish_game(HOME_TEAM, AWAY_TEAM).unwrap();
        board.start_game(HOME_TEAM_2, AWAY_TEAM_2).unwrap();
    }

    #[test]
    fn test_update_existing_match() {
        let mut board = two_game_board();
        board.update_game(HOME_TEAM, AWAY_TEAM, 1, 2).unwrap();

        assert_eq!(
            board.get_match(HOME_TEAM, AWAY_TEAM),
            Some(&game(HOME_TEAM, AWAY_TEAM, 1, 2))
        );
        assert_eq!(
            board.get_match(HOME_TEAM_2, AWAY_TEAM_2),
            Some(&game(HOME_TEAM_2, AWAY_TEAM_2, 0, 0))
        );
    }

    #[test]
    fn test_update_is_case_insensitive() {
        let mut board = two_game_board();
        board.update_game(HOME_TEAM_LOWER, AWAY_TEAM, 1, 2).unwrap();
        board.update_game(HOME_TEAM, AWAY_TEAM_LOWER, 3, 2).unwrap();

        let updated = board.get_match(HOME_TEAM, AWAY_TEAM).unwrap();
        assert_eq!((updated.home_score(), updated.away_score()), (3, 2));
        assert_eq!(updated.home_team().as_str(), HOME_TEAM);
    }

    #[test]
    fn test_update_unknown_pair_fails() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();

        for (home, away) in [(HOME_TEAM_2, AWAY_TEAM), (HOME_TEAM, AWAY_TEAM_2)] {
            let err = board.update_game(home, away, 1, 2).unwrap_err();
            assert_eq!(err.kind(), "match_not_found");
        }
        assert_eq!(board.summary(), vec![game(HOME_TEAM, AWAY_TEAM, 0, 0)]);
    }

    #[test]
    fn test_update_with_empty_name_fails() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();

        for (home, away) in [("", AWAY_TEAM), (HOME_TEAM, "")] {
            let err = board.update_game(home, away, 1, 2).unwrap_err();
            assert_eq!(err.kind(), "invalid_team_name");
        }
    }

    #[test]
    fn test_update_negative_score_keeps_state() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();
        board.update_game(HOME_TEAM, AWAY_TEAM, 4, 1).unwrap();

        assert_eq!(
            board.update_game(HOME_TEAM, AWAY_TEAM, -1, 7),
            Err(ScoreboardError::InvalidScore { home: -1, away: 7 })
        );
        assert_eq!(
            board.get_match(HOME_TEAM, AWAY_TEAM),
            Some(&game(HOME_TEAM, AWAY_TEAM, 4, 1))
        );
    }

    #[test]
    fn test_finish_removes_only_target() {
        let mut board = two_game_board();
        let finished = board.finish_game(HOME_TEAM, AWAY_TEAM).unwrap();

        assert_eq!(finished, game(HOME_TEAM, AWAY_TEAM, 0, 0));
        assert_eq!(board.summary(), vec![game(HOME_TEAM_2, AWAY_TEAM_2, 0, 0)]);
        assert!(board.active_team(HOME_TEAM).is_none());
        assert!(board.active_team(AWAY_TEAM).is_none());
    }

    #[test]
    fn test_finish_is_case_insensitive() {
        let mut board = two_game_board();
        board.finish_game(HOME_TEAM_LOWER, AWAY_TEAM).unwrap();
        board.finish_game(HOME_TEAM_2, "shire").unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn test_finish_unknown_pair_fails() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();

        for (home, away) in [(HOME_TEAM_2, AWAY_TEAM), (HOME_TEAM, AWAY_TEAM_2)] {
            let err = board.finish_game(home, away).unwrap_err();
            assert_eq!(err.kind(), "match_not_found");
        }
        let err = board.finish_game("", AWAY_TEAM).unwrap_err();
        assert_eq!(err.kind(), "invalid_team_name");
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_finish_wrong_away_keeps_match_and_teams() {
        let mut board = two_game_board();
        board.update_game(HOME_TEAM, AWAY_TEAM, 2, 1).unwrap();

        let err = board.finish_game(HOME_TEAM_LOWER, AWAY_TEAM_2).unwrap_err();
        assert_eq!(
            err,
            ScoreboardError::MatchNotFound {
                home: HOME_TEAM_LOWER.to_string(),
                away: AWAY_TEAM_2.to_string(),
            }
        );

        let kept = Some(&game(HOME_TEAM, AWAY_TEAM, 2, 1));
        assert_eq!(board.get_match(HOME_TEAM, AWAY_TEAM), kept);
        assert_eq!(board.active_team(HOME_TEAM), kept);
        assert_eq!(board.active_team(AWAY_TEAM_LOWER), kept);
        assert!(board.active_team(AWAY_TEAM_2).is_some());
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_finish_twice_fails() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();
        board.finish_game(HOME_TEAM, AWAY_TEAM).unwrap();

        assert_eq!(
            board.finish_game(HOME_TEAM, AWAY_TEAM).unwrap_err(),
            ScoreboardError::MatchNotFound {
                home: HOME_TEAM.to_string(),
                away: AWAY_TEAM.to_string(),
            }
        );
    }

    #[test]
    fn test_teams_free_again_after_finish() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();
        board.finish_game(HOME_TEAM, AWAY_TEAM).unwrap();

        board.start_game(AWAY_TEAM, HOME_TEAM).unwrap();
        assert_eq!(
            board.active_team(HOME_TEAM_LOWER),
            Some(&game(AWAY_TEAM, HOME_TEAM, 0, 0))
        );
    }

    #[test]
    fn test_summary_empty() {
        let board = Scoreboard::new();
        assert!(board.summary().is_empty());
        assert_eq!(board.summary_json().unwrap(), "[]");
    }

    #[test]
    fn test_summary_sorted_by_total() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();
        board.update_game(HOME_TEAM, AWAY_TEAM, 1, 2).unwrap();
        board.start_game(HOME_TEAM_2, AWAY_TEAM_2).unwrap();
        board.update_game(HOME_TEAM_2, AWAY_TEAM_2, 3, 2).unwrap();

        assert_eq!(
            board.summary(),
            vec![
                game(HOME_TEAM_2, AWAY_TEAM_2, 3, 2),
                game(HOME_TEAM, AWAY_TEAM, 1, 2),
            ]
        );
    }

    #[test]
    fn test_summary_ties_by_start_order() {
        let mut board = Scoreboard::new();
        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();
        board.update_game(HOME_TEAM, AWAY_TEAM, 1, 2).unwrap();
        board.start_game(HOME_TEAM_2, AWAY_TEAM_2).unwrap();
        board.update_game(HOME_TEAM_2, AWAY_TEAM_2, 2, 1).unwrap();

        assert_eq!(
            board.summary(),
            vec![
                game(HOME_TEAM, AWAY_TEAM, 1, 2),
                game(HOME_TEAM_2, AWAY_TEAM_2, 2, 1),
            ]
        );
    }

    #[test]
    fn test_summary_json() {
        let mut board = Scoreboard::new();
        board.start_game("Spain", "Brazil").unwrap();
        board.update_game("spain", "BRAZIL", 10, 2).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&board.summary_json().unwrap()).unwrap();
        assert_eq!(json[0]["home_team"], "Spain");
        assert_eq!(json[0]["away_score"], 2);
    }

    #[test]
    fn test_observer_sees_outcomes() {
        let observer = Arc::new(RecordingObserver::new());
        let mut board = Scoreboard::new().with_observer(observer.clone());

        board.start_game(HOME_TEAM, AWAY_TEAM).unwrap();
        board.update_game(HOME_TEAM, AWAY_TEAM, 2, 0).unwrap();
        board.update_game(HOME_TEAM, AWAY_TEAM, -2, 0).unwrap_err();
        board.finish_game(HOME_TEAM, AWAY_TEAM).unwrap();

        let types: Vec<_> = observer.events().iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec!["match_started", "score_updated", "operation_rejected", "match_finished"]
        );

        match &observer.events()[2] {
            ScoreboardEvent::OperationRejected { operation, reason, .. } => {
                assert_eq!(*operation, "update_game");
                assert_eq!(*reason, "invalid_score");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
