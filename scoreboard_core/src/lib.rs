//! Scoreboard Core - In-memory live scoreboard.
//!
//! This module provides:
//! - Starting, updating and finishing matches between pairs of teams
//! - Case-insensitive team identity ("Spain" == "SPAIN")
//! - One active match per team, in either role
//! - Ranked summary: highest total score first, ties by start order
//! - Observer hooks and a thread-safe shared handle
//!
//! ```
//! use scoreboard_core::Scoreboard;
//!
//! let mut board = Scoreboard::new();
//! board.start_game("Spain", "Brazil")?;
//! board.update_game("spain", "BRAZIL", 10, 2)?;
//! assert_eq!(board.summary()[0].to_string(), "Spain 10 - Brazil 2");
//! # Ok::<(), scoreboard_core::ScoreboardError>(())
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod live_match;
pub mod ordering;
pub mod scoreboard;
pub mod shared;
pub mod team;
pub mod telemetry;

pub use config::ScoreboardConfig;
pub use error::{Result, ScoreboardError};
pub use events::{RecordingObserver, ScoreboardEvent, ScoreboardObserver, TracingObserver};
pub use live_match::Match;
pub use scoreboard::Scoreboard;
pub use shared::SharedScoreboard;
pub use team::TeamName;
