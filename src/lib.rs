//! Strictly Games library - hosting for the backgammon rules engine
//!
//! The rules themselves live in [`strictly_backgammon`]; this crate owns the
//! pieces a host needs around them.
//!
//! # Architecture
//!
//! - **Config**: match settings loaded from TOML
//! - **Session**: dice, persistence and one-action-at-a-time access to a game
//! - **Autoplay**: move-picking strategies and a self-play match driver
//!
//! # Example
//!
//! ```
//! use strictly_games::{MatchConfig, StrategyKind, play_match, strategy_for};
//! use strictly_backgammon::PerPlayer;
//!
//! let config = MatchConfig::new(1).with_seed(Some(7));
//! let players = PerPlayer::new(
//!     strategy_for(StrategyKind::First, 1),
//!     strategy_for(StrategyKind::First, 2),
//! );
//! let summary = play_match(&config, players).unwrap();
//! assert!(summary.score[summary.winner] >= 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod autoplay;
mod config;
mod session;

pub use strictly_backgammon;

// Crate-level exports - Configuration
pub use config::{ConfigError, MatchConfig, StrategyKind};

// Crate-level exports - Session management
pub use session::{GameSession, RollOutcome, SessionError, SessionId, SessionManager, TurnStatus};

// Crate-level exports - Self-play
pub use autoplay::{
    FirstMoveStrategy, GameRecord, MatchSummary, RandomStrategy, Strategy, play_game, play_match,
    strategy_for,
};
