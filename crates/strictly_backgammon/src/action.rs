//! First-class move types for backgammon.
//!
//! A move is one checker travelling for one die. Moves carry no die value:
//! the distance is implied by the endpoints, and `apply_move` works out which
//! die it consumes.

use crate::types::{GamePhase, Player};
use serde::{Deserialize, Serialize};

/// Where a checker leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Entering from the bar.
    Bar,
    /// A point index (0-23).
    Point(usize),
}

/// Where a checker arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// A point index (0-23).
    Point(usize),
    /// Borne off the board.
    Off,
}

/// A single checker displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// Where the checker starts.
    pub from: Source,
    /// Where the checker ends.
    pub to: Destination,
}

impl Move {
    /// Point-to-point move.
    pub fn step(from: usize, to: usize) -> Self {
        Self::new(Source::Point(from), Destination::Point(to))
    }

    /// Entry from the bar onto `to`.
    pub fn enter(to: usize) -> Self {
        Self::new(Source::Bar, Destination::Point(to))
    }

    /// Bearing off the checker on `from`.
    pub fn bear_off(from: usize) -> Self {
        Self::new(Source::Point(from), Destination::Off)
    }

    /// True for bear-off moves.
    pub fn is_bear_off(&self) -> bool {
        self.to == Destination::Off
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Human notation is 1-based.
        match self.from {
            Source::Bar => write!(f, "bar")?,
            Source::Point(i) => write!(f, "{}", i + 1)?,
        }
        match self.to {
            Destination::Point(i) => write!(f, "/{}", i + 1),
            Destination::Off => write!(f, "/off"),
        }
    }
}

/// Error that can occur when validating or applying a state transition.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The action is not allowed in the current phase.
    #[display("Expected phase {}, game is in {}", expected, actual)]
    WrongPhase {
        /// Phase the action requires.
        expected: GamePhase,
        /// Phase the game is in.
        actual: GamePhase,
    },

    /// The move is not among the currently allowed moves.
    #[display("Illegal move {}", _0)]
    IllegalMove(Move),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// Doubling is suspended during the Crawford game.
    #[display("No doubling in the Crawford game")]
    CrawfordGame,

    /// The cube is owned by the other player or already at its maximum.
    #[display("{} may not double now", _0)]
    CubeNotAvailable(Player),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
