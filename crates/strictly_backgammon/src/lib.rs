//! Pure backgammon rules engine.
//!
//! Owns the board representation, legal move enumeration under the two-dice
//! constraint, bear-off policy, and the per-turn state machine.
//!
//! # Architecture
//!
//! - **Types**: board, dice, cube and the [`GameState`] value
//! - **Rules**: single-move legality, bear-off, whole-turn search, winners
//! - **Controller**: rolling → moving → game over, plus validated `play`
//! - **Cube / match play**: doubling negotiation, match score, Crawford rule
//! - **Invariants / contracts**: properties every reachable state satisfies
//!
//! Every operation is a synchronous pure function from a state to a new
//! state (or a query result). The engine holds no global state; a host
//! persists the [`GameState`] between calls and serializes actions on it.
//!
//! # Example
//!
//! ```
//! use strictly_backgammon::{constrained_moves, create_initial_state, play, roll, roll_dice};
//!
//! let state = roll(&create_initial_state(), roll_dice(Some((3, 1)))).unwrap();
//! let moves = constrained_moves(&state);
//! let state = play(&state, moves[0]).unwrap();
//! assert_eq!(state.dice().unwrap().remaining().len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod controller;
mod cube;
mod dice;
pub mod invariants;
mod match_play;
pub mod rules;
mod state;
mod types;

// Crate-level exports - Core types
pub use action::{Destination, Move, MoveError, Source};
pub use dice::{Dice, MAX_FACE, MIN_FACE, roll_dice, roll_dice_with};
pub use types::{
    Board, CHECKERS_PER_PLAYER, DoublingCube, GamePhase, GameState, HOME_SIZE, MAX_CUBE_VALUE,
    POINT_COUNT, PerPlayer, Player, Stack, WinType,
};

// Crate-level exports - State lifecycle
pub use state::{clone_state, create_initial_state, create_match_state};

// Crate-level exports - Rules
pub use rules::{
    all_legal_turns, apply_move, bear_off_moves, can_bear_off, check_winner, constrained_moves,
    consumed_die, game_points, is_point_open, legal_moves, target_index, win_type,
};

// Crate-level exports - Turn controller
pub use controller::{can_move, end_turn, play, roll, turn_complete};

// Crate-level exports - Doubling cube and match scoring
pub use cube::{accept_double, can_offer_double, decline_double, offer_double};
pub use match_play::{match_winner, record_game};

// Crate-level exports - Contracts
pub use contracts::{AllowedMove, Contract, InPhase, MoveContract};
