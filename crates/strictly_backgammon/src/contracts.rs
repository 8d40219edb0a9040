//! Contract-based validation for backgammon moves.
//!
//! The rules engine itself trusts its inputs. Contracts are the gate a host
//! puts in front of it: preconditions reject moves that are not currently
//! allowed, postconditions confirm the result still satisfies every
//! invariant.

use crate::action::{Move, MoveError};
use crate::invariants::{BackgammonInvariants, InvariantSet};
use crate::rules::constrained_moves;
use crate::types::{GamePhase, GameState};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the game must be in `expected` phase.
pub struct InPhase;

impl InPhase {
    /// Fails with [`MoveError::GameOver`] or [`MoveError::WrongPhase`].
    #[instrument(skip(state))]
    pub fn check(state: &GameState, expected: GamePhase) -> Result<(), MoveError> {
        match state.phase() {
            actual if actual == expected => Ok(()),
            GamePhase::GameOver => Err(MoveError::GameOver),
            actual => Err(MoveError::WrongPhase { expected, actual }),
        }
    }
}

/// Precondition: the move is one the dice rules currently allow.
pub struct AllowedMove;

impl AllowedMove {
    /// Validates `mv` against the constrained move set.
    #[instrument(skip(state))]
    pub fn check(mv: &Move, state: &GameState) -> Result<(), MoveError> {
        if constrained_moves(state).contains(mv) {
            Ok(())
        } else {
            warn!(%mv, "Rejected move outside the constrained set");
            Err(MoveError::IllegalMove(*mv))
        }
    }
}

/// Contract for playing one checker.
///
/// Preconditions:
/// - the game is in the moving phase
/// - the move is in the constrained move set
///
/// Postconditions:
/// - every backgammon invariant holds
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(state: &GameState, action: &Move) -> Result<(), MoveError> {
        InPhase::check(state, GamePhase::Moving)?;
        AllowedMove::check(action, state)
    }

    fn post(_before: &GameState, after: &GameState) -> Result<(), MoveError> {
        BackgammonInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
