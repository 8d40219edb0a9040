//! First-class invariants for backgammon.
//!
//! Invariants are properties every reachable [`GameState`](crate::GameState)
//! satisfies. Validated transitions check them as postconditions in debug
//! builds, and tests check them over self-played games.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn into_result(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        into_result(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        into_result(violations)
    }
}

pub mod conservation;
pub mod dice_remaining;
pub mod phase_consistency;

pub use conservation::PieceConservationInvariant;
pub use dice_remaining::DiceRemainingInvariant;
pub use phase_consistency::PhaseConsistencyInvariant;

/// All backgammon invariants as a composable set.
pub type BackgammonInvariants = (
    PieceConservationInvariant,
    DiceRemainingInvariant,
    PhaseConsistencyInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameState, Player, create_initial_state};

    #[test]
    fn test_invariant_set_holds_for_opening() {
        assert!(BackgammonInvariants::check_all(&create_initial_state()).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = GameState::empty(Player::Gold);
        state.phase = crate::GamePhase::Moving;
        let violations = BackgammonInvariants::check_all(&state).unwrap_err();
        // Missing checkers and moving without dice.
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (PieceConservationInvariant, DiceRemainingInvariant);
        assert!(TwoInvariants::check_all(&create_initial_state()).is_ok());
    }
}
