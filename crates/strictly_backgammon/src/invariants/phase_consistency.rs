//! Phase and the fields it implies agree.

use super::Invariant;
use crate::types::{GamePhase, GameState};

/// Invariant: dice exist only while moving, and only a finished game has a winner.
pub struct PhaseConsistencyInvariant;

impl Invariant<GameState> for PhaseConsistencyInvariant {
    fn holds(state: &GameState) -> bool {
        let dice_ok = match state.phase() {
            GamePhase::Rolling | GamePhase::Doubling => state.dice().is_none(),
            GamePhase::Moving => state.dice().is_some(),
            GamePhase::GameOver => true,
        };
        let over = state.phase() == GamePhase::GameOver;
        let winner_ok = over == state.winner().is_some() && over == state.win_type().is_some();
        dice_ok && winner_ok
    }

    fn description() -> &'static str {
        "Dice are set only while moving; winner is set only when the game is over"
    }
}
