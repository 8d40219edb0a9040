//! Turn and phase controller.
//!
//! ```text
//! Rolling --roll--> Moving --end_turn--> Rolling (opponent)
//!    |                  \--end_turn--> GameOver (winner found)
//!    \--offer_double--> Doubling --accept--> Rolling
//!                                \--decline--> GameOver
//! ```
//!
//! Doubling transitions live in [`crate::cube`].

use crate::action::{Move, MoveError};
use crate::contracts::{Contract, InPhase, MoveContract};
use crate::dice::Dice;
use crate::rules::{apply_move, check_winner, legal_moves, win_type};
use crate::types::{GamePhase, GameState};
use tracing::{debug, info, instrument};

/// True if the current player has at least one legal single move.
#[instrument(skip(state))]
pub fn can_move(state: &GameState) -> bool {
    !legal_moves(state).is_empty()
}

/// True once the mover has nothing left to play this turn.
///
/// The constrained moves are empty exactly when no single move is legal, so
/// this skips the whole-turn search.
pub fn turn_complete(state: &GameState) -> bool {
    state.phase() == GamePhase::Moving && legal_moves(state).is_empty()
}

/// Closes the current turn.
///
/// A winner ends the game and leaves the board as it is. Otherwise the
/// opponent is up, back in the rolling phase with no dice.
#[instrument(skip(state), fields(player = ?state.current_player()))]
pub fn end_turn(state: &GameState) -> GameState {
    let mut next = state.clone();
    if let Some(winner) = check_winner(state) {
        let tier = win_type(state, winner);
        info!(%winner, win_type = %tier, "Game over");
        next.phase = GamePhase::GameOver;
        next.winner = Some(winner);
        next.win_type = Some(tier);
        return next;
    }
    next.current_player = state.current_player().opponent();
    next.phase = GamePhase::Rolling;
    next.dice = None;
    debug!(next_player = %next.current_player, "Turn passed");
    next
}

/// Starts the moving phase with `dice`.
#[instrument(skip(state), fields(player = ?state.current_player()))]
pub fn roll(state: &GameState, dice: Dice) -> Result<GameState, MoveError> {
    InPhase::check(state, GamePhase::Rolling)?;
    let next = state.clone().with_dice(dice);
    debug!(dice = ?next.dice().map(Dice::values), "Dice set");
    Ok(next)
}

/// Plays one checker after validating it against the dice rules.
///
/// Preconditions are always checked; postconditions in debug builds only.
#[instrument(skip(state), fields(player = ?state.current_player()))]
pub fn play(state: &GameState, mv: Move) -> Result<GameState, MoveError> {
    MoveContract::pre(state, &mv)?;
    let next = apply_move(state, mv);

    #[cfg(debug_assertions)]
    MoveContract::post(state, &next)?;

    debug!(%mv, "Move played");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Player, WinType};
    use crate::create_initial_state;
    use crate::rules::constrained_moves;

    #[test]
    fn test_end_turn_switches_player() {
        let state = create_initial_state().with_dice(Dice::new(3, 1));
        let next = end_turn(&state);
        assert_eq!(next.current_player(), Player::Red);
        assert_eq!(next.phase(), GamePhase::Rolling);
        assert!(next.dice().is_none());
        assert_eq!(next.winner(), None);
    }

    #[test]
    fn test_end_turn_detects_winner() {
        let state = GameState::empty(Player::Gold)
            .with_borne_off(Player::Gold, 15)
            .with_stack(5, Player::Red, 10)
            .with_borne_off(Player::Red, 5)
            .with_dice(Dice::new(1, 2));
        let next = end_turn(&state);
        assert_eq!(next.phase(), GamePhase::GameOver);
        assert_eq!(next.winner(), Some(Player::Gold));
        assert_eq!(next.win_type(), Some(WinType::Single));
        assert_eq!(next.current_player(), Player::Gold);
        assert_eq!(next.board(), state.board());
    }

    #[test]
    fn test_roll_only_when_rolling() {
        let state = create_initial_state();
        let rolled = roll(&state, Dice::new(6, 5)).unwrap();
        assert_eq!(rolled.phase(), GamePhase::Moving);
        assert!(matches!(
            roll(&rolled, Dice::new(1, 1)),
            Err(MoveError::WrongPhase { .. })
        ));
    }

    #[test]
    fn test_play_rejects_illegal_move() {
        let state = roll(&create_initial_state(), Dice::new(6, 5)).unwrap();
        assert_eq!(
            play(&state, Move::step(0, 2)),
            Err(MoveError::IllegalMove(Move::step(0, 2)))
        );
    }

    #[test]
    fn test_full_turn() {
        let state = roll(&create_initial_state(), Dice::new(6, 5)).unwrap();
        let state = play(&state, Move::step(0, 6)).unwrap();
        assert!(!turn_complete(&state));
        let state = play(&state, Move::step(6, 11)).unwrap();
        assert!(turn_complete(&state));
        assert!(!can_move(&state));
        let state = end_turn(&state);
        assert_eq!(state.current_player(), Player::Red);
    }

    #[test]
    fn test_game_over_rejects_roll() {
        let state = GameState::empty(Player::Gold)
            .with_borne_off(Player::Gold, 15)
            .with_borne_off(Player::Red, 15);
        let over = end_turn(&state);
        assert_eq!(roll(&over, Dice::new(1, 2)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_turn_complete_when_dice_left_but_blocked() {
        let mut state = GameState::empty(Player::Gold)
            .with_bar(Player::Gold, 1)
            .with_stack(12, Player::Gold, 14)
            .with_borne_off(Player::Red, 3);
        for index in 0..6 {
            state = state.with_stack(index, Player::Red, 2);
        }
        let state = state.with_dice(Dice::new(4, 2));
        assert!(!state.dice().unwrap().is_exhausted());
        assert!(turn_complete(&state));
        assert!(constrained_moves(&state).is_empty());
    }

    #[test]
    fn test_turn_complete_agrees_with_constrained_moves() {
        let mut state = roll(&create_initial_state(), Dice::new(2, 2)).unwrap();
        loop {
            let allowed = constrained_moves(&state);
            assert_eq!(turn_complete(&state), allowed.is_empty());
            let Some(&mv) = allowed.first() else { break };
            state = play(&state, mv).unwrap();
        }
    }
}
