//! Game state lifecycle: the opening layout and independent copies.

use crate::types::{GameState, PerPlayer, Player};
use tracing::{debug, instrument};

/// Opening layout as `(index, count)` from Gold's side; Red is mirrored.
const OPENING_LAYOUT: [(usize, u8); 4] = [(0, 2), (11, 5), (16, 3), (18, 5)];

/// Creates a single game (match to 1) in the standard opening position.
#[instrument]
pub fn create_initial_state() -> GameState {
    create_match_state(1)
}

/// Creates the opening position for a match played to `match_length` points.
#[instrument]
pub fn create_match_state(match_length: u32) -> GameState {
    let state = OPENING_LAYOUT
        .iter()
        .fold(GameState::empty(Player::Gold), |state, &(index, count)| {
            state
                .with_stack(index, Player::Gold, count)
                .with_stack(23 - index, Player::Red, count)
        })
        .with_score(PerPlayer::default(), match_length.max(1));
    debug!(match_length = state.match_length(), "Created opening position");
    state
}

/// Returns a copy of `state` that shares nothing with the original.
pub fn clone_state(state: &GameState) -> GameState {
    state.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Dice;
    use crate::types::{CHECKERS_PER_PLAYER, GamePhase, Stack};
    use strum::IntoEnumIterator;

    #[test]
    fn test_opening_position() {
        let state = create_initial_state();
        let board = state.board();
        assert_eq!(board.get(0), Some(Stack::new(Player::Gold, 2)));
        assert_eq!(board.get(11), Some(Stack::new(Player::Gold, 5)));
        assert_eq!(board.get(16), Some(Stack::new(Player::Gold, 3)));
        assert_eq!(board.get(18), Some(Stack::new(Player::Gold, 5)));
        assert_eq!(board.get(23), Some(Stack::new(Player::Red, 2)));
        assert_eq!(board.get(12), Some(Stack::new(Player::Red, 5)));
        assert_eq!(board.get(7), Some(Stack::new(Player::Red, 3)));
        assert_eq!(board.get(5), Some(Stack::new(Player::Red, 5)));
        assert_eq!(state.phase(), GamePhase::Rolling);
        assert!(state.dice().is_none());
        assert_eq!(state.cube().value, 1);
        assert_eq!(state.cube().owner, None);
        assert_eq!(state.current_player(), Player::Gold);
    }

    #[test]
    fn test_opening_has_fifteen_each() {
        let state = create_initial_state();
        for player in Player::iter() {
            assert_eq!(state.total_pieces(player), u32::from(CHECKERS_PER_PLAYER));
            assert_eq!(state.pip_count(player), 167);
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let original = create_initial_state().with_dice(Dice::new(6, 6));
        let mut copy = clone_state(&original);
        copy.board.set(0, None);
        if let Some(dice) = copy.dice.as_mut() {
            dice.consume(6);
        }
        assert_eq!(original.board().get(0), Some(Stack::new(Player::Gold, 2)));
        assert_eq!(original.dice().map(|d| d.remaining().len()), Some(4));
    }

    #[test]
    fn test_match_length_is_at_least_one() {
        assert_eq!(create_match_state(0).match_length(), 1);
        assert_eq!(create_match_state(7).match_length(), 7);
    }
}
