//! Win detection and win-tier classification.

use crate::types::{CHECKERS_PER_PLAYER, GamePhase, GameState, Player, WinType};
use tracing::instrument;

/// Returns the player who has borne off all fifteen checkers, if any.
///
/// The player to move is checked first; only the mover can finish a game.
#[instrument(skip(state))]
pub fn check_winner(state: &GameState) -> Option<Player> {
    let mover = state.current_player();
    [mover, mover.opponent()]
        .into_iter()
        .find(|&p| state.borne_off(p) >= CHECKERS_PER_PLAYER)
}

/// Classifies `winner`'s win by what the loser has left.
#[instrument(skip(state))]
pub fn win_type(state: &GameState, winner: Player) -> WinType {
    let loser = winner.opponent();
    if state.borne_off(loser) > 0 {
        return WinType::Single;
    }
    let home = winner.home_range();
    let trapped =
        state.bar(loser) > 0 || state.board().occupied_by(loser).any(|i| home.contains(&i));
    if trapped {
        WinType::Backgammon
    } else {
        WinType::Gammon
    }
}

/// Points the finished game is worth: tier multiplier times cube value.
///
/// `None` until the game is over.
pub fn game_points(state: &GameState) -> Option<u32> {
    if state.phase() != GamePhase::GameOver {
        return None;
    }
    let multiplier = state.win_type()?.multiplier();
    Some(multiplier * state.cube().value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DoublingCube;

    fn gold_done() -> GameState {
        GameState::empty(Player::Gold).with_borne_off(Player::Gold, 15)
    }

    #[test]
    fn test_no_winner_at_start() {
        assert_eq!(check_winner(&crate::state::create_initial_state()), None);
    }

    #[test]
    fn test_fifteen_off_wins() {
        let state = gold_done().with_stack(3, Player::Red, 15);
        assert_eq!(check_winner(&state), Some(Player::Gold));
    }

    #[test]
    fn test_single_win() {
        let state = gold_done()
            .with_stack(3, Player::Red, 14)
            .with_borne_off(Player::Red, 1);
        assert_eq!(win_type(&state, Player::Gold), WinType::Single);
    }

    #[test]
    fn test_gammon() {
        // Red's home is 0..=5; none of Red's checkers are in Gold's home.
        let state = gold_done().with_stack(3, Player::Red, 15);
        assert_eq!(win_type(&state, Player::Gold), WinType::Gammon);
    }

    #[test]
    fn test_backgammon_in_winner_home() {
        let state = gold_done()
            .with_stack(3, Player::Red, 14)
            .with_stack(20, Player::Red, 1);
        assert_eq!(win_type(&state, Player::Gold), WinType::Backgammon);
    }

    #[test]
    fn test_backgammon_on_bar() {
        let state = gold_done()
            .with_stack(3, Player::Red, 14)
            .with_bar(Player::Red, 1);
        assert_eq!(win_type(&state, Player::Gold), WinType::Backgammon);
    }

    #[test]
    fn test_red_backgammon_mirrors() {
        let state = GameState::empty(Player::Red)
            .with_borne_off(Player::Red, 15)
            .with_stack(2, Player::Gold, 1)
            .with_stack(20, Player::Gold, 14);
        assert_eq!(check_winner(&state), Some(Player::Red));
        assert_eq!(win_type(&state, Player::Red), WinType::Backgammon);
    }

    #[test]
    fn test_points_need_game_over() {
        let mut state = gold_done()
            .with_stack(3, Player::Red, 15)
            .with_cube(DoublingCube {
                value: 4,
                owner: Some(Player::Red),
            });
        assert_eq!(game_points(&state), None);
        state.phase = GamePhase::GameOver;
        state.winner = Some(Player::Gold);
        state.win_type = Some(WinType::Gammon);
        assert_eq!(game_points(&state), Some(8));
    }
}
