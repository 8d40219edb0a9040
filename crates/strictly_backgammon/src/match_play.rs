//! Match scoring and the Crawford rule.

use crate::action::MoveError;
use crate::contracts::InPhase;
use crate::rules::game_points;
use crate::state::create_match_state;
use crate::types::{GamePhase, GameState, Player};
use tracing::{info, instrument};

/// Player who has reached the match length, if any.
pub fn match_winner(state: &GameState) -> Option<Player> {
    let score = state.score();
    [Player::Gold, Player::Red]
        .into_iter()
        .find(|&p| score[p] >= state.match_length())
}

/// Scores a finished game and sets up the next one.
///
/// The winner gets the game's points and opens the next game. That game is
/// the Crawford game when the winner has just reached one point short of
/// the match while the loser is still further behind.
#[instrument(skip(state))]
pub fn record_game(state: &GameState) -> Result<GameState, MoveError> {
    InPhase::check(state, GamePhase::GameOver)?;
    let (Some(winner), Some(points)) = (state.winner(), game_points(state)) else {
        return Err(MoveError::InvariantViolation(
            "finished game has no winner".to_string(),
        ));
    };

    let mut score = state.score();
    let before = score[winner];
    score[winner] += points;
    let match_point = state.match_length().saturating_sub(1);
    let crawford = before < match_point
        && score[winner] == match_point
        && score[winner.opponent()] < match_point;

    info!(
        %winner,
        points,
        gold = score.gold,
        red = score.red,
        crawford,
        "Game recorded"
    );

    let mut next = create_match_state(state.match_length())
        .with_score(score, state.match_length())
        .with_crawford(crawford);
    next.current_player = winner;
    Ok(next)
}
