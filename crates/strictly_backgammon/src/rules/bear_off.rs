//! Bear-off eligibility and the exact/higher-die tie-break.

use crate::action::Move;
use crate::types::{GameState, Player};
use tracing::instrument;

/// True if every checker `player` still has in play sits in their home board.
///
/// Checkers already borne off don't matter; a checker on the bar does.
#[instrument(level = "trace", skip(state))]
pub fn can_bear_off(state: &GameState, player: Player) -> bool {
    if state.bar(player) > 0 {
        return false;
    }
    let home = player.home_range();
    state.board().occupied_by(player).all(|i| home.contains(&i))
}

/// Home point of `player`'s checker farthest from the bear-off edge.
fn farthest_back(state: &GameState, player: Player) -> Option<usize> {
    let mut occupied = state
        .board()
        .occupied_by(player)
        .filter(|i| player.home_range().contains(i));
    match player {
        Player::Gold => occupied.next(),
        Player::Red => occupied.last(),
    }
}

/// Bear-off moves `die` allows for `player`.
///
/// A checker exactly `die` pips from the edge may leave. A larger die may
/// also remove the farthest-back checker when nothing sits behind it.
/// Empty when `player` may not bear off at all.
#[instrument(level = "trace", skip(state))]
pub fn bear_off_moves(state: &GameState, player: Player, die: u8) -> Vec<Move> {
    if !can_bear_off(state, player) {
        return Vec::new();
    }
    let die = usize::from(die);
    let mut moves = Vec::with_capacity(2);

    let exact = player
        .home_range()
        .find(|&i| player.distance_to_off(i) == die && state.board().count_for(i, player) > 0);
    if let Some(index) = exact {
        moves.push(Move::bear_off(index));
    }

    if let Some(index) = farthest_back(state, player)
        && die > player.distance_to_off(index)
        && exact != Some(index)
    {
        moves.push(Move::bear_off(index));
    }

    moves
}
