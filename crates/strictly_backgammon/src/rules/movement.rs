//! Single-move legality and application.

use super::bear_off::{bear_off_moves, can_bear_off};
use crate::action::{Destination, Move, Source};
use crate::types::{GameState, POINT_COUNT, Player, Stack};
use tracing::{instrument, warn};

/// True if `player` may land on `index`: empty, own checkers, or an opposing blot.
pub fn is_point_open(state: &GameState, index: usize, player: Player) -> bool {
    match state.board().get(index) {
        None => true,
        Some(stack) => stack.owner == player || stack.is_blot(),
    }
}

/// Index reached from `from` with `die`. May fall outside the board.
pub fn target_index(from: Source, die: u8, player: Player) -> isize {
    let die = isize::from(die);
    match (from, player) {
        (Source::Bar, Player::Gold) => die - 1,
        (Source::Bar, Player::Red) => POINT_COUNT as isize - die,
        (Source::Point(index), _) => index as isize + die * player.direction(),
    }
}

fn on_board(index: isize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < POINT_COUNT)
}

/// Every single-die move available to the current player.
///
/// Empty when dice are unset or exhausted. Checkers on the bar must enter
/// before anything else moves.
#[instrument(level = "trace", skip(state), fields(player = ?state.current_player()))]
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let Some(dice) = state.dice() else {
        return Vec::new();
    };
    let player = state.current_player();
    let bearing_off = can_bear_off(state, player);
    let mut moves = Vec::new();

    for die in dice.unique_remaining() {
        if state.bar(player) > 0 {
            if let Some(to) = on_board(target_index(Source::Bar, die, player))
                && is_point_open(state, to, player)
            {
                push_unique(&mut moves, Move::enter(to));
            }
            continue;
        }

        for from in state.board().occupied_by(player) {
            if let Some(to) = on_board(target_index(Source::Point(from), die, player))
                && is_point_open(state, to, player)
            {
                push_unique(&mut moves, Move::step(from, to));
            }
        }

        if bearing_off {
            for mv in bear_off_moves(state, player, die) {
                push_unique(&mut moves, mv);
            }
        }
    }

    moves
}

fn push_unique(moves: &mut Vec<Move>, mv: Move) {
    if !moves.contains(&mv) {
        moves.push(mv);
    }
}

/// The die value `apply_move` removes for `mv`, if one matches.
///
/// Bear-offs prefer the exact distance, then the smallest larger die.
pub fn consumed_die(state: &GameState, mv: &Move) -> Option<u8> {
    let player = state.current_player();
    let remaining = state.dice()?.remaining();
    let distance = match (mv.from, mv.to) {
        (Source::Bar, Destination::Point(to)) => match player {
            Player::Gold => to + 1,
            Player::Red => POINT_COUNT - to,
        },
        (Source::Point(from), Destination::Point(to)) => from.abs_diff(to),
        (Source::Point(from), Destination::Off) => {
            let exact = player.distance_to_off(from);
            return remaining
                .iter()
                .copied()
                .filter(|&d| usize::from(d) >= exact)
                .min();
        }
        (Source::Bar, Destination::Off) => return None,
    };
    remaining
        .iter()
        .copied()
        .find(|&d| usize::from(d) == distance)
}

/// Returns the state after the current player makes `mv`.
///
/// `mv` must come from [`legal_moves`]; anything else is a contract
/// violation. The engine logs it and still returns a state rather than
/// panicking.
#[instrument(level = "trace", skip(state), fields(player = ?state.current_player()))]
pub fn apply_move(state: &GameState, mv: Move) -> GameState {
    let player = state.current_player();
    let die = consumed_die(state, &mv);
    let mut next = state.clone();

    match mv.from {
        Source::Bar => next.bar[player] = next.bar[player].saturating_sub(1),
        Source::Point(from) => {
            let count = next.board.count_for(from, player);
            if count == 0 {
                warn!(%mv, "Moving from a point the player does not hold");
            }
            let left = count.saturating_sub(1);
            next.board.set(from, (left > 0).then(|| Stack::new(player, left)));
        }
    }

    match mv.to {
        Destination::Off => next.borne_off[player] += 1,
        Destination::Point(to) => match next.board.get(to) {
            None => next.board.set(to, Some(Stack::new(player, 1))),
            Some(stack) if stack.owner == player => {
                next.board.set(to, Some(Stack::new(player, stack.count + 1)));
            }
            Some(stack) => {
                if !stack.is_blot() {
                    warn!(%mv, count = stack.count, "Landing on a blocked point");
                }
                next.bar[stack.owner] += stack.count;
                next.board.set(to, Some(Stack::new(player, 1)));
            }
        },
    }

    match (die, next.dice.as_mut()) {
        (Some(die), Some(dice)) => {
            dice.consume(die);
        }
        _ => warn!(%mv, "No die matches the move"),
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Dice;

    fn gold_runner(index: usize, dice: Dice) -> GameState {
        GameState::empty(Player::Gold)
            .with_stack(index, Player::Gold, 1)
            .with_borne_off(Player::Gold, 14)
            .with_borne_off(Player::Red, 15)
            .with_dice(dice)
    }

    #[test]
    fn test_point_open_rules() {
        let state = GameState::empty(Player::Gold)
            .with_stack(3, Player::Red, 1)
            .with_stack(4, Player::Red, 2)
            .with_stack(5, Player::Gold, 3);
        assert!(is_point_open(&state, 2, Player::Gold));
        assert!(is_point_open(&state, 3, Player::Gold));
        assert!(!is_point_open(&state, 4, Player::Gold));
        assert!(is_point_open(&state, 5, Player::Gold));
        assert!(!is_point_open(&state, 5, Player::Red));
    }

    #[test]
    fn test_target_index() {
        assert_eq!(target_index(Source::Bar, 3, Player::Gold), 2);
        assert_eq!(target_index(Source::Bar, 3, Player::Red), 21);
        assert_eq!(target_index(Source::Point(10), 4, Player::Gold), 14);
        assert_eq!(target_index(Source::Point(10), 4, Player::Red), 6);
        assert_eq!(target_index(Source::Point(2), 5, Player::Red), -3);
    }

    #[test]
    fn test_no_dice_no_moves() {
        let state = GameState::empty(Player::Gold).with_stack(0, Player::Gold, 15);
        assert!(legal_moves(&state).is_empty());
    }

    #[test]
    fn test_exhausted_dice_no_moves() {
        let mut dice = Dice::new(1, 2);
        dice.consume(1);
        dice.consume(2);
        let state = gold_runner(0, dice);
        assert!(legal_moves(&state).is_empty());
    }

    #[test]
    fn test_double_collapses_candidates() {
        let state = gold_runner(0, Dice::new(2, 2));
        assert_eq!(legal_moves(&state), vec![Move::step(0, 2)]);
    }

    #[test]
    fn test_bar_checker_must_enter_first() {
        let state = GameState::empty(Player::Red)
            .with_bar(Player::Red, 1)
            .with_stack(12, Player::Red, 14)
            .with_stack(0, Player::Gold, 15)
            .with_dice(Dice::new(3, 5));
        assert_eq!(legal_moves(&state), vec![Move::enter(21), Move::enter(19)]);
    }

    #[test]
    fn test_blocked_entry_yields_nothing() {
        let mut state = GameState::empty(Player::Gold)
            .with_bar(Player::Gold, 1)
            .with_stack(10, Player::Gold, 14);
        for index in 0..6 {
            state = state.with_stack(index, Player::Red, 2);
        }
        let state = state
            .with_borne_off(Player::Red, 3)
            .with_dice(Dice::new(4, 6));
        assert!(legal_moves(&state).is_empty());
    }

    #[test]
    fn test_hit_sends_blot_to_bar() {
        let state = GameState::empty(Player::Gold)
            .with_stack(0, Player::Gold, 2)
            .with_stack(3, Player::Red, 1)
            .with_dice(Dice::new(3, 1));
        let next = apply_move(&state, Move::step(0, 3));
        assert_eq!(next.bar(Player::Red), 1);
        assert_eq!(next.board().get(3), Some(Stack::new(Player::Gold, 1)));
        assert_eq!(next.board().get(0), Some(Stack::new(Player::Gold, 1)));
        assert_eq!(next.dice().map(|d| d.remaining().to_vec()), Some(vec![1]));
        // Original untouched.
        assert_eq!(state.bar(Player::Red), 0);
    }

    #[test]
    fn test_source_cleared_and_destination_stacked() {
        let state = GameState::empty(Player::Red)
            .with_stack(10, Player::Red, 1)
            .with_stack(6, Player::Red, 2)
            .with_dice(Dice::new(4, 2));
        let next = apply_move(&state, Move::step(10, 6));
        assert_eq!(next.board().get(10), None);
        assert_eq!(next.board().get(6), Some(Stack::new(Player::Red, 3)));
    }

    #[test]
    fn test_bar_entry_consumes_entry_die() {
        let state = GameState::empty(Player::Red)
            .with_bar(Player::Red, 1)
            .with_dice(Dice::new(2, 6));
        let next = apply_move(&state, Move::enter(18));
        assert_eq!(next.bar(Player::Red), 0);
        assert_eq!(next.board().get(18), Some(Stack::new(Player::Red, 1)));
        assert_eq!(next.dice().map(|d| d.remaining().to_vec()), Some(vec![2]));
    }

    #[test]
    fn test_bear_off_prefers_exact_die() {
        let state = GameState::empty(Player::Gold)
            .with_stack(20, Player::Gold, 2)
            .with_dice(Dice::new(6, 4));
        let next = apply_move(&state, Move::bear_off(20));
        assert_eq!(next.borne_off(Player::Gold), 1);
        assert_eq!(next.board().get(20), Some(Stack::new(Player::Gold, 1)));
        assert_eq!(next.dice().map(|d| d.remaining().to_vec()), Some(vec![6]));
    }

    #[test]
    fn test_bear_off_uses_smallest_higher_die() {
        let state = GameState::empty(Player::Red)
            .with_stack(1, Player::Red, 1)
            .with_dice(Dice::new(6, 4));
        assert_eq!(consumed_die(&state, &Move::bear_off(1)), Some(4));
        let next = apply_move(&state, Move::bear_off(1));
        assert_eq!(next.dice().map(|d| d.remaining().to_vec()), Some(vec![6]));
    }
}
