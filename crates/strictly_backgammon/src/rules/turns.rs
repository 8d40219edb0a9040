//! Whole-turn search and the constrained first-move filter.
//!
//! The search enumerates every maximal sequence of moves the current dice
//! allow. The filter turns those sequences into the moves a player may make
//! right now, enforcing the two dice-usage rules:
//!
//! - play as many dice as possible;
//! - if only one die of a non-double can be played, play the higher one.

use super::movement::{apply_move, consumed_die, legal_moves};
use crate::action::Move;
use crate::types::GameState;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Every maximal move sequence reachable with the remaining dice.
///
/// A sequence ends when no further move is legal. Identical sequences
/// reached through different branches appear once. When nothing can be
/// played the result holds a single empty turn.
#[instrument(level = "trace", skip(state), fields(player = ?state.current_player()))]
pub fn all_legal_turns(state: &GameState) -> Vec<Vec<Move>> {
    let mut turns = Vec::new();
    let mut seen = HashSet::new();
    explore(state, &mut Vec::new(), &mut seen, &mut turns);
    turns
}

fn explore(
    state: &GameState,
    prefix: &mut Vec<Move>,
    seen: &mut HashSet<Vec<Move>>,
    turns: &mut Vec<Vec<Move>>,
) {
    let moves = legal_moves(state);
    if moves.is_empty() {
        if seen.insert(prefix.clone()) {
            turns.push(prefix.clone());
        }
        return;
    }
    for mv in moves {
        let next = apply_move(state, mv);
        prefix.push(mv);
        explore(&next, prefix, seen, turns);
        prefix.pop();
    }
}

/// Moves the current player may choose now.
///
/// Empty when no move exists for this roll, which the host treats as a
/// forfeited turn. Call again after each move: this answers one step at a
/// time, not a plan for the whole turn.
#[instrument(skip(state), fields(player = ?state.current_player()))]
pub fn constrained_moves(state: &GameState) -> Vec<Move> {
    let turns = all_legal_turns(state);
    let longest = turns.iter().map(Vec::len).max().unwrap_or(0);
    if longest == 0 {
        debug!("No playable move this roll");
        return Vec::new();
    }

    let mut firsts: Vec<Move> = Vec::new();
    for turn in turns.iter().filter(|t| t.len() == longest) {
        if let Some(&first) = turn.first()
            && !firsts.contains(&first)
        {
            firsts.push(first);
        }
    }

    let single_die_of_pair = longest == 1
        && state
            .dice()
            .is_some_and(|d| !d.is_double() && d.remaining().len() == 2);
    if single_die_of_pair {
        let highest = firsts
            .iter()
            .filter_map(|mv| consumed_die(state, mv))
            .max();
        firsts.retain(|mv| consumed_die(state, mv) == highest);
    }

    debug!(count = firsts.len(), longest, "Constrained moves computed");
    firsts
}
