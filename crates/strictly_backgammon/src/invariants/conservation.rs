//! Piece conservation: fifteen checkers per player, always.

use super::Invariant;
use crate::types::{CHECKERS_PER_PLAYER, GameState, Player};
use strum::IntoEnumIterator;
use tracing::warn;

/// Invariant: points + bar + borne off equals fifteen for each player.
pub struct PieceConservationInvariant;

impl Invariant<GameState> for PieceConservationInvariant {
    fn holds(state: &GameState) -> bool {
        Player::iter().all(|player| {
            let total = state.total_pieces(player);
            let valid = total == u32::from(CHECKERS_PER_PLAYER);
            if !valid {
                warn!(%player, total, "Piece conservation violated");
            }
            valid
        })
    }

    fn description() -> &'static str {
        "Each player has exactly 15 checkers on points, bar and borne off"
    }
}
