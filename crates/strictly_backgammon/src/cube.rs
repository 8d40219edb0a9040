//! Doubling cube negotiation.
//!
//! The player about to roll may offer a double when the cube is centered or
//! theirs. The opponent either takes (the cube doubles and they own it) or
//! drops (the offerer wins a single game at the current stake). There is no
//! doubling during the Crawford game.

use crate::action::MoveError;
use crate::contracts::InPhase;
use crate::types::{DoublingCube, GamePhase, GameState, MAX_CUBE_VALUE, WinType};
use tracing::{info, instrument};

/// Why the current player may not double, if they may not.
fn offer_blocker(state: &GameState) -> Option<MoveError> {
    if let Err(err) = InPhase::check(state, GamePhase::Rolling) {
        return Some(err);
    }
    if state.is_crawford() {
        return Some(MoveError::CrawfordGame);
    }
    let player = state.current_player();
    let cube = state.cube();
    let owns = cube.owner.is_none_or(|owner| owner == player);
    if !owns || cube.value >= MAX_CUBE_VALUE {
        return Some(MoveError::CubeNotAvailable(player));
    }
    None
}

/// True if the current player may offer a double right now.
pub fn can_offer_double(state: &GameState) -> bool {
    offer_blocker(state).is_none()
}

/// The current player offers a double; the opponent must respond.
#[instrument(skip(state), fields(player = ?state.current_player()))]
pub fn offer_double(state: &GameState) -> Result<GameState, MoveError> {
    if let Some(err) = offer_blocker(state) {
        return Err(err);
    }
    let mut next = state.clone();
    next.phase = GamePhase::Doubling;
    info!(cube = state.cube().value, "Double offered");
    Ok(next)
}

/// The opponent takes: the cube doubles and passes to them.
///
/// The offerer then rolls as usual.
#[instrument(skip(state), fields(offerer = ?state.current_player()))]
pub fn accept_double(state: &GameState) -> Result<GameState, MoveError> {
    InPhase::check(state, GamePhase::Doubling)?;
    let mut next = state.clone();
    next.cube = DoublingCube {
        value: state.cube().value * 2,
        owner: Some(state.current_player().opponent()),
    };
    next.phase = GamePhase::Rolling;
    info!(cube = next.cube.value, "Double accepted");
    Ok(next)
}

/// The opponent drops: the offerer wins a single game at the current stake.
#[instrument(skip(state), fields(offerer = ?state.current_player()))]
pub fn decline_double(state: &GameState) -> Result<GameState, MoveError> {
    InPhase::check(state, GamePhase::Doubling)?;
    let mut next = state.clone();
    next.phase = GamePhase::GameOver;
    next.winner = Some(state.current_player());
    next.win_type = Some(WinType::Single);
    info!(cube = state.cube().value, "Double declined");
    Ok(next)
}
