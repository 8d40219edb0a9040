//! Remaining dice always come from the roll.

use super::Invariant;
use crate::types::GameState;

/// Invariant: remaining dice are a sub-multiset of what was rolled.
///
/// At most two values for a plain roll, at most four copies for a double.
pub struct DiceRemainingInvariant;

impl Invariant<GameState> for DiceRemainingInvariant {
    fn holds(state: &GameState) -> bool {
        let Some(dice) = state.dice() else {
            return true;
        };
        let (a, b) = dice.values();
        let remaining = dice.remaining();
        if dice.is_double() {
            return remaining.len() <= 4 && remaining.iter().all(|&d| d == a);
        }
        let count = |face: u8| remaining.iter().filter(|&&d| d == face).count();
        remaining.len() <= 2
            && count(a) <= 1
            && count(b) <= 1
            && remaining.iter().all(|&d| d == a || d == b)
    }

    fn description() -> &'static str {
        "Remaining dice are drawn from the rolled pair"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dice, Player};

    #[test]
    fn test_fresh_roll_holds() {
        let state = GameState::empty(Player::Gold).with_dice(Dice::new(6, 1));
        assert!(DiceRemainingInvariant::holds(&state));
        let state = GameState::empty(Player::Gold).with_dice(Dice::new(2, 2));
        assert!(DiceRemainingInvariant::holds(&state));
    }

    #[test]
    fn test_no_dice_holds() {
        assert!(DiceRemainingInvariant::holds(&GameState::empty(Player::Red)));
    }
}
