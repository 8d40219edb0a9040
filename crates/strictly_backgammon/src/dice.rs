//! Dice rolls and the multiset of dice still playable this turn.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Lowest face of a die.
pub const MIN_FACE: u8 = 1;

/// Highest face of a die.
pub const MAX_FACE: u8 = 6;

/// A roll of two dice and the values not yet played.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    values: (u8, u8),
    remaining: Vec<u8>,
}

impl Dice {
    /// Creates a roll from two faces.
    ///
    /// A double yields four plays of the same value.
    pub fn new(a: u8, b: u8) -> Self {
        debug_assert!((MIN_FACE..=MAX_FACE).contains(&a), "die out of range: {a}");
        debug_assert!((MIN_FACE..=MAX_FACE).contains(&b), "die out of range: {b}");
        let remaining = if a == b { vec![a; 4] } else { vec![a, b] };
        Self {
            values: (a, b),
            remaining,
        }
    }

    /// The rolled pair.
    pub fn values(&self) -> (u8, u8) {
        self.values
    }

    /// Values still playable this turn, in roll order.
    pub fn remaining(&self) -> &[u8] {
        &self.remaining
    }

    /// True if both dice show the same face.
    pub fn is_double(&self) -> bool {
        self.values.0 == self.values.1
    }

    /// True once every value has been played.
    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remaining values with duplicates collapsed, in first-seen order.
    pub fn unique_remaining(&self) -> Vec<u8> {
        let mut unique = Vec::with_capacity(2);
        for &die in &self.remaining {
            if !unique.contains(&die) {
                unique.push(die);
            }
        }
        unique
    }

    /// Removes one instance of `value`. Returns false if it was not available.
    pub fn consume(&mut self, value: u8) -> bool {
        match self.remaining.iter().position(|&d| d == value) {
            Some(i) => {
                self.remaining.remove(i);
                true
            }
            None => false,
        }
    }
}

/// Rolls two dice, or uses `forced` verbatim when given.
///
/// The forced pair is the deterministic hook for tests and replays.
#[instrument]
pub fn roll_dice(forced: Option<(u8, u8)>) -> Dice {
    match forced {
        Some((a, b)) => Dice::new(a, b),
        None => roll_dice_with(&mut rand::rng()),
    }
}

/// Rolls two dice drawing from `rng`.
#[instrument(skip(rng))]
pub fn roll_dice_with<R: Rng>(rng: &mut R) -> Dice {
    let a = rng.random_range(MIN_FACE..=MAX_FACE);
    let b = rng.random_range(MIN_FACE..=MAX_FACE);
    debug!(a, b, "Rolled dice");
    Dice::new(a, b)
}
