//! Core domain types for backgammon.

use crate::dice::Dice;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, RangeInclusive};

/// Number of points on the board.
pub const POINT_COUNT: usize = 24;

/// Checkers each player owns for the whole game.
pub const CHECKERS_PER_PLAYER: u8 = 15;

/// Number of points in a home board.
pub const HOME_SIZE: usize = 6;

/// Highest value the doubling cube can reach.
pub const MAX_CUBE_VALUE: u32 = 64;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Moves from index 0 toward index 23 (moves first in a new match).
    Gold,
    /// Moves from index 23 toward index 0.
    Red,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Gold => Player::Red,
            Player::Red => Player::Gold,
        }
    }

    /// Travel direction along the point indices.
    pub fn direction(self) -> isize {
        match self {
            Player::Gold => 1,
            Player::Red => -1,
        }
    }

    /// Indices of this player's home board.
    pub fn home_range(self) -> RangeInclusive<usize> {
        match self {
            Player::Gold => POINT_COUNT - HOME_SIZE..=POINT_COUNT - 1,
            Player::Red => 0..=HOME_SIZE - 1,
        }
    }

    /// Pips a checker on `index` must travel to leave the board.
    pub fn distance_to_off(self, index: usize) -> usize {
        match self {
            Player::Gold => POINT_COUNT - index,
            Player::Red => index + 1,
        }
    }
}

/// One or more checkers of a single owner on a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Stack {
    /// Owner of every checker on the point.
    pub owner: Player,
    /// Number of checkers, always at least one.
    pub count: u8,
}

impl Stack {
    /// True if this is a lone checker that can be hit.
    pub fn is_blot(&self) -> bool {
        self.count == 1
    }
}

/// The 24 points of the board.
///
/// Index 0 is point 1 for both players.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    points: [Option<Stack>; POINT_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            points: [None; POINT_COUNT],
        }
    }

    /// Returns the stack on `index`, if any.
    pub fn get(&self, index: usize) -> Option<Stack> {
        self.points.get(index).copied().flatten()
    }

    /// Replaces the content of `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, slot: Option<Stack>) {
        if let Some(point) = self.points.get_mut(index) {
            *point = slot.filter(|s| s.count > 0);
        }
    }

    /// Owner of `index`, if occupied.
    pub fn owner(&self, index: usize) -> Option<Player> {
        self.get(index).map(|s| s.owner)
    }

    /// Checkers `player` has on `index`.
    pub fn count_for(&self, index: usize, player: Player) -> u8 {
        match self.get(index) {
            Some(stack) if stack.owner == player => stack.count,
            _ => 0,
        }
    }

    /// Indices occupied by `player`, ascending.
    pub fn occupied_by(&self, player: Player) -> impl Iterator<Item = usize> + '_ {
        self.points
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| match slot {
                Some(stack) if stack.owner == player => Some(i),
                _ => None,
            })
    }

    /// All slots in index order.
    pub fn points(&self) -> &[Option<Stack>; POINT_COUNT] {
        &self.points
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A value kept once per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PerPlayer<T> {
    /// Gold's value.
    pub gold: T,
    /// Red's value.
    pub red: T,
}

impl<T> PerPlayer<T> {
    /// Creates a per-player pair.
    pub fn new(gold: T, red: T) -> Self {
        Self { gold, red }
    }
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &T {
        match player {
            Player::Gold => &self.gold,
            Player::Red => &self.red,
        }
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut T {
        match player {
            Player::Gold => &mut self.gold,
            Player::Red => &mut self.red,
        }
    }
}

/// The doubling cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoublingCube {
    /// Current stake multiplier.
    pub value: u32,
    /// Player allowed to redouble; `None` while centered.
    pub owner: Option<Player>,
}

impl DoublingCube {
    /// A centered cube at 1.
    pub fn centered() -> Self {
        Self {
            value: 1,
            owner: None,
        }
    }
}

impl Default for DoublingCube {
    fn default() -> Self {
        Self::centered()
    }
}

/// Phase of the per-turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GamePhase {
    /// Current player must roll (or offer a double).
    Rolling,
    /// Current player is playing the rolled dice.
    Moving,
    /// Current player offered a double; the opponent must respond.
    Doubling,
    /// The game is decided.
    GameOver,
}

/// How decisively a game was won.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum WinType {
    /// Loser bore off at least one checker.
    Single,
    /// Loser bore off nothing.
    Gammon,
    /// Gammon with a loser checker on the bar or in the winner's home board.
    Backgammon,
}

impl WinType {
    /// Points multiplier before the cube is applied.
    pub fn multiplier(self) -> u32 {
        match self {
            WinType::Single => 1,
            WinType::Gammon => 2,
            WinType::Backgammon => 3,
        }
    }
}

/// Complete game and match state.
///
/// This is a plain value: every rule function reads a `&GameState` and
/// returns a new one, so cloning is the only way state is shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) bar: PerPlayer<u8>,
    pub(crate) borne_off: PerPlayer<u8>,
    pub(crate) dice: Option<Dice>,
    pub(crate) cube: DoublingCube,
    pub(crate) current_player: Player,
    pub(crate) phase: GamePhase,
    pub(crate) score: PerPlayer<u32>,
    pub(crate) match_length: u32,
    pub(crate) crawford: bool,
    pub(crate) winner: Option<Player>,
    pub(crate) win_type: Option<WinType>,
}

impl GameState {
    /// An empty board with nothing on the bar or borne off.
    ///
    /// Starting point for setting up arbitrary positions; pair it with the
    /// `with_*` builders.
    pub fn empty(current_player: Player) -> Self {
        Self {
            board: Board::new(),
            bar: PerPlayer::default(),
            borne_off: PerPlayer::default(),
            dice: None,
            cube: DoublingCube::centered(),
            current_player,
            phase: GamePhase::Rolling,
            score: PerPlayer::default(),
            match_length: 1,
            crawford: false,
            winner: None,
            win_type: None,
        }
    }

    /// Places `count` checkers of `owner` on `index`, replacing what was there.
    pub fn with_stack(mut self, index: usize, owner: Player, count: u8) -> Self {
        self.board.set(index, Some(Stack::new(owner, count)));
        self
    }

    /// Sets the number of `player`'s checkers on the bar.
    pub fn with_bar(mut self, player: Player, count: u8) -> Self {
        self.bar[player] = count;
        self
    }

    /// Sets the number of `player`'s checkers already borne off.
    pub fn with_borne_off(mut self, player: Player, count: u8) -> Self {
        self.borne_off[player] = count;
        self
    }

    /// Sets the dice and moves the game into the moving phase.
    pub fn with_dice(mut self, dice: Dice) -> Self {
        self.dice = Some(dice);
        self.phase = GamePhase::Moving;
        self
    }

    /// Sets the doubling cube.
    pub fn with_cube(mut self, cube: DoublingCube) -> Self {
        self.cube = cube;
        self
    }

    /// Sets the match score and length.
    pub fn with_score(mut self, score: PerPlayer<u32>, match_length: u32) -> Self {
        self.score = score;
        self.match_length = match_length;
        self
    }

    /// Marks this game as the Crawford game.
    pub fn with_crawford(mut self, crawford: bool) -> Self {
        self.crawford = crawford;
        self
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Checkers of `player` on the bar.
    pub fn bar(&self, player: Player) -> u8 {
        self.bar[player]
    }

    /// Checkers of `player` borne off.
    pub fn borne_off(&self, player: Player) -> u8 {
        self.borne_off[player]
    }

    /// Dice for the current turn, if rolled.
    pub fn dice(&self) -> Option<&Dice> {
        self.dice.as_ref()
    }

    /// The doubling cube.
    pub fn cube(&self) -> DoublingCube {
        self.cube
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Match score.
    pub fn score(&self) -> PerPlayer<u32> {
        self.score
    }

    /// Points needed to win the match.
    pub fn match_length(&self) -> u32 {
        self.match_length
    }

    /// True while playing the Crawford game.
    pub fn is_crawford(&self) -> bool {
        self.crawford
    }

    /// Winner of the game once decided.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Win tier once decided.
    pub fn win_type(&self) -> Option<WinType> {
        self.win_type
    }

    /// Checkers `player` has on the 24 points.
    pub fn pieces_on_board(&self, player: Player) -> u32 {
        self.board
            .occupied_by(player)
            .map(|i| u32::from(self.board.count_for(i, player)))
            .sum()
    }

    /// Checkers `player` has anywhere: points, bar and borne off.
    pub fn total_pieces(&self, player: Player) -> u32 {
        self.pieces_on_board(player)
            + u32::from(self.bar[player])
            + u32::from(self.borne_off[player])
    }

    /// Total pips `player` needs to bear everything off.
    pub fn pip_count(&self, player: Player) -> u32 {
        let on_board: usize = self
            .board
            .occupied_by(player)
            .map(|i| player.distance_to_off(i) * usize::from(self.board.count_for(i, player)))
            .sum();
        let on_bar = usize::from(self.bar[player]) * (POINT_COUNT + 1);
        (on_board + on_bar) as u32
    }
}
