//! Game rules for backgammon.
//!
//! Pure functions over [`GameState`](crate::GameState) values. Nothing here
//! mutates its input: every transformation clones, mutates the clone, and
//! returns it, which keeps the turn search free of aliasing.

pub mod bear_off;
pub mod movement;
pub mod turns;
pub mod win;

pub use bear_off::{bear_off_moves, can_bear_off};
pub use movement::{apply_move, consumed_die, is_point_open, legal_moves, target_index};
pub use turns::{all_legal_turns, constrained_moves};
pub use win::{check_winner, game_points, win_type};
