//! Game rules for gomoku.
//!
//! Pure functions over a [`Grid`](super::Grid). Rules are kept apart from
//! grid storage so the match and its contracts can compose them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{DIRECTIONS, WIN_LENGTH, WinLine, check_win};
