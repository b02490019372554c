//! Core domain types for gomoku.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Player slot in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Player {
    /// Player A (black stones).
    A,
    /// Player B (white stones).
    B,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Sign used by the canonical numeric encoding (A = +1, B = -1).
    pub fn sign(self) -> i8 {
        match self {
            Player::A => 1,
            Player::B => -1,
        }
    }
}

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// No stone.
    #[default]
    Empty,
    /// Cell holds a stone of the given player.
    Occupied(Player),
}

impl CellState {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            CellState::Empty => None,
            CellState::Occupied(player) => Some(player),
        }
    }

    /// Canonical numeric value of this cell (+1, -1 or 0).
    pub fn encode(self) -> i8 {
        self.player().map_or(0, Player::sign)
    }
}

/// A (row, col) coordinate on the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_new::new,
)]
pub struct Coord {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl Coord {
    /// Steps `distance` cells along `(dr, dc)`, returning `None` below zero.
    pub fn offset(self, (dr, dc): (isize, isize), distance: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(dr * distance)?;
        let col = self.col.checked_add_signed(dc * distance)?;
        Some(Coord { row, col })
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Display names of both player slots.
///
/// Names arrive pre-validated from setup; the match never re-checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerNames {
    a: String,
    b: String,
}

impl PlayerNames {
    /// Creates the name pair.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Display name of the given slot.
    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::A => &self.a,
            Player::B => &self.b,
        }
    }
}

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Dimensions {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl Dimensions {
    /// Smallest side length allowed for adjustable boards.
    pub const MIN_SIDE: usize = 10;
    /// Largest side length allowed for adjustable boards.
    pub const MAX_SIDE: usize = 20;
    /// The 15x15 standard board.
    pub const STANDARD: Dimensions = Dimensions { rows: 15, cols: 15 };
    /// The 8x8 board used against the move-suggestion service.
    pub const VERSUS_SERVICE: Dimensions = Dimensions { rows: 8, cols: 8 };

    /// Returns true if both sides lie within the adjustable range.
    pub fn within_policy(self) -> bool {
        let range = Self::MIN_SIDE..=Self::MAX_SIDE;
        range.contains(&self.rows) && range.contains(&self.cols)
    }
}

/// How a match is configured and who drives each slot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Fixed 15x15 hot-seat game.
    #[default]
    Standard,
    /// Hot-seat game on a 10-20 sided board.
    Adjustable,
    /// Adjustable board with undo enabled.
    AdjustableUndo,
    /// Fixed 8x8 board, player B is driven by the move-suggestion service.
    VersusService,
}

impl GameMode {
    /// Board size forced by the mode, if it has one.
    pub fn fixed_dimensions(self) -> Option<Dimensions> {
        match self {
            GameMode::Standard => Some(Dimensions::STANDARD),
            GameMode::VersusService => Some(Dimensions::VERSUS_SERVICE),
            GameMode::Adjustable | GameMode::AdjustableUndo => None,
        }
    }

    /// Whether the undo action is offered.
    pub fn allows_undo(self) -> bool {
        matches!(self, GameMode::AdjustableUndo | GameMode::VersusService)
    }

    /// Slot driven by the move-suggestion service, if any.
    pub fn automated_player(self) -> Option<Player> {
        match self {
            GameMode::VersusService => Some(Player::B),
            _ => None,
        }
    }
}
