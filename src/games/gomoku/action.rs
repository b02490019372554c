//! First-class action types for gomoku.
//!
//! Moves are domain events: who played where, and in which order.
//! They are validated by the match contracts before they touch the grid.

use super::grid::GridError;
use super::{Coord, Player};
use serde::{Deserialize, Serialize};

/// A stone placed by a player, with its position in the play sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Where the stone was placed.
    pub coord: Coord,
    /// Zero-based index in the match history.
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, coord: Coord, index: usize) -> Self {
        Self {
            player,
            coord,
            index,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} -> {}", self.index + 1, self.player, self.coord)
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The match already reached a win or a draw.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// The coordinate is off the grid.
    #[display("Coordinate {_0} is out of bounds")]
    OutOfBounds(Coord),

    /// The cell already holds a stone.
    #[display("Cell {_0} is already occupied")]
    CellOccupied(Coord),

    /// The acting player does not own the turn.
    #[display("It's not {_0}'s turn")]
    NotYourTurn(Player),

    /// A post-condition failed after a transition.
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

impl From<GridError> for MoveError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::OutOfBounds(coord) => MoveError::OutOfBounds(coord),
            other => MoveError::InvariantViolation(other.to_string()),
        }
    }
}

/// Error that can occur when undoing a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum UndoError {
    /// History is empty or the match is over.
    #[display("Nothing to undo")]
    NothingToUndo,

    /// Clearing the cell or a post-check failed.
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for UndoError {}
