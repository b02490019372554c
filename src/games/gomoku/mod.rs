//! Five-in-a-row on a configurable rectangular grid.
//!
//! The grid is a copy-on-write value, the rules are pure functions over it,
//! and [`Match`] is the only place where state changes.

mod action;
mod contracts;
mod game;
mod grid;
mod invariants;
mod phases;
mod rules;
mod setup;
mod snapshot;
mod types;

pub use action::{Move, MoveError, UndoError};
pub use contracts::{
    CellIsEmpty, Contract, LegalMove, MatchInProgress, MoveContract, PlayersTurn, WithinBounds,
};
pub use game::Match;
pub use grid::{Grid, GridError};
pub use invariants::{
    AlternatingTurnInvariant, GomokuInvariants, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, SequenceIndexInvariant,
};
pub use phases::{MatchResult, MoveOutcome};
pub use rules::{DIRECTIONS, WIN_LENGTH, WinLine, check_win, is_draw, is_full};
pub use setup::{MatchSetup, SetupError};
pub use snapshot::MatchSnapshot;
pub use types::{CellState, Coord, Dimensions, GameMode, Player, PlayerNames};
