//! Contract-based validation for gomoku moves.
//!
//! Preconditions are checked on every move, in a fixed order, so callers
//! always see the same error for the same situation. Postconditions run
//! in debug builds only.

use super::action::{Move, MoveError};
use super::game::Match;
use super::invariants::{GomokuInvariants, InvariantSet};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the match is not terminal.
pub struct MatchInProgress;

impl MatchInProgress {
    /// Rejects moves on a finished match.
    pub fn check(game: &Match) -> Result<(), MoveError> {
        if game.is_terminal() {
            Err(MoveError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the coordinate lies on the grid.
pub struct WithinBounds;

impl WithinBounds {
    /// Rejects off-grid coordinates.
    pub fn check(mov: &Move, game: &Match) -> Result<(), MoveError> {
        if game.grid().contains(mov.coord) {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds(mov.coord))
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects occupied cells.
    pub fn check(mov: &Move, game: &Match) -> Result<(), MoveError> {
        if game.grid().occupant(mov.coord).is_some() {
            Err(MoveError::CellOccupied(mov.coord))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the acting player owns the turn.
///
/// Guards against late moves from an asynchronous source landing after
/// the turn already changed hands.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects moves made out of turn.
    pub fn check(mov: &Move, game: &Match) -> Result<(), MoveError> {
        if mov.player != game.current_player() {
            Err(MoveError::NotYourTurn(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition, checked in order: in progress, in bounds, empty, in turn.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game), fields(revision = game.revision()))]
    pub fn check(mov: &Move, game: &Match) -> Result<(), MoveError> {
        MatchInProgress::check(game)?;
        WithinBounds::check(mov, game)?;
        CellIsEmpty::check(mov, game)?;
        PlayersTurn::check(mov, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Postconditions:
/// - History matches the stones on the grid
/// - Players alternate
/// - Sequence indices are contiguous
/// - Exactly one stone was added
pub struct MoveContract;

impl Contract<Match, Move> for MoveContract {
    fn pre(game: &Match, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &Match, after: &Match) -> Result<(), MoveError> {
        if after.history().len() != before.history().len() + 1 {
            warn!(
                before = before.history().len(),
                after = after.history().len(),
                "History did not grow by one"
            );
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: history must grow by exactly one move".to_string(),
            ));
        }

        check_invariants(after).map_err(MoveError::InvariantViolation)
    }
}

/// Runs the full invariant set, joining violation descriptions.
pub fn check_invariants(game: &Match) -> Result<(), String> {
    GomokuInvariants::check_all(game).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Invariant check failed");
        format!("Postcondition failed: {}", descriptions)
    })
}
