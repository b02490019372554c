//! Match state machine for gomoku.
//!
//! A [`Match`] owns its grid, the turn owner, the move history and the
//! result. Every transition goes through [`Match::apply_move`] or
//! [`Match::undo`]; once a win or draw is reached the match is frozen.

use super::action::{Move, MoveError, UndoError};
use super::contracts::{Contract, MoveContract};
#[cfg(debug_assertions)]
use super::contracts::check_invariants;
use super::grid::{Grid, GridError};
use super::phases::{MatchResult, MoveOutcome};
use super::rules::{check_win, is_full};
use super::snapshot::MatchSnapshot;
use super::types::{CellState, Coord, Player, PlayerNames};
use tracing::{debug, info, instrument, warn};

/// A single game between two named players.
///
/// Not synchronized: callers sharing a match across threads wrap it in
/// one lock per match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub(crate) grid: Grid,
    pub(crate) names: PlayerNames,
    pub(crate) to_move: Player,
    pub(crate) history: Vec<Move>,
    pub(crate) result: MatchResult,
    pub(crate) revision: u64,
}

impl Match {
    /// Creates a match in progress with an empty grid.
    ///
    /// The starting player is chosen by the caller; either slot may open.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if either side is zero or the
    /// board is too large to address.
    #[instrument(skip(names), fields(a = %names.a(), b = %names.b()))]
    pub fn new(
        rows: usize,
        cols: usize,
        names: PlayerNames,
        first: Player,
    ) -> Result<Self, GridError> {
        let grid = Grid::new(rows, cols)?;
        info!(rows, cols, first = ?first, "Match started");
        Ok(Self {
            grid,
            names,
            to_move: first,
            history: Vec::new(),
            result: MatchResult::InProgress,
            revision: 0,
        })
    }

    /// Places a stone for `acting` at `coord`.
    ///
    /// # Errors
    ///
    /// Checked in order: [`MoveError::GameAlreadyOver`],
    /// [`MoveError::OutOfBounds`], [`MoveError::CellOccupied`],
    /// [`MoveError::NotYourTurn`]. A rejected move changes nothing.
    #[instrument(skip(self), fields(revision = self.revision))]
    pub fn apply_move(&mut self, coord: Coord, acting: Player) -> Result<MoveOutcome, MoveError> {
        let action = Move::new(acting, coord, self.history.len());

        if let Err(e) = MoveContract::pre(self, &action) {
            warn!(error = %e, "Move rejected");
            return Err(e);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let grid = self.grid.set(coord, CellState::Occupied(acting))?;
        let outcome = match check_win(&grid) {
            Some(win) => MoveOutcome::Win(win),
            None if is_full(&grid) => MoveOutcome::Draw,
            None => MoveOutcome::Continue,
        };

        self.grid = grid;
        self.history.push(action);
        self.revision += 1;
        match outcome {
            MoveOutcome::Continue => self.to_move = acting.opponent(),
            MoveOutcome::Win(win) => {
                info!(winner = ?win.winner, line = ?win.line, "Match won");
                self.result = MatchResult::Win(win);
            }
            MoveOutcome::Draw => {
                info!(moves = self.history.len(), "Match drawn");
                self.result = MatchResult::Draw;
            }
        }

        #[cfg(debug_assertions)]
        {
            if let Err(e) = MoveContract::post(&before, self) {
                *self = before;
                return Err(e);
            }
        }

        debug!(mov = %action, ?outcome, "Move applied");
        Ok(outcome)
    }

    /// Takes back the last move and returns it.
    ///
    /// The turn goes back to whoever made the undone move.
    ///
    /// # Errors
    ///
    /// Returns [`UndoError::NothingToUndo`] when the history is empty or the
    /// match is already over.
    #[instrument(skip(self), fields(revision = self.revision))]
    pub fn undo(&mut self) -> Result<Move, UndoError> {
        if self.result.is_terminal() {
            warn!(result = %self.result, "Undo rejected on finished match");
            return Err(UndoError::NothingToUndo);
        }
        let Some(last) = self.history.last().copied() else {
            debug!("Undo rejected on empty history");
            return Err(UndoError::NothingToUndo);
        };

        let grid = self
            .grid
            .set(last.coord, CellState::Empty)
            .map_err(|e| UndoError::InvariantViolation(e.to_string()))?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.grid = grid;
        self.history.pop();
        self.to_move = last.player;
        self.revision += 1;

        #[cfg(debug_assertions)]
        {
            if let Err(e) = check_invariants(self) {
                *self = before;
                return Err(UndoError::InvariantViolation(e));
            }
        }

        info!(undone = %last, to_move = ?self.to_move, "Move undone");
        Ok(last)
    }

    /// The grid as it stands.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Display names of both slots.
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    /// The player whose turn it is (the last mover once the match is over).
    pub fn current_player(&self) -> Player {
        self.to_move
    }

    /// Display name of the player to move.
    pub fn current_name(&self) -> &str {
        self.names.name(self.to_move)
    }

    /// Most recent move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Current result.
    pub fn result(&self) -> MatchResult {
        self.result
    }

    /// Applied moves in play order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns true once the match is won or drawn.
    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }

    /// Display name of the winner, if the match was won.
    pub fn winner_name(&self) -> Option<&str> {
        self.result.winner().map(|player| self.names.name(player))
    }

    /// Counter bumped by every accepted move or undo.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Owned read-only view for rendering collaborators.
    #[instrument(skip(self), fields(revision = self.revision))]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::from(self)
    }
}
