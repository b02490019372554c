//! Serializable read-only view of a match.

use super::action::Move;
use super::game::Match;
use super::phases::MatchResult;
use super::types::{CellState, Coord, Player, PlayerNames};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Owned copy of everything a renderer needs.
///
/// Holds no reference into the match, so later play never changes a
/// snapshot that was already handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MatchSnapshot {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<CellState>>,
    names: PlayerNames,
    to_move: Player,
    to_move_name: String,
    result: MatchResult,
    last_move: Option<Move>,
    winning_line: Option<[Coord; 5]>,
    move_count: usize,
    revision: u64,
}

impl MatchSnapshot {
    /// Cell at `coord`, `None` when off the grid.
    pub fn cell(&self, coord: Coord) -> Option<CellState> {
        self.cells.get(coord.row)?.get(coord.col).copied()
    }

    /// Returns true if `coord` belongs to the winning line.
    pub fn is_highlighted(&self, coord: Coord) -> bool {
        self.winning_line
            .is_some_and(|line| line.contains(&coord))
    }

    /// Display name of the winner, if any.
    pub fn winner_name(&self) -> Option<&str> {
        self.result.winner().map(|player| self.names.name(player))
    }
}

impl From<&Match> for MatchSnapshot {
    fn from(game: &Match) -> Self {
        let grid = game.grid();
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells: grid.iter_rows().map(<[CellState]>::to_vec).collect(),
            names: game.names().clone(),
            to_move: game.current_player(),
            to_move_name: game.current_name().to_string(),
            result: game.result(),
            last_move: game.last_move(),
            winning_line: game.result().winning_line(),
            move_count: game.history().len(),
            revision: game.revision(),
        }
    }
}
