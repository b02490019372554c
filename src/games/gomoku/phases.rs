//! Match results and per-move outcomes.

use super::rules::WinLine;
use super::{Coord, Player};
use serde::{Deserialize, Serialize};

/// Overall result of a match.
///
/// `Win` and `Draw` are terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchResult {
    /// Moves are still being accepted.
    #[default]
    InProgress,
    /// A player lined up five stones.
    Win(WinLine),
    /// The grid filled up with no alignment.
    Draw,
}

impl MatchResult {
    /// Returns true for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MatchResult::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            MatchResult::Win(win) => Some(win.winner),
            _ => None,
        }
    }

    /// Returns the five highlighted cells of a win.
    pub fn winning_line(&self) -> Option<[Coord; 5]> {
        match self {
            MatchResult::Win(win) => Some(win.line),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::InProgress => write!(f, "In progress"),
            MatchResult::Win(win) => write!(f, "Player {} wins", win.winner),
            MatchResult::Draw => write!(f, "Draw"),
        }
    }
}

/// What a single accepted move did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Play continues with the other player.
    Continue,
    /// The move completed an alignment.
    Win(WinLine),
    /// The move filled the last empty cell.
    Draw,
}

impl From<MoveOutcome> for MatchResult {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Continue => MatchResult::InProgress,
            MoveOutcome::Win(win) => MatchResult::Win(win),
            MoveOutcome::Draw => MatchResult::Draw,
        }
    }
}
