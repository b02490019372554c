//! Port to the external move-suggestion service.
//!
//! The service sees the grid in its canonical numeric encoding
//! (A = +1, B = -1, empty = 0) and answers with one coordinate.
//! Transport lives behind [`MoveSuggester`] so sessions can be driven by
//! HTTP or by any in-process source.

mod http;
mod ticket;

pub use http::HttpSuggester;
pub use ticket::{Resolution, SuggestionTicket};

use crate::games::gomoku::{Coord, Match};
use async_trait::async_trait;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// The service could not produce a usable move.
///
/// Never fatal: the match is left untouched and a retry is allowed.
#[derive(Debug, Clone, Display, Error)]
#[display("Suggestion unavailable: {} at {}:{}", message, file, line)]
pub struct SuggestionUnavailable {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SuggestionUnavailable {
    /// Creates a new suggestion error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Request body sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Rows of encoded cells.
    pub grid: Vec<Vec<i8>>,
    /// Encoded player to move (+1 or -1).
    #[serde(rename = "currentPlayer")]
    pub current_player: i8,
}

impl SuggestionRequest {
    /// Encodes the grid and the player to move.
    #[instrument(skip(game), fields(revision = game.revision()))]
    pub fn from_match(game: &Match) -> Self {
        let grid = game
            .grid()
            .iter_rows()
            .map(|row| row.iter().map(|cell| cell.encode()).collect())
            .collect();
        Self {
            grid,
            current_player: game.current_player().sign(),
        }
    }
}

/// Coordinate returned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// Suggested row.
    pub row: i64,
    /// Suggested column.
    pub col: i64,
}

impl SuggestionResponse {
    /// Converts to a grid coordinate.
    ///
    /// Bounds and occupancy are left to the match; only values that cannot
    /// be a coordinate at all are rejected here.
    pub fn coord(&self) -> Result<Coord, SuggestionUnavailable> {
        match (usize::try_from(self.row), usize::try_from(self.col)) {
            (Ok(row), Ok(col)) => Ok(Coord::new(row, col)),
            _ => {
                warn!(row = self.row, col = self.col, "Malformed suggestion");
                Err(SuggestionUnavailable::new(format!(
                    "Malformed coordinate ({}, {})",
                    self.row, self.col
                )))
            }
        }
    }
}

/// Source of suggested moves.
#[async_trait]
pub trait MoveSuggester: Send + Sync {
    /// Asks for a move for the encoded position.
    async fn suggest(
        &self,
        request: SuggestionRequest,
    ) -> Result<SuggestionResponse, SuggestionUnavailable>;

    /// Short label for logs.
    fn name(&self) -> &str;
}
