//! Staleness guard for in-flight suggestions.

use crate::games::gomoku::{Match, MoveOutcome, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Context a suggestion request was issued for.
///
/// A response is only applied while the match still sits at the same
/// revision with the same player to move. Any move or undo in between
/// bumps the revision, so an answer computed for an older position is
/// recognized even when the turn has come back to the same player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuggestionTicket {
    player: Player,
    revision: u64,
}

impl SuggestionTicket {
    /// Issues a ticket for the player to move, `None` once the match is over.
    #[instrument(skip(game), fields(revision = game.revision()))]
    pub fn issue(game: &Match) -> Option<Self> {
        if game.is_terminal() {
            return None;
        }
        Some(Self {
            player: game.current_player(),
            revision: game.revision(),
        })
    }

    /// Player the suggestion is for.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Match revision at issue time.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true if a response may still be applied to `game`.
    pub fn is_current(&self, game: &Match) -> bool {
        let current = !game.is_terminal()
            && game.current_player() == self.player
            && game.revision() == self.revision;
        debug!(
            ticket_revision = self.revision,
            revision = game.revision(),
            current,
            "Checked suggestion ticket"
        );
        current
    }
}

/// What happened to a suggestion that arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The suggested move was played.
    Applied(MoveOutcome),
    /// The match moved on; the response was ignored.
    Discarded,
}
