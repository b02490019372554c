//! Game session: one match, its mode, and the automated opponent if any.
//!
//! The session is the only place that talks to a [`MoveSuggester`]. It keeps
//! at most one request in flight and checks every answer against the ticket
//! it was issued with before touching the match.

use crate::games::gomoku::{
    Coord, GameMode, Match, MatchSetup, MatchSnapshot, Move, MoveError, MoveOutcome, Player,
    SetupError, UndoError,
};
use crate::suggestion::{
    MoveSuggester, Resolution, SuggestionRequest, SuggestionResponse, SuggestionTicket,
    SuggestionUnavailable,
};
use crate::tally::ScoreTally;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Errors surfaced by session operations.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// The move was rejected by the match.
    #[display("{_0}")]
    Move(MoveError),

    /// Undo was rejected by the match.
    #[display("{_0}")]
    Undo(UndoError),

    /// The mode does not offer undo.
    #[display("Undo is not available in {_0} mode")]
    #[from(ignore)]
    UndoDisabled(GameMode),

    /// Setup could not start a match.
    #[display("{_0}")]
    Setup(SetupError),

    /// The service failed; the match is unchanged and a retry is allowed.
    #[display("{_0}")]
    Suggestion(SuggestionUnavailable),
}

impl std::error::Error for SessionError {}

struct Opponent {
    player: Player,
    suggester: Arc<dyn MoveSuggester>,
}

struct PendingSuggestion {
    ticket: SuggestionTicket,
    task: JoinHandle<Result<SuggestionResponse, SuggestionUnavailable>>,
}

/// A running match with its coordination state.
pub struct GameSession {
    game: Match,
    mode: GameMode,
    opponent: Option<Opponent>,
    pending: Option<PendingSuggestion>,
    recorded: bool,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("game", &self.game)
            .field("mode", &self.mode)
            .field(
                "opponent",
                &self.opponent.as_ref().map(|o| (o.player, o.suggester.name())),
            )
            .field("pending", &self.pending.as_ref().map(|p| p.ticket))
            .field("recorded", &self.recorded)
            .finish()
    }
}

impl GameSession {
    /// Wraps a match for hot-seat play.
    #[instrument(skip(game), fields(revision = game.revision()))]
    pub fn new(game: Match, mode: GameMode) -> Self {
        info!(mode = %mode, "Creating game session");
        Self {
            game,
            mode,
            opponent: None,
            pending: None,
            recorded: false,
        }
    }

    /// Validates the setup and starts a session with `first` to move.
    #[instrument(skip(setup), fields(mode = %setup.mode()))]
    pub fn start(setup: MatchSetup, first: Player) -> Result<Self, SessionError> {
        let mode = setup.mode();
        let game = setup.start(first)?;
        Ok(Self::new(game, mode))
    }

    /// Binds `player` to a suggester. The other slot stays human.
    #[instrument(skip(self, suggester), fields(suggester = suggester.name()))]
    pub fn with_opponent(mut self, player: Player, suggester: Arc<dyn MoveSuggester>) -> Self {
        info!(automated = ?player, "Binding automated opponent");
        self.opponent = Some(Opponent { player, suggester });
        self
    }

    /// The match being played.
    pub fn game(&self) -> &Match {
        &self.game
    }

    /// Mode the session was started in.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> MatchSnapshot {
        self.game.snapshot()
    }

    /// Slot driven by the suggester, if any.
    pub fn automated_player(&self) -> Option<Player> {
        self.opponent.as_ref().map(|o| o.player)
    }

    /// Returns true if the automated player is to move in a live match.
    pub fn is_automated_turn(&self) -> bool {
        !self.game.is_terminal() && self.automated_player() == Some(self.game.current_player())
    }

    /// Ticket of the request in flight, if any.
    pub fn pending_ticket(&self) -> Option<SuggestionTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    /// Plays a human move at `coord`.
    ///
    /// With an automated opponent bound, the human always acts as the
    /// other slot, so a move during the opponent's turn is `NotYourTurn`.
    #[instrument(skip(self), fields(revision = self.game.revision()))]
    pub fn play(&mut self, coord: Coord) -> Result<MoveOutcome, SessionError> {
        let acting = match self.automated_player() {
            Some(automated) => automated.opponent(),
            None => self.game.current_player(),
        };
        Ok(self.game.apply_move(coord, acting)?)
    }

    /// Takes back the last move if the mode allows it.
    #[instrument(skip(self), fields(revision = self.game.revision()))]
    pub fn undo(&mut self) -> Result<Move, SessionError> {
        if !self.mode.allows_undo() {
            warn!(mode = %self.mode, "Undo not offered in this mode");
            return Err(SessionError::UndoDisabled(self.mode));
        }
        Ok(self.game.undo()?)
    }

    /// Starts a suggestion request for the automated player.
    ///
    /// Returns the ticket of the request in flight, or `None` when there is
    /// nothing to ask for. A pending request that is still current is
    /// reused; a stale one is aborted and replaced.
    #[instrument(skip(self), fields(revision = self.game.revision()))]
    pub fn request_suggestion(&mut self) -> Result<Option<SuggestionTicket>, SessionError> {
        if !self.is_automated_turn() {
            debug!("Not the automated player's turn");
            return Ok(None);
        }

        if let Some(pending) = &self.pending {
            if pending.ticket.is_current(&self.game) {
                debug!("Reusing pending suggestion request");
                return Ok(Some(pending.ticket));
            }
        }
        if let Some(stale) = self.pending.take() {
            warn!(ticket = ?stale.ticket, "Dropping stale suggestion request");
            stale.task.abort();
        }

        let (Some(opponent), Some(ticket)) =
            (self.opponent.as_ref(), SuggestionTicket::issue(&self.game))
        else {
            return Ok(None);
        };

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            SuggestionUnavailable::new(format!("No async runtime for suggestion: {}", e))
        })?;
        let request = SuggestionRequest::from_match(&self.game);
        let suggester = Arc::clone(&opponent.suggester);
        let task = runtime.spawn(async move { suggester.suggest(request).await });

        info!(?ticket, suggester = opponent.suggester.name(), "Suggestion requested");
        self.pending = Some(PendingSuggestion { ticket, task });
        Ok(Some(ticket))
    }

    /// Waits for the pending request and resolves it.
    ///
    /// Returns `None` when nothing was pending.
    #[instrument(skip(self), fields(revision = self.game.revision()))]
    pub async fn await_suggestion(&mut self) -> Result<Option<Resolution>, SessionError> {
        let Some(pending) = self.pending.take() else {
            debug!("No suggestion pending");
            return Ok(None);
        };

        let result = match pending.task.await {
            Ok(result) => result,
            Err(e) => Err(SuggestionUnavailable::new(format!(
                "Suggestion task failed: {}",
                e
            ))),
        };
        self.resolve_suggestion(pending.ticket, result).map(Some)
    }

    /// Applies an arrived suggestion if its ticket is still current.
    ///
    /// A stale answer is discarded whatever it holds. A failure leaves the
    /// match untouched. A malformed or illegal coordinate is reported and
    /// also leaves the match untouched.
    #[instrument(skip(self, result), fields(revision = self.game.revision()))]
    pub fn resolve_suggestion(
        &mut self,
        ticket: SuggestionTicket,
        result: Result<SuggestionResponse, SuggestionUnavailable>,
    ) -> Result<Resolution, SessionError> {
        if let Some(resolved) = self.pending.take_if(|p| p.ticket == ticket) {
            resolved.task.abort();
        }

        if !ticket.is_current(&self.game) {
            warn!(?ticket, "Discarding stale suggestion");
            return Ok(Resolution::Discarded);
        }

        let response = result.inspect_err(|e| warn!(error = %e, "Suggestion unavailable"))?;
        let coord = response.coord()?;
        let outcome = self.game.apply_move(coord, ticket.player())?;
        info!(%coord, ?outcome, "Suggestion applied");
        Ok(Resolution::Applied(outcome))
    }

    /// Credits the winner once the match is over.
    ///
    /// Records at most once per session; draws record nothing.
    #[instrument(skip(self, tally))]
    pub fn record_result(&mut self, tally: &ScoreTally) -> Option<u32> {
        if self.recorded || !self.game.is_terminal() {
            return None;
        }
        self.recorded = true;
        tally.record(&self.game.result(), self.game.names())
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::gomoku::PlayerNames;

    fn hot_seat(mode: GameMode) -> GameSession {
        let game = Match::new(10, 10, PlayerNames::new("Ann", "Bo"), Player::A).unwrap();
        GameSession::new(game, mode)
    }

    #[test]
    fn test_hot_seat_alternates_acting_player() {
        let mut session = hot_seat(GameMode::Adjustable);
        session.play(Coord::new(0, 0)).unwrap();
        session.play(Coord::new(1, 1)).unwrap();
        assert_eq!(session.game().history().len(), 2);
        assert_eq!(session.game().history()[1].player, Player::B);
    }

    #[test]
    fn test_undo_disabled_by_mode() {
        let mut session = hot_seat(GameMode::Standard);
        session.play(Coord::new(0, 0)).unwrap();
        assert!(matches!(
            session.undo(),
            Err(SessionError::UndoDisabled(GameMode::Standard))
        ));
        assert_eq!(session.game().history().len(), 1);

        let mut session = hot_seat(GameMode::AdjustableUndo);
        session.play(Coord::new(0, 0)).unwrap();
        assert_eq!(session.undo().unwrap().coord, Coord::new(0, 0));
    }

    #[test]
    fn test_no_request_without_opponent() {
        let mut session = hot_seat(GameMode::Adjustable);
        assert!(session.request_suggestion().unwrap().is_none());
    }

    #[test]
    fn test_start_rejects_bad_setup() {
        let setup = MatchSetup::new(GameMode::Adjustable, "Ann", "Ann");
        assert!(matches!(
            GameSession::start(setup, Player::A),
            Err(SessionError::Setup(SetupError::DuplicateName(_)))
        ));
    }

    #[test]
    fn test_record_once() {
        let tally = ScoreTally::new();
        let mut session = hot_seat(GameMode::Adjustable);
        assert_eq!(session.record_result(&tally), None);
        for col in 0..4 {
            session.play(Coord::new(0, col)).unwrap();
            session.play(Coord::new(5, col)).unwrap();
        }
        session.play(Coord::new(0, 4)).unwrap();

        assert_eq!(session.record_result(&tally), Some(1));
        assert_eq!(session.record_result(&tally), None);
        assert_eq!(tally.get("Ann"), 1);
    }
}
