//! Strictly Gomoku library - five-in-a-row rules engine and match state machine
//!
//! # Architecture
//!
//! - **Games**: grid, win/draw detection, and the [`Match`] state machine
//! - **Suggestion**: port to an external move-suggestion service, with an HTTP transport
//! - **Session**: one match plus its automated opponent and staleness checks
//! - **Tally**: process-wide win counts
//! - **Config**: TOML configuration with environment overrides
//!
//! # Example
//!
//! ```
//! use strictly_gomoku::{Coord, GameMode, MatchSetup, MoveOutcome, Player};
//!
//! let mut game = MatchSetup::new(GameMode::Standard, "Ann", "Bo")
//!     .start(Player::A)
//!     .unwrap();
//! assert_eq!(game.apply_move(Coord::new(7, 7), Player::A), Ok(MoveOutcome::Continue));
//! assert_eq!(game.current_player(), Player::B);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod session;
mod suggestion;
mod tally;

// Crate-level exports - Configuration
pub use config::{API_URL_ENV, AppConfig, ConfigError, SuggestionConfig};

// Crate-level exports - Game types
pub use games::gomoku::{
    AlternatingTurnInvariant, CellIsEmpty, CellState, Contract, Coord, DIRECTIONS, Dimensions,
    GameMode, GomokuInvariants, Grid, GridError, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, LegalMove, Match, MatchInProgress, MatchResult, MatchSetup,
    MatchSnapshot, Move, MoveContract, MoveError, MoveOutcome, Player, PlayerNames, PlayersTurn,
    SequenceIndexInvariant, SetupError, UndoError, WIN_LENGTH, WinLine, WithinBounds, check_win,
    is_draw, is_full,
};

// Crate-level exports - Move suggestion
pub use suggestion::{
    HttpSuggester, MoveSuggester, Resolution, SuggestionRequest, SuggestionResponse,
    SuggestionTicket, SuggestionUnavailable,
};

// Crate-level exports - Session management
pub use session::{GameSession, SessionError};

// Crate-level exports - Score tally
pub use tally::{ScoreEntry, ScoreTally};
