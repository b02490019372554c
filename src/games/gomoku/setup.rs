//! Match setup: mode, names and board size, validated before play starts.

use super::game::Match;
use super::grid::GridError;
use super::types::{Dimensions, GameMode, Player, PlayerNames};
use tracing::{debug, info, instrument, warn};

/// Reasons a setup cannot start a match.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SetupError {
    /// A player name is blank after trimming.
    #[display("Player {_0} needs a name")]
    #[from(ignore)]
    EmptyName(Player),

    /// Both players were given the same name.
    #[display("Both players are named '{_0}'")]
    #[from(ignore)]
    DuplicateName(String),

    /// Adjustable board outside the allowed side range.
    #[display(
        "Board {rows}x{cols} is outside {}..={}",
        Dimensions::MIN_SIDE,
        Dimensions::MAX_SIDE
    )]
    #[from(ignore)]
    DimensionOutOfRange {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// The grid could not be built.
    #[display("{_0}")]
    Grid(GridError),
}

impl std::error::Error for SetupError {}

/// Collected choices for a match that has not started yet.
///
/// Consumed by [`MatchSetup::start`], which is the only way from setup
/// into play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSetup {
    mode: GameMode,
    player_a: String,
    player_b: String,
    dimensions: Option<Dimensions>,
}

impl MatchSetup {
    /// Creates a setup for `mode` with raw, untrimmed names.
    #[instrument(skip(player_a, player_b))]
    pub fn new(mode: GameMode, player_a: impl Into<String>, player_b: impl Into<String>) -> Self {
        Self {
            mode,
            player_a: player_a.into(),
            player_b: player_b.into(),
            dimensions: None,
        }
    }

    /// Requests a board size. Ignored by fixed-size modes.
    pub fn with_dimensions(mut self, rows: usize, cols: usize) -> Self {
        self.dimensions = Some(Dimensions::new(rows, cols));
        self
    }

    /// Selected mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Board size the match will use.
    ///
    /// Fixed modes force their own size; adjustable modes fall back to the
    /// standard board when no size was requested.
    pub fn dimensions(&self) -> Dimensions {
        self.mode
            .fixed_dimensions()
            .or(self.dimensions)
            .unwrap_or(Dimensions::STANDARD)
    }

    /// Checks names and size, returning the trimmed names.
    ///
    /// # Errors
    ///
    /// [`SetupError::EmptyName`] for a blank name,
    /// [`SetupError::DuplicateName`] for equal names and
    /// [`SetupError::DimensionOutOfRange`] for an adjustable board outside
    /// the allowed range.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn validate(&self) -> Result<PlayerNames, SetupError> {
        let a = self.player_a.trim();
        let b = self.player_b.trim();

        if a.is_empty() {
            warn!("Player A name is blank");
            return Err(SetupError::EmptyName(Player::A));
        }
        if b.is_empty() {
            warn!("Player B name is blank");
            return Err(SetupError::EmptyName(Player::B));
        }
        if a == b {
            warn!(name = a, "Duplicate player names");
            return Err(SetupError::DuplicateName(a.to_string()));
        }

        let dimensions = self.dimensions();
        if self.mode.fixed_dimensions().is_none() && !dimensions.within_policy() {
            warn!(rows = dimensions.rows, cols = dimensions.cols, "Board size out of range");
            return Err(SetupError::DimensionOutOfRange {
                rows: dimensions.rows,
                cols: dimensions.cols,
            });
        }

        debug!(a, b, ?dimensions, "Setup valid");
        Ok(PlayerNames::new(a, b))
    }

    /// Validates and starts the match with `first` to move.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn start(self, first: Player) -> Result<Match, SetupError> {
        let names = self.validate()?;
        let Dimensions { rows, cols } = self.dimensions();
        let game = Match::new(rows, cols, names, first)?;
        info!(mode = %self.mode, rows, cols, "Setup complete, match in progress");
        Ok(game)
    }
}
