//! Command-line interface for strictly_gomoku.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strictly_gomoku::GameMode;

/// Strictly Gomoku - five-in-a-row in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_gomoku")]
#[command(about = "Five-in-a-row with an optional remote move-suggestion opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Who opens the match
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstPlayer {
    /// Player A opens
    A,
    /// Player B opens
    B,
    /// Coin flip
    Random,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play matches in the terminal
    Play {
        /// Game mode (standard, adjustable, adjustable-undo, versus-service)
        #[arg(short, long, default_value_t = GameMode::Standard)]
        mode: GameMode,

        /// Rows for adjustable modes
        #[arg(long, default_value = "15")]
        rows: usize,

        /// Columns for adjustable modes
        #[arg(long, default_value = "15")]
        cols: usize,

        /// Name for player A (defaults to the config value)
        #[arg(long)]
        player_a: Option<String>,

        /// Name for player B (defaults to the config value)
        #[arg(long)]
        player_b: Option<String>,

        /// Who moves first
        #[arg(long, value_enum, default_value_t = FirstPlayer::Random)]
        first: FirstPlayer,

        /// Path to config file
        #[arg(short, long, default_value = "gomoku.toml")]
        config: PathBuf,
    },

    /// Check that the move-suggestion service is reachable
    Health {
        /// Path to config file
        #[arg(short, long, default_value = "gomoku.toml")]
        config: PathBuf,
    },
}
