//! Strictly Gomoku - terminal front end
//!
//! Hot-seat play or play against a remote move-suggestion service.

#![warn(missing_docs)]

mod cli;
mod terminal;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use terminal::PlayOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            rows,
            cols,
            player_a,
            player_b,
            first,
            config,
        } => {
            info!(mode = %mode, "Starting terminal play");
            terminal::play(PlayOptions {
                mode,
                rows,
                cols,
                player_a,
                player_b,
                first,
                config,
            })
            .await
        }
        Command::Health { config } => terminal::health(config).await,
    }
}
