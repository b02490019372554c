//! Line-oriented terminal driver.
//!
//! Prints the grid, reads commands from stdin and feeds them to a
//! [`GameSession`]. All rules live in the library; this module only
//! translates text to calls and errors to messages.

use crate::cli::FirstPlayer;
use anyhow::Result;
use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use strictly_gomoku::{
    AppConfig, Coord, GameMode, GameSession, HttpSuggester, MatchResult, MatchSetup, Player,
    ScoreTally, SessionError,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info, instrument};

/// Options collected from the `play` subcommand.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Game mode.
    pub mode: GameMode,
    /// Requested rows.
    pub rows: usize,
    /// Requested columns.
    pub cols: usize,
    /// Name override for A.
    pub player_a: Option<String>,
    /// Name override for B.
    pub player_b: Option<String>,
    /// Opening player policy.
    pub first: FirstPlayer,
    /// Config file path.
    pub config: PathBuf,
}

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Place a stone.
    Place(Coord),
    /// Take back the last move.
    Undo,
    /// Ask the service again after a failure.
    Retry,
    /// Start a new match after the current one ends.
    Again,
    /// Leave.
    Quit,
    /// Anything else.
    Unknown(String),
}

impl Input {
    /// Parses a trimmed command line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "undo" | "u" => return Input::Undo,
            "retry" | "r" => return Input::Retry,
            "again" | "a" => return Input::Again,
            "quit" | "q" | "exit" => return Input::Quit,
            _ => {}
        }

        let parts: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .collect();
        match parts.as_slice() {
            [row, col] => match (row.parse(), col.parse()) {
                (Ok(row), Ok(col)) => Input::Place(Coord::new(row, col)),
                _ => Input::Unknown(line.to_string()),
            },
            _ => Input::Unknown(line.to_string()),
        }
    }
}

/// Picks the opening player.
pub fn pick_first(first: FirstPlayer) -> Player {
    match first {
        FirstPlayer::A => Player::A,
        FirstPlayer::B => Player::B,
        FirstPlayer::Random => {
            if rand::rng().random_bool(0.5) {
                Player::A
            } else {
                Player::B
            }
        }
    }
}

type InputLines = Lines<BufReader<Stdin>>;

async fn next_input(lines: &mut InputLines) -> Result<Option<Input>> {
    Ok(lines.next_line().await?.map(|line| Input::parse(&line)))
}

/// Runs matches until the player quits or stdin closes.
#[instrument(skip(options), fields(mode = %options.mode))]
pub async fn play(options: PlayOptions) -> Result<()> {
    let config = AppConfig::load_or_default(&options.config)?.with_env_overrides();
    let player_a = options
        .player_a
        .clone()
        .unwrap_or_else(|| config.player_a().clone());
    let player_b = options
        .player_b
        .clone()
        .unwrap_or_else(|| config.player_b().clone());

    let suggester = match options.mode.automated_player() {
        Some(_) => Some(Arc::new(HttpSuggester::new(
            config.suggestion().base_url(),
            config.suggestion().timeout(),
        )?)),
        None => None,
    };

    let tally = ScoreTally::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    'matches: loop {
        let setup = MatchSetup::new(options.mode, player_a.as_str(), player_b.as_str())
            .with_dimensions(options.rows, options.cols);
        let first = pick_first(options.first);
        let mut session = GameSession::start(setup, first)?;
        if let (Some(player), Some(suggester)) = (options.mode.automated_player(), &suggester) {
            session = session.with_opponent(player, suggester.clone());
        }
        info!(first = ?first, "New match");
        println!("{} opens.", session.game().names().name(first));

        loop {
            println!("{}", session.game().grid().display());

            if session.game().is_terminal() {
                session.record_result(&tally);
                print_result(&session);
                print_tally(&tally);
                println!("Type 'again' for a new match or 'quit' to exit.");
                match next_input(&mut lines).await? {
                    Some(Input::Again) => continue 'matches,
                    Some(Input::Quit) | None => break 'matches,
                    Some(_) => println!("The match is over."),
                }
                continue;
            }

            if session.is_automated_turn() {
                println!("{} is thinking...", session.game().current_name());
                session.request_suggestion()?;
                let error = match session.await_suggestion().await {
                    Ok(resolution) => {
                        debug!(?resolution, "Suggestion resolved");
                        continue;
                    }
                    Err(e) => e,
                };
                match error {
                    SessionError::Suggestion(e) => {
                        println!("Move service unavailable: {}", e.message)
                    }
                    other => println!("Move service answered badly: {}", other),
                }
                println!("Type 'retry' to ask again, 'undo' or 'quit'.");
                match next_input(&mut lines).await? {
                    Some(Input::Retry) => {}
                    Some(Input::Undo) => undo(&mut session),
                    Some(Input::Quit) | None => break 'matches,
                    Some(_) => println!("Waiting for 'retry'."),
                }
                continue;
            }

            println!(
                "{} ({}) to move. Enter 'row col', 'undo' or 'quit'.",
                session.game().current_name(),
                session.game().current_player()
            );
            match next_input(&mut lines).await? {
                Some(Input::Place(coord)) => {
                    if let Err(e) = session.play(coord) {
                        println!("{}", e);
                    }
                }
                Some(Input::Undo) => undo(&mut session),
                Some(Input::Quit) | None => break 'matches,
                Some(Input::Again) => println!("Finish or quit the current match first."),
                Some(Input::Retry) => println!("Nothing to retry."),
                Some(Input::Unknown(text)) => println!("Unrecognized input: '{}'", text),
            }
        }
    }

    print_tally(&tally);
    Ok(())
}

fn undo(session: &mut GameSession) {
    match session.undo() {
        Ok(undone) => println!("Undid {}", undone),
        Err(e) => println!("{}", e),
    }
}

fn print_result(session: &GameSession) {
    match session.game().result() {
        MatchResult::Win(win) => {
            let line: Vec<String> = win.line.iter().map(Coord::to_string).collect();
            println!(
                "{} wins with {}",
                session.game().winner_name().unwrap_or_default(),
                line.join(" ")
            );
        }
        MatchResult::Draw => println!("Draw: the board is full."),
        MatchResult::InProgress => {}
    }
}

fn print_tally(tally: &ScoreTally) {
    let entries = tally.entries();
    if entries.is_empty() {
        return;
    }
    println!("Wins:");
    for entry in entries {
        println!("  {:<20} {}", entry.name(), entry.wins());
    }
}

/// Probes the configured service.
#[instrument]
pub async fn health(config: PathBuf) -> Result<()> {
    let config = AppConfig::load_or_default(&config)?.with_env_overrides();
    let client = HttpSuggester::new(
        config.suggestion().base_url(),
        config.suggestion().timeout(),
    )?;
    client.health().await?;
    println!("{} is healthy", client.base_url());
    Ok(())
}
