//! Chess CLI
//!
//! Play the heuristic opponent from a terminal. Commands are read from stdin,
//! session notifications are printed as they arrive.

mod command;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chess_core::Color;
use clap::Parser;
use game_session::{
    ChannelObserver, Difficulty, GameEvent, GameSession, Selection, SessionConfig,
    SessionSnapshot,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use command::Command;

#[derive(Parser, Debug)]
#[command(name = "chess_cli", version, about = "Play chess against the heuristic opponent")]
struct Args {
    /// TOML session config
    #[arg(long)]
    config: Option<PathBuf>,

    /// easy, medium or hard (overrides the config)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Seed for a reproducible opponent (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Play black; the computer opens
    #[arg(long)]
    black: bool,

    /// Skip the thinking and announcement delays
    #[arg(long)]
    fast: bool,
}

impl Args {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SessionConfig::default(),
        };
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.black {
            config.human_color = Color::Black;
        }
        if self.fast {
            config = config.without_delays();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.session_config()?;
    info!(?config, "starting session");

    let session = GameSession::new(config.clone())?;
    let (observer, mut events) = ChannelObserver::new();
    session.add_observer(Arc::new(observer));

    println!("You play {} against the computer ({}).", config.human_color, config.difficulty);
    println!("Type 'help' for commands.");
    session.start_game(config.difficulty);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => print_event(&event, config.human_color),
                None => break,
            },
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                if !run_command(&session, &line) {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn print_event(event: &GameEvent, human: Color) {
    match event {
        GameEvent::StateChanged(snapshot) => {
            let humans_turn = snapshot.current_player == snapshot.human_color;
            if humans_turn && !snapshot.opponent_thinking && !snapshot.is_game_over() {
                print!("{}", render::board(snapshot));
            }
        }
        GameEvent::MoveApplied(record) => {
            println!("{}. {} ({})", record.move_number, record.notation, record.player);
        }
        GameEvent::OpponentThinkingChanged(true) => println!("Computer thinking..."),
        GameEvent::OpponentThinkingChanged(false) => {}
        GameEvent::Terminal(outcome) => println!("{}", render::outcome(*outcome, human)),
    }
}

/// Returns `false` when the user asked to quit.
fn run_command(session: &GameSession, line: &str) -> bool {
    let command = match command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return true,
        Err(msg) => {
            println!("{msg}");
            return true;
        }
    };

    match command {
        Command::Quit => return false,
        Command::Help => println!("{}", command::HELP),
        Command::New(difficulty) => {
            session.start_game(difficulty.unwrap_or(session.config().difficulty));
        }
        Command::Reset => session.reset_game(),
        Command::Move(from, to) => {
            if let Err(err) = session.attempt_move(from, to) {
                println!("{err}");
            }
        }
        Command::Select(square) => match session.select_square(square) {
            Selection::Ignored => println!("nothing to do on {square}"),
            Selection::Deselected => println!("deselected {square}"),
            Selection::Selected { targets, .. } if targets.is_empty() => {
                println!("{square} has no legal moves")
            }
            Selection::Selected { .. } | Selection::Moved(_) => {}
        },
        Command::Board | Command::Moves | Command::History | Command::Save(_) => {
            let Some(snapshot) = session.snapshot() else {
                println!("no game in progress");
                return true;
            };
            if let Err(err) = show(&snapshot, command) {
                println!("{err:#}");
            }
        }
    }
    true
}

fn show(snapshot: &SessionSnapshot, command: Command) -> Result<()> {
    match command {
        Command::Board => print!("{}", render::board(snapshot)),
        Command::Moves => println!("{}", render::moves(snapshot)),
        Command::History => println!("{}", render::history(&snapshot.history)),
        Command::Save(path) => {
            let json = serde_json::to_string_pretty(&snapshot.history)
                .context("serializing move history")?;
            std::fs::write(&path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("saved {} moves to {}", snapshot.history.len(), path.display());
        }
        _ => {}
    }
    Ok(())
}
