//! Parsing of the line-based commands read from stdin.

use std::path::PathBuf;

use chess_core::Square;
use game_session::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Square, Square),
    Select(Square),
    Moves,
    Board,
    History,
    Save(PathBuf),
    New(Option<Difficulty>),
    Reset,
    Help,
    Quit,
}

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = parts.split_first() else {
        return Ok(None);
    };

    let command = match (head.to_ascii_lowercase().as_str(), rest) {
        ("quit" | "exit", []) => Command::Quit,
        ("help" | "?", []) => Command::Help,
        ("board", []) => Command::Board,
        ("moves", []) => Command::Moves,
        ("history", []) => Command::History,
        ("reset", []) => Command::Reset,
        ("new", []) => Command::New(None),
        ("new", [level]) => Command::New(Some(level.parse().map_err(|e| format!("{e}"))?)),
        ("save", [path]) => Command::Save(PathBuf::from(path)),
        ("select", [sq]) => Command::Select(square(sq)?),
        ("save", _) => return Err("usage: save <path>".to_string()),
        ("select", _) => return Err("usage: select <square>".to_string()),
        (text, []) if text.len() == 4 && text.is_ascii() => {
            Command::Move(square(&text[..2])?, square(&text[2..])?)
        }
        (from, [to]) => Command::Move(square(from)?, square(to)?),
        _ => return Err(format!("unrecognised command: {line}")),
    };
    Ok(Some(command))
}

fn square(name: &str) -> Result<Square, String> {
    name.parse().map_err(|e| format!("{e}"))
}

pub const HELP: &str = "\
Commands:
  e2e4 | e2 e4     play a move
  select <sq>      click a square (select, deselect or move)
  moves            list your legal moves
  board            show the board
  history          show the move list
  save <path>      write the move list as JSON
  new [level]      start a new game (easy, medium, hard)
  reset            restart at the current difficulty
  quit";

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
