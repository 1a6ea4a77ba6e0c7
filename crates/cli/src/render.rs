//! Text output for the terminal.

use std::fmt::Write;

use chess_core::{legal_moves, Color, MoveRecord, Outcome, Square, TerminalKind};
use game_session::SessionSnapshot;

/// Board diagram from white's side. Targets of the selected piece show as
/// `*`, the selection itself is bracketed.
pub fn board(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    for row in 0..8 {
        let _ = write!(out, "{} ", 8 - row);
        for col in 0..8 {
            let Some(sq) = Square::new(row, col) else {
                continue;
            };
            let glyph = match snapshot.board.piece_at(sq) {
                Some(pc) => pc.symbol(),
                None if snapshot.targets.contains(&sq) => '*',
                None => '.',
            };
            if snapshot.selected == Some(sq) {
                let _ = write!(out, "[{glyph}]");
            } else if snapshot.targets.contains(&sq) && glyph != '*' {
                let _ = write!(out, "*{glyph} ");
            } else {
                let _ = write!(out, " {glyph} ");
            }
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h\n");

    if snapshot.in_check && !snapshot.is_game_over() {
        let _ = writeln!(out, "{} is in check", snapshot.current_player);
    }
    out
}

/// The human's legal moves, or a refusal when it isn't their turn.
pub fn moves(snapshot: &SessionSnapshot) -> String {
    if snapshot.current_player != snapshot.human_color
        || snapshot.opponent_thinking
        || snapshot.is_game_over()
    {
        return "not your turn".to_string();
    }
    legal_moves(&snapshot.board, snapshot.human_color)
        .iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Move list, one line per full move: `1. e4 e5`.
pub fn history(records: &[MoveRecord]) -> String {
    let mut out = String::new();
    for record in records {
        match record.player {
            Color::White => {
                if !out.is_empty() {
                    out.push('\n');
                }
                let _ = write!(out, "{}. {}", record.move_number, record.notation);
            }
            Color::Black if out.is_empty() => {
                let _ = write!(out, "{}. ... {}", record.move_number, record.notation);
            }
            Color::Black => {
                let _ = write!(out, " {}", record.notation);
            }
        }
    }
    out
}

/// End-of-game message from the human's point of view.
pub fn outcome(outcome: Outcome, human: Color) -> String {
    match (outcome.kind, outcome.winner) {
        (TerminalKind::Checkmate, Some(winner)) if winner == human => {
            "Checkmate! You win!".to_string()
        }
        (TerminalKind::Checkmate, _) => "Checkmate! Computer wins!".to_string(),
        (TerminalKind::Stalemate, _) => "Stalemate! It's a draw!".to_string(),
    }
}
