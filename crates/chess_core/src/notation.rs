//! Short algebraic notation for the move list.
//!
//! This is a simplified form: no disambiguation between identical pieces
//! and no check or mate suffix.

use crate::types::*;

/// Notation for a move, e.g. `e4`, `exd5`, `Nf3`, `Qxd5`.
pub fn move_notation(mv: &Move) -> String {
    let mut out = String::with_capacity(5);

    match mv.piece.kind {
        PieceKind::Pawn => {
            if mv.is_capture() {
                out.push(mv.from.file_char());
                out.push('x');
            }
        }
        kind => {
            out.push(kind.letter());
            if mv.is_capture() {
                out.push('x');
            }
        }
    }

    out.push_str(&mv.to.name());
    out
}
