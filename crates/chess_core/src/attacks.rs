//! Attack detection and king-safety simulation.
//!
//! Attack detection reuses the movement rules in [`crate::geometry`] for
//! every piece except pawns. A pawn attacks the two squares diagonally ahead
//! of it whether or not anything stands there, which is not what its move
//! rule says: a pawn may only step diagonally onto an occupied square.

use crate::board::Board;
use crate::geometry::is_geometry_legal;
use crate::types::*;

/// Whether any piece of color `by` attacks `target`.
pub fn is_square_attacked(target: Square, by: Color, board: &Board) -> bool {
    board
        .pieces(by)
        .any(|(from, pc)| attacks_square(pc, from, target, board))
}

fn attacks_square(piece: Piece, from: Square, target: Square, board: &Board) -> bool {
    if from == target {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => {
            let dr = target.row() as i8 - from.row() as i8;
            let dc = target.col() as i8 - from.col() as i8;
            dr == piece.color.forward() && dc.abs() == 1
        }
        _ => is_geometry_legal(piece, from, target, board),
    }
}

/// Whether the king of `color` is attacked by the other side.
pub fn in_check(color: Color, board: &Board) -> bool {
    is_square_attacked(board.king_square(color), color.other(), board)
}

/// Whether moving the piece on `from` to `to` would leave `mover`'s king
/// attacked.
///
/// The move is played on a copy of the board, so the caller's board is never
/// touched and nothing needs to be restored afterwards.
pub fn would_expose_king(from: Square, to: Square, mover: Color, board: &Board) -> bool {
    let mut scratch = *board;
    scratch.relocate(from, to);
    in_check(mover, &scratch)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
