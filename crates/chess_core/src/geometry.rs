//! Movement patterns per piece type.
//!
//! These checks answer "can this piece travel from here to there" on the
//! given board. They know nothing about whose turn it is, the color of the
//! destination occupant, or whether the mover's king ends up in check;
//! that layering happens in [`crate::movegen`].

use crate::board::Board;
use crate::types::*;

/// Whether `piece` standing on `from` may travel to `to` under its movement
/// rules, including path blocking for sliders and occupancy rules for pawns.
pub fn is_geometry_legal(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    let dr = to.row() as i8 - from.row() as i8;
    let dc = to.col() as i8 - from.col() as i8;
    let (adr, adc) = (dr.abs(), dc.abs());

    match piece.kind {
        PieceKind::Pawn => pawn_move_legal(piece.color, from, to, dr, dc, board),
        PieceKind::Knight => (adr == 2 && adc == 1) || (adr == 1 && adc == 2),
        PieceKind::King => adr <= 1 && adc <= 1 && (adr, adc) != (0, 0),
        PieceKind::Rook => (dr == 0) != (dc == 0) && is_path_clear(from, to, board),
        PieceKind::Bishop => adr == adc && adr > 0 && is_path_clear(from, to, board),
        PieceKind::Queen => {
            let straight = (dr == 0) != (dc == 0);
            let diagonal = adr == adc && adr > 0;
            (straight || diagonal) && is_path_clear(from, to, board)
        }
    }
}

fn pawn_move_legal(c: Color, from: Square, to: Square, dr: i8, dc: i8, board: &Board) -> bool {
    let dir = c.forward();

    if dc == 0 {
        // Pushes never capture.
        if board.piece_at(to).is_some() {
            return false;
        }
        if dr == dir {
            return true;
        }
        if dr == 2 * dir && from.row() == c.pawn_row() {
            return match from.offset(dir, 0) {
                Some(mid) => board.piece_at(mid).is_none(),
                None => false,
            };
        }
        return false;
    }

    // Diagonal step only onto an occupied square; color is the caller's job.
    dc.abs() == 1 && dr == dir && board.piece_at(to).is_some()
}

/// Walk unit steps from the square after `from` up to but excluding `to`.
/// Any occupied square along the way blocks the path.
///
/// Only meaningful for rook, bishop and queen moves, i.e. when `from` and
/// `to` share a row, a column or a diagonal.
pub fn is_path_clear(from: Square, to: Square, board: &Board) -> bool {
    let step_r = (to.row() as i8 - from.row() as i8).signum();
    let step_c = (to.col() as i8 - from.col() as i8).signum();

    let mut cur = from;
    loop {
        cur = match cur.offset(step_r, step_c) {
            Some(sq) => sq,
            None => return true,
        };
        if cur == to {
            return true;
        }
        if board.piece_at(cur).is_some() {
            return false;
        }
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod geometry_tests;
