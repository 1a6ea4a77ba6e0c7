use crate::{
    attacks::would_expose_king,
    board::Board,
    geometry::is_geometry_legal,
    types::*,
};

/// Full legality check for moving `mover`'s piece from `from` to `to`.
///
/// Rejects null moves, empty or foreign source squares, own-piece and king
/// destinations, illegal geometry, and anything that leaves `mover` in check.
pub fn is_valid_move(board: &Board, from: Square, to: Square, mover: Color) -> bool {
    if from == to {
        return false;
    }
    let piece = match board.piece_at(from) {
        Some(p) if p.color == mover => p,
        _ => return false,
    };
    if let Some(target) = board.piece_at(to) {
        if target.color == mover || target.kind == PieceKind::King {
            return false;
        }
    }
    if !is_geometry_legal(piece, from, to, board) {
        return false;
    }
    !would_expose_king(from, to, mover, board)
}

/// Same as [`is_valid_move`] but on raw coordinates. Anything off the board
/// is simply not a valid move.
pub fn is_valid_move_coords(
    board: &Board,
    from: (i32, i32),
    to: (i32, i32),
    mover: Color,
) -> bool {
    match (Square::new(from.0, from.1), Square::new(to.0, to.1)) {
        (Some(f), Some(t)) => is_valid_move(board, f, t, mover),
        _ => false,
    }
}

/// Generate all legal moves for `color`, returning a freshly allocated vector.
///
/// Ordering is row-major by source square, then row-major by destination.
/// The opponent selector truncates this list, so the order is part of the
/// contract.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(board, color, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(board: &Board, color: Color, out: &mut Vec<Move>) {
    out.clear();
    for (from, piece) in board.pieces(color) {
        for to in Square::all() {
            if is_valid_move(board, from, to, color) {
                out.push(Move::new(from, to, piece, board.piece_at(to)));
            }
        }
    }
}

/// Whether `color` has at least one legal move. Stops at the first one.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces(color)
        .any(|(from, _)| Square::all().any(|to| is_valid_move(board, from, to, color)))
}

/// Legal destinations for whatever piece stands on `from`, moving as its own
/// color. Empty when the square is empty.
pub fn legal_targets(board: &Board, from: Square) -> Vec<Square> {
    match board.piece_at(from) {
        Some(pc) => Square::all()
            .filter(|&to| is_valid_move(board, from, to, pc.color))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
