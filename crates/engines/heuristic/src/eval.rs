//! One-ply move scoring.

use chess_core::{Board, Move, PieceKind};
use rand::Rng;

/// Upper bound (exclusive) of the random tie-breaking noise.
pub const JITTER: f64 = 0.1;

const CAPTURE_WEIGHT: f64 = 2.0;
const CENTER_BONUS: f64 = 0.5;
const DEVELOPMENT_BONUS: f64 = 0.3;
const KING_SHELTER_BONUS: f64 = 0.4;

/// Deterministic part of the move score.
///
/// - twice the material value of the captured piece
/// - a bonus for landing on d4, e4, d5 or e5
/// - a bonus for leaving row 0, the back rank the automated side starts on
/// - a bonus for a king stepping onto row 0 outside files c..f
pub fn quick_score(board: &Board, mv: &Move) -> f64 {
    let mut score = 0.0;

    if let Some(target) = board.piece_at(mv.to) {
        score += target.kind.value() as f64 * CAPTURE_WEIGHT;
    }

    if (3..=4).contains(&mv.to.row()) && (3..=4).contains(&mv.to.col()) {
        score += CENTER_BONUS;
    }

    if mv.from.row() == 0 && mv.to.row() > 0 {
        score += DEVELOPMENT_BONUS;
    }

    if mv.piece.kind == PieceKind::King
        && mv.to.row() == 0
        && (mv.to.col() < 2 || mv.to.col() > 5)
    {
        score += KING_SHELTER_BONUS;
    }

    score
}

/// [`quick_score`] plus uniform noise in `[0, JITTER)`.
pub fn evaluate_move_quick<R: Rng>(board: &Board, mv: &Move, rng: &mut R) -> f64 {
    rng.gen_range(0.0..JITTER) + quick_score(board, mv)
}
