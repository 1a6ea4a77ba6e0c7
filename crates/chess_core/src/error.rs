//! Error types for board construction and move application.

use thiserror::Error;

use crate::types::{Color, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a square name: {0:?}")]
pub struct SquareParseError(pub String);

/// Errors raised while building or editing a board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("placement must have 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} must describe 8 files, found {files}")]
    FileCount { rank: usize, files: usize },

    #[error("invalid piece character {0:?}")]
    InvalidPiece(char),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("{color} king on {square} cannot be removed or replaced")]
    KingRemoved { color: Color, square: Square },
}

/// Reasons a requested move was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("{from}{to} is not a legal move for {mover}")]
    Illegal {
        from: Square,
        to: Square,
        mover: Color,
    },

    #[error("the game is already over")]
    GameOver,
}
