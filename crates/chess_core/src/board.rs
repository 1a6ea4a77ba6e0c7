use crate::error::BoardError;
use crate::types::*;

/// 8x8 grid of optional pieces with a cached square for each king.
///
/// Every public mutation keeps exactly one king per color on the board and
/// keeps the cache pointing at it. The board is `Copy`, so callers hand out
/// snapshots instead of borrowing a live game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
    kings: [Square; 2],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub fn startpos() -> Self {
        let mut cells = [[None; 8]; 8];
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            cells[0][col] = Some(Piece::new(Color::Black, kind));
            cells[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            cells[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            cells[7][col] = Some(Piece::new(Color::White, kind));
        }
        Board {
            cells,
            kings: [E1, E8],
        }
    }

    /// Parse the piece-placement field of a FEN string (rank 8 first).
    ///
    /// Anything after the first whitespace is ignored, so full FEN strings
    /// are accepted as well.
    pub fn from_placement(placement: &str) -> Result<Self, BoardError> {
        let board_part = placement.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(BoardError::RankCount(ranks.len()));
        }

        let mut cells = [[None; 8]; 8];
        let mut found: [Vec<Square>; 2] = [Vec::new(), Vec::new()];

        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as usize;
                    continue;
                }
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let kind = match ch.to_ascii_lowercase() {
                    'p' => PieceKind::Pawn,
                    'n' => PieceKind::Knight,
                    'b' => PieceKind::Bishop,
                    'r' => PieceKind::Rook,
                    'q' => PieceKind::Queen,
                    'k' => PieceKind::King,
                    _ => return Err(BoardError::InvalidPiece(ch)),
                };
                let sq = Square::new(row as i32, col as i32).ok_or(BoardError::FileCount {
                    rank: 8 - row,
                    files: col + 1,
                })?;
                if kind == PieceKind::King {
                    found[color.idx()].push(sq);
                }
                cells[row][col] = Some(Piece::new(color, kind));
                col += 1;
            }
            if col != 8 {
                return Err(BoardError::FileCount {
                    rank: 8 - row,
                    files: col,
                });
            }
        }

        let mut kings = [E1, E8];
        for color in [Color::White, Color::Black] {
            match found[color.idx()].as_slice() {
                [sq] => kings[color.idx()] = *sq,
                other => {
                    return Err(BoardError::KingCount {
                        color,
                        count: other.len(),
                    })
                }
            }
        }

        Ok(Board { cells, kings })
    }

    /// Piece-placement field in FEN form.
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for row in 0..8 {
            let mut empty = 0;
            for col in 0..8 {
                match self.cells[row][col] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.idx()]
    }

    /// Write a cell. Placing a king moves that color's king here (clearing
    /// its old square) and updates the cache. Overwriting a king is refused.
    pub fn place(&mut self, sq: Square, piece: Option<Piece>) -> Result<(), BoardError> {
        if let Some(current) = self.piece_at(sq) {
            if current.kind == PieceKind::King && piece != Some(current) {
                return Err(BoardError::KingRemoved {
                    color: current.color,
                    square: sq,
                });
            }
        }
        match piece {
            Some(pc) if pc.kind == PieceKind::King => {
                let old = self.king_square(pc.color);
                self.relocate(old, sq);
            }
            _ => self.set(sq, piece),
        }
        Ok(())
    }

    /// Move whatever stands on `from` to `to`, returning the previous
    /// occupant of `to`. Callers must never target a king.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.piece_at(from);
        let captured = self.piece_at(to);
        self.set(from, None);
        self.set(to, moving);
        if let Some(pc) = moving {
            if pc.kind == PieceKind::King {
                self.kings[pc.color.idx()] = to;
            }
        }
        captured
    }

    fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.row() as usize][sq.col() as usize] = piece;
    }

    /// Pieces of one color in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(pc) if pc.color == color => Some((sq, pc)),
            _ => None,
        })
    }
}

const E1: Square = Square::new_unchecked(7, 4);
const E8: Square = Square::new_unchecked(0, 4);

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
