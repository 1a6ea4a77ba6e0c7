//! Game state machine: whose turn it is, the move list, and when the game
//! has ended.

use serde::{Deserialize, Serialize};

use crate::attacks::in_check;
use crate::board::Board;
use crate::error::MoveError;
use crate::movegen::{has_legal_move, is_valid_move, legal_moves};
use crate::notation::move_notation;
use crate::types::*;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalKind {
    Checkmate,
    Stalemate,
}

/// Final result. `winner` is set only for checkmate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: TerminalKind,
    pub winner: Option<Color>,
}

/// Game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Terminal(Outcome),
}

/// A played move with its notation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub notation: String,
    /// Full-move number: white's move and black's reply share a number.
    pub move_number: u32,
    pub player: Color,
}

/// A single game from the standard start, or from a fixture position.
///
/// The board only changes through [`Game::apply_move`], which re-validates
/// every move. Once the status is terminal nothing changes any more.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Color,
    history: Vec<MoveRecord>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::startpos(), Color::White)
    }

    /// Start from an arbitrary position. If `to_move` already has no legal
    /// move the game starts out terminal; there is no previous mover, so a
    /// mate is credited to the side not to move.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let mut game = Game {
            board,
            current_player: to_move,
            history: Vec::new(),
            status: GameStatus::InProgress,
        };
        game.status = game.evaluate_status();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::Terminal(outcome) => Some(outcome),
            GameStatus::InProgress => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::Terminal(_))
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        in_check(self.current_player, &self.board)
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        legal_moves(&self.board, self.current_player)
    }

    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        !self.is_game_over() && is_valid_move(&self.board, from, to, self.current_player)
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Play a move for the side to move.
    ///
    /// The move is checked again here; an illegal request leaves the game
    /// untouched. On success the record is appended, the turn passes, and the
    /// status is re-evaluated for the new side to move.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        let mover = self.current_player;
        let piece = match self.board.piece_at(from) {
            Some(pc) if is_valid_move(&self.board, from, to, mover) => pc,
            _ => return Err(MoveError::Illegal { from, to, mover }),
        };

        let mv = Move::new(from, to, piece, self.board.piece_at(to));
        let notation = move_notation(&mv);
        self.board.relocate(from, to);

        let record = MoveRecord {
            mv,
            notation,
            move_number: self.history.len() as u32 / 2 + 1,
            player: mover,
        };
        self.history.push(record.clone());
        self.current_player = mover.other();
        self.status = self.evaluate_status();

        Ok(record)
    }

    fn evaluate_status(&self) -> GameStatus {
        let to_move = self.current_player;
        if has_legal_move(&self.board, to_move) {
            return GameStatus::InProgress;
        }
        if in_check(to_move, &self.board) {
            GameStatus::Terminal(Outcome {
                kind: TerminalKind::Checkmate,
                winner: Some(to_move.other()),
            })
        } else {
            GameStatus::Terminal(Outcome {
                kind: TerminalKind::Stalemate,
                winner: None,
            })
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
