//! Heuristic Move Selector
//!
//! Picks a move for the automated side with a one-ply greedy score. There is
//! no look-ahead: each candidate is scored on its own and the best one wins.
//!
//! - Only the first [`EVALUATION_WINDOW`] legal moves are scored, in the
//!   generator's row-major order. This trades strength for speed.
//! - On [`Difficulty::Easy`] most calls skip scoring and play a random legal
//!   move instead.

mod eval;

pub use eval::{evaluate_move_quick, quick_score, JITTER};

use chess_core::{legal_moves, Board, Color, Engine, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
mod lib_tests;

/// How many moves from the front of the legal list get scored.
pub const EVALUATION_WINDOW: usize = 15;

/// Chance that an easy opponent plays a uniformly random move.
pub const EASY_RANDOM_RATE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// Pick a move for `color`, or `None` when it has no legal move.
///
/// Medium and hard behave identically. Ties in the score keep the earliest
/// move in generation order.
pub fn select_move<R: Rng>(
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    let moves = legal_moves(board, color);
    if moves.is_empty() {
        return None;
    }

    if difficulty == Difficulty::Easy && rng.gen_bool(EASY_RANDOM_RATE) {
        let pick = moves.choose(rng).copied();
        debug!(?difficulty, mv = ?pick.map(|m| m.to_string()), "random pick");
        return pick;
    }

    let mut best: Option<(Move, f64)> = None;
    for mv in moves.iter().take(EVALUATION_WINDOW) {
        let score = evaluate_move_quick(board, mv, rng);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((*mv, score)),
        }
    }

    let (mv, score) = best?;
    debug!(?difficulty, mv = %mv, score, candidates = moves.len(), "scored pick");
    Some(mv)
}

/// An [`Engine`] that plays [`select_move`] at a fixed difficulty.
#[derive(Debug, Clone)]
pub struct HeuristicEngine {
    difficulty: Difficulty,
    rng: StdRng,
}

impl HeuristicEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic engine for tests and reproducible games.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl Engine for HeuristicEngine {
    fn choose_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        select_move(board, color, self.difficulty, &mut self.rng)
    }

    fn name(&self) -> &str {
        match self.difficulty {
            Difficulty::Easy => "Heuristic (easy)",
            Difficulty::Medium => "Heuristic (medium)",
            Difficulty::Hard => "Heuristic (hard)",
        }
    }
}
