pub mod attacks;
pub mod board;
pub mod error;
pub mod game;
pub mod geometry;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use attacks::*;
pub use board::*;
pub use error::*;
pub use game::*;
pub use geometry::*;
pub use movegen::*;
pub use notation::move_notation;
pub use perft::perft;
pub use types::*;

// =============================================================================
// Engine trait: implemented by every automated opponent
// =============================================================================

/// Trait that automated opponents implement.
///
/// Engines receive a board snapshot and the color to play. They never see
/// the live [`Game`], so a slow engine can't race with moves being applied.
pub trait Engine: Send {
    /// Pick a move for `color`, or `None` when it has no legal move.
    fn choose_move(&mut self, board: &Board, color: Color) -> Option<Move>;

    /// Returns the engine's name for display
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
