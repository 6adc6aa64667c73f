pub mod board;
pub mod executor;
pub mod movegen;
pub mod outcome;
pub mod perft;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use executor::*;
pub use movegen::*;
pub use outcome::*;
pub use perft::{perft, perft_divide};
pub use types::*;

// =============================================================================
// Engine trait: implemented by every move-choosing bot
// =============================================================================

/// Trait that all checkers bots must implement.
///
/// A bot never touches the board: it is handed the position and the moves the
/// generator already judged legal, and picks one of them.
pub trait Engine: Send {
    /// Choose one move out of `legal`.
    ///
    /// # Arguments
    /// * `board` - The current position
    /// * `legal` - Legal moves for the side to move (restricted to the combo
    ///   piece while a combo holds the turn)
    ///
    /// # Returns
    /// The chosen move, or None if `legal` is empty
    fn choose_move(&mut self, board: &Board, legal: &LegalMoves) -> Option<Move>;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
