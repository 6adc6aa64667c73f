//! Random Move Checkers Bot
//!
//! Picks uniformly among the moves the generator offers. Useful for:
//! - Driving the session and relay end to end without a human
//! - Baseline comparisons (any real bot should easily beat this)
//! - Stress testing move generation through long random games

use checkers_core::{Board, Engine, LegalMoves, Move};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// A bot that plays random legal moves.
///
/// It never evaluates anything: while a combo holds the turn it is handed
/// only the capturing piece's continuations, so it finishes combos like any
/// other player. Seed it for reproducible games.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    moves_played: u64,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            moves_played: 0,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            moves_played: 0,
        }
    }

    /// Moves chosen since the last `new_game`.
    pub fn moves_played(&self) -> u64 {
        self.moves_played
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn choose_move(&mut self, _board: &Board, legal: &LegalMoves) -> Option<Move> {
        let moves: Vec<Move> = legal.iter().copied().collect();
        let choice = moves.choose(&mut self.rng).copied();
        if choice.is_some() {
            self.moves_played += 1;
        }
        choice
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.moves_played = 0;
    }
}
