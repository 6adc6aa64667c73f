use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{board::Board, movegen::legal_moves, types::Side};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The loser has no pieces left.
    NoPieces,
    /// The loser had the move and no legal move to make.
    NoMoves,
    /// The loser disconnected.
    OpponentLeft,
    /// Announced by the other peer with a reason we do not recognise.
    Reported,
}

impl EndReason {
    pub fn as_str(self) -> &'static str {
        match self {
            EndReason::NoPieces => "no_pieces",
            EndReason::NoMoves => "no_moves",
            EndReason::OpponentLeft => "opponent_left",
            EndReason::Reported => "reported",
        }
    }

    /// Map a free-form wire reason back to a known variant.
    pub fn from_wire(reason: &str) -> Self {
        match reason {
            "no_pieces" => EndReason::NoPieces,
            "no_moves" => EndReason::NoMoves,
            "opponent_left" => EndReason::OpponentLeft,
            _ => EndReason::Reported,
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Side,
    pub reason: EndReason,
}

impl Outcome {
    pub fn new(winner: Side, reason: EndReason) -> Self {
        Self { winner, reason }
    }

    pub fn loser(&self) -> Side {
        self.winner.other()
    }
}

/// A side with no pieces has lost, whoever is to move.
pub fn material_outcome(board: &Board) -> Option<Outcome> {
    [Side::White, Side::Red]
        .into_iter()
        .find(|&side| board.count(side) == 0)
        .map(|side| Outcome::new(side.other(), EndReason::NoPieces))
}

/// Terminal check for a position where `to_move` is about to play a fresh turn.
pub fn outcome(board: &Board, to_move: Side) -> Option<Outcome> {
    if let Some(done) = material_outcome(board) {
        return Some(done);
    }
    if legal_moves(board, to_move, None).is_empty() {
        return Some(Outcome::new(to_move.other(), EndReason::NoMoves));
    }
    None
}
