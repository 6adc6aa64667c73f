use checkers_core::{Outcome, Square};

/// Where a peer stands in the turn cycle.
///
/// Across the two peers at most one is ever in `MyTurnFree` or
/// `MyTurnComboLocked`; the other is in `OpponentTurn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// No `init_game` received yet.
    WaitingForOpponent,
    /// Any legal move may be played.
    MyTurnFree,
    /// Mid-combo: only the piece on this square may move, and only to capture.
    MyTurnComboLocked(Square),
    /// Waiting for an announcement. `combo` holds the square of the
    /// opponent's piece while it is still capturing.
    OpponentTurn { combo: Option<Square> },
    GameOver(Outcome),
}

impl TurnState {
    pub fn is_my_turn(&self) -> bool {
        matches!(self, TurnState::MyTurnFree | TurnState::MyTurnComboLocked(_))
    }

    pub fn is_over(&self) -> bool {
        matches!(self, TurnState::GameOver(_))
    }

    /// Square the local side is locked to, if mid-combo.
    pub fn combo_lock(&self) -> Option<Square> {
        match self {
            TurnState::MyTurnComboLocked(sq) => Some(*sq),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            TurnState::GameOver(outcome) => Some(*outcome),
            _ => None,
        }
    }
}
