use checkers_core::{ApplyError, Move, Square};
use thiserror::Error;

use crate::protocol::RoomId;

/// Malformed wire data.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by [`GameSession`](crate::GameSession) and the peer driver.
///
/// None of these change session state: a rejected selection or message leaves
/// the board and turn exactly as they were.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("game has not started")]
    NotStarted,

    #[error("game is already over")]
    GameOver,

    #[error("not your turn")]
    NotYourTurn,

    /// The local player picked a square pair outside the legal set.
    #[error("illegal move {from} -> {to}")]
    IllegalSelection { from: Square, to: Square },

    /// A relayed move our move generator does not allow.
    #[error("opponent move {0} is not legal in this position")]
    IllegalRemoteMove(Move),

    #[error("opponent move arrived while it is our turn")]
    UnexpectedOpponentMove,

    #[error("message for room {got}, session is in room {expected}")]
    WrongRoom { expected: RoomId, got: RoomId },

    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The engine declined to move although the legal set was not empty.
    #[error("engine {0} returned no move")]
    NoMoveChosen(String),
}
