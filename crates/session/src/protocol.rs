//! Messages exchanged with the relay.
//!
//! Every message is a JSON object `{"event": "<name>", "data": {...}}`; on a
//! byte stream they are framed one per line. The relay only forwards: it
//! turns a peer's `make_move` into `opponent_move` for the other peer and
//! passes `game_over` through. There are no sequence numbers or
//! acknowledgements, so delivery must be in order and exactly once.

use std::fmt;

use checkers_core::{Move, MoveKind, Side, Square};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::ProtocolError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One jump as announced on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMove {
    pub from: Square,
    pub to: Square,
    #[serde(rename = "type")]
    pub kind: MoveKind,
    pub promoted: bool,
    /// The mover captured and can capture again: another announcement
    /// from the same turn follows.
    #[serde(rename = "keepTurn")]
    pub keep_turn: bool,
}

impl WireMove {
    /// The move as the executor sees it. The victim is not on the wire and is
    /// found by walking the diagonal.
    pub fn to_move(&self) -> Move {
        Move {
            from: self.from,
            to: self.to,
            kind: self.kind,
            captured: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitGame {
    pub color: Side,
    pub room: RoomId,
    /// Whether this peer moves first.
    pub turn: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEnvelope {
    pub room: RoomId,
    #[serde(rename = "move")]
    pub mv: WireMove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverNotice {
    pub room: RoomId,
    pub winner: Side,
    pub reason: String,
}

/// Messages the relay delivers to a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Inbound {
    InitGame(InitGame),
    OpponentMove(MoveEnvelope),
    GameOver(GameOverNotice),
    OpponentLeft,
}

/// Messages a peer hands to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Outbound {
    MakeMove(MoveEnvelope),
    GameOver(GameOverNotice),
}

/// Serialize one message as a single JSON line, without the trailing newline.
pub fn encode<T: Serialize>(message: &T) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

fn decode<T: DeserializeOwned>(line: &str) -> Result<T, ProtocolError> {
    Ok(serde_json::from_str(line.trim())?)
}

pub fn decode_inbound(line: &str) -> Result<Inbound, ProtocolError> {
    decode(line)
}

pub fn decode_outbound(line: &str) -> Result<Outbound, ProtocolError> {
    decode(line)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
