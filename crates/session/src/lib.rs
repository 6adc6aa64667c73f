//! Two-peer checkers sessions.
//!
//! Each peer owns a [`GameSession`] and its own board. Peers never share
//! state: a local move is announced to the relay as a `make_move` message and
//! replayed by the other peer when it arrives as `opponent_move`.
//!
//! - [`protocol`]: the JSON message contract with the relay
//! - [`session`]: the turn state machine
//! - [`peer`]: async driver feeding a session from an inbound queue
//! - [`relay`]: in-process loopback relay for local matches and tests

pub mod config;
pub mod error;
pub mod peer;
pub mod protocol;
pub mod relay;
pub mod session;
pub mod turn;

pub use config::SessionConfig;
pub use error::{ProtocolError, SessionError};
pub use peer::{PeerLink, run_peer};
pub use protocol::*;
pub use relay::{LoopbackRelay, RelayConfig, RelayReport};
pub use session::GameSession;
pub use turn::TurnState;
