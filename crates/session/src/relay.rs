//! In-process relay connecting two peers over tokio channels.
//!
//! Like the networked relay it stands in for, it never looks at the board: it
//! assigns colours, forwards announcements and reports disconnects.

use checkers_core::{EndReason, Outcome, Side};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::peer::PeerLink;
use crate::protocol::{Inbound, InitGame, Outbound, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Adjourn the game once this many jumps were forwarded and the turn
    /// has passed. `None` relays until the game ends.
    pub max_plies: Option<u32>,
    pub channel_capacity: usize,
    pub first_to_move: Side,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_plies: None,
            channel_capacity: 32,
            first_to_move: Side::White,
        }
    }
}

/// What the relay saw of one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayReport {
    /// Jumps forwarded; every step of a combo counts.
    pub plies: u32,
    /// First `game_over` seen, or the forfeit after a disconnect.
    pub outcome: Option<Outcome>,
    pub adjourned: bool,
}

/// The relay's half of one peer connection.
struct Seat {
    side: Side,
    to_peer: mpsc::Sender<Inbound>,
    from_peer: mpsc::Receiver<Outbound>,
    open: bool,
}

impl Seat {
    fn connect(side: Side, capacity: usize) -> (Seat, PeerLink) {
        let (to_peer, inbound) = mpsc::channel(capacity);
        let (outbound, from_peer) = mpsc::channel(capacity);
        let seat = Seat {
            side,
            to_peer,
            from_peer,
            open: true,
        };
        (seat, PeerLink { inbound, outbound })
    }

    async fn deliver(&self, message: Inbound) {
        if self.to_peer.send(message).await.is_err() {
            debug!(side = %self.side, "peer already gone, message dropped");
        }
    }
}

pub struct LoopbackRelay {
    room: RoomId,
    config: RelayConfig,
    white: Seat,
    red: Seat,
}

impl LoopbackRelay {
    /// Open a room with two seats. Returns the relay and the white and red
    /// peers' links, in that order.
    pub fn new(room: RoomId, config: RelayConfig) -> (Self, PeerLink, PeerLink) {
        let capacity = config.channel_capacity.max(1);
        let (white, white_link) = Seat::connect(Side::White, capacity);
        let (red, red_link) = Seat::connect(Side::Red, capacity);
        let relay = Self {
            room,
            config,
            white,
            red,
        };
        (relay, white_link, red_link)
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    /// Start the game and forward messages until both peers have hung up or
    /// the ply cap adjourns the game. Dropping the relay closes both links.
    pub async fn run(mut self) -> RelayReport {
        for side in [Side::White, Side::Red] {
            let init = InitGame {
                color: side,
                room: self.room.clone(),
                turn: side == self.config.first_to_move,
            };
            let (seat, _) = seats(&mut self.white, &mut self.red, side);
            seat.deliver(Inbound::InitGame(init)).await;
        }
        info!(room = %self.room, first = %self.config.first_to_move, "room opened");

        let mut report = RelayReport::default();
        loop {
            let (from, message) = tokio::select! {
                msg = self.white.from_peer.recv(), if self.white.open => (Side::White, msg),
                msg = self.red.from_peer.recv(), if self.red.open => (Side::Red, msg),
                else => break,
            };

            let (sender, receiver) = seats(&mut self.white, &mut self.red, from);
            match message {
                None => {
                    sender.open = false;
                    if report.outcome.is_none() && receiver.open {
                        info!(side = %from, "peer left mid-game");
                        report.outcome =
                            Some(Outcome::new(from.other(), EndReason::OpponentLeft));
                        receiver.deliver(Inbound::OpponentLeft).await;
                    }
                }
                Some(Outbound::MakeMove(envelope)) => {
                    let turn_passes = !envelope.mv.keep_turn;
                    receiver.deliver(Inbound::OpponentMove(envelope)).await;
                    report.plies += 1;
                    let capped = self
                        .config
                        .max_plies
                        .is_some_and(|cap| report.plies >= cap);
                    if capped && turn_passes && report.outcome.is_none() {
                        info!(
                            room = %self.room,
                            plies = report.plies,
                            "ply cap reached, adjourning"
                        );
                        report.adjourned = true;
                        break;
                    }
                }
                Some(Outbound::GameOver(notice)) => {
                    if report.outcome.is_none() {
                        info!(
                            room = %self.room,
                            winner = %notice.winner,
                            reason = %notice.reason,
                            "game over reported"
                        );
                        report.outcome = Some(Outcome::new(
                            notice.winner,
                            EndReason::from_wire(&notice.reason),
                        ));
                    }
                    receiver.deliver(Inbound::GameOver(notice)).await;
                }
            }
        }
        report
    }
}

/// `side`'s seat first, its opponent's second.
fn seats<'a>(
    white: &'a mut Seat,
    red: &'a mut Seat,
    side: Side,
) -> (&'a mut Seat, &'a mut Seat) {
    match side {
        Side::White => (white, red),
        Side::Red => (red, white),
    }
}
