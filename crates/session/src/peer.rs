//! Async driver: feeds a [`GameSession`] from the relay and lets an engine
//! play the local side.

use checkers_core::Engine;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::SessionError;
use crate::protocol::{Inbound, Outbound};
use crate::session::GameSession;

/// A peer's two ends of its connection to the relay. Messages arrive and
/// leave in order, exactly once.
#[derive(Debug)]
pub struct PeerLink {
    pub inbound: mpsc::Receiver<Inbound>,
    pub outbound: mpsc::Sender<Outbound>,
}

/// Run one peer until its game ends or the relay goes away.
///
/// Whenever the session says it is our turn the engine picks from the legal
/// set, and each jump of a combo is played and announced on its own. The
/// session is handed back so the caller can inspect the final board and
/// outcome; a session that is not over means the relay closed first.
pub async fn run_peer(
    mut session: GameSession,
    engine: &mut dyn Engine,
    mut link: PeerLink,
) -> Result<GameSession, SessionError> {
    engine.new_game();

    loop {
        while session.state().is_my_turn() {
            let mv = engine
                .choose_move(session.board(), session.legal_moves())
                .ok_or_else(|| SessionError::NoMoveChosen(engine.name().to_string()))?;
            let out = session.play(mv.from, mv.to)?;
            if !send_all(&link.outbound, out).await {
                return Ok(session);
            }
        }

        if let Some(outcome) = session.state().outcome() {
            info!(
                side = %session.side(),
                winner = %outcome.winner,
                reason = %outcome.reason,
                "peer finished"
            );
            return Ok(session);
        }

        let Some(message) = link.inbound.recv().await else {
            debug!(side = %session.side(), "relay closed the inbound queue");
            return Ok(session);
        };
        let out = session.handle(message)?;
        if !send_all(&link.outbound, out).await {
            return Ok(session);
        }
    }
}

/// Returns false once the relay has stopped listening.
async fn send_all(outbound: &mpsc::Sender<Outbound>, messages: Vec<Outbound>) -> bool {
    for message in messages {
        if outbound.send(message).await.is_err() {
            debug!("relay closed the outbound queue");
            return false;
        }
    }
    true
}
