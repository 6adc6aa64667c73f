//! The turn state machine for one peer.

use checkers_core::{
    Board, EndReason, LegalMoves, Move, Outcome, Piece, Side, Square, apply, keeps_turn,
    legal_moves, material_outcome, outcome,
};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::protocol::{GameOverNotice, Inbound, InitGame, MoveEnvelope, Outbound, RoomId, WireMove};
use crate::turn::TurnState;

/// One peer's view of a game: its own board, its side, the room it plays in
/// and whose turn it is.
///
/// The session never talks to the network. Inbound messages go through
/// [`GameSession::handle`], local selections through [`GameSession::play`];
/// both return the messages that must be sent to the relay, in order.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    side: Side,
    room: Option<RoomId>,
    state: TurnState,
    legal: LegalMoves,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            board: Board::starting(),
            side: Side::White,
            room: None,
            state: TurnState::WaitingForOpponent,
            legal: LegalMoves::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn room(&self) -> Option<&RoomId> {
        self.room.as_ref()
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Moves the local side may play now; empty unless it is our turn.
    pub fn legal_moves(&self) -> &LegalMoves {
        &self.legal
    }

    /// Consume one message from the relay.
    pub fn handle(&mut self, message: Inbound) -> Result<Vec<Outbound>, SessionError> {
        match message {
            Inbound::InitGame(init) => Ok(self.start(init)),
            Inbound::OpponentMove(envelope) => self.receive_move(envelope),
            Inbound::GameOver(notice) => {
                self.check_room(&notice.room)?;
                if self.state.is_over() {
                    debug!(room = %notice.room, "game_over received after the game ended");
                } else {
                    let reported =
                        Outcome::new(notice.winner, EndReason::from_wire(&notice.reason));
                    info!(
                        room = %notice.room,
                        winner = %reported.winner,
                        reason = %notice.reason,
                        "opponent reported game over"
                    );
                    self.state = TurnState::GameOver(reported);
                    self.legal = LegalMoves::default();
                }
                Ok(Vec::new())
            }
            Inbound::OpponentLeft => {
                match self.state {
                    TurnState::GameOver(_) => debug!("opponent left after the game ended"),
                    TurnState::WaitingForOpponent => {
                        debug!("opponent left before the game started")
                    }
                    _ => {
                        info!(winner = %self.side, "opponent left, game forfeited");
                        self.state =
                            TurnState::GameOver(Outcome::new(self.side, EndReason::OpponentLeft));
                        self.legal = LegalMoves::default();
                    }
                }
                Ok(Vec::new())
            }
        }
    }

    /// Start (or restart) a game from the fixed layout.
    fn start(&mut self, init: InitGame) -> Vec<Outbound> {
        self.start_from(init, Board::starting())
    }

    /// Start a game from an arbitrary position, e.g. to resume an adjourned
    /// game or to set up a study position.
    pub fn start_from(&mut self, init: InitGame, board: Board) -> Vec<Outbound> {
        info!(room = %init.room, side = %init.color, first = init.turn, "game started");
        self.board = board;
        self.side = init.color;
        self.room = Some(init.room);
        if init.turn {
            self.state = TurnState::MyTurnFree;
            self.legal = legal_moves(&self.board, self.side, None);
            if let Some(done) = outcome(&self.board, self.side) {
                return self.finish(done);
            }
        } else {
            self.state = TurnState::OpponentTurn { combo: None };
            self.legal = LegalMoves::default();
            if let Some(done) = material_outcome(&self.board) {
                return self.finish(done);
            }
        }
        Vec::new()
    }

    /// Play the local side's move `from -> to`.
    ///
    /// A pair outside [`GameSession::legal_moves`] is rejected with
    /// [`SessionError::IllegalSelection`] and changes nothing. On success the
    /// returned messages start with the `make_move` announcement, followed by
    /// `game_over` if the move ended the game.
    pub fn play(&mut self, from: Square, to: Square) -> Result<Vec<Outbound>, SessionError> {
        match self.state {
            TurnState::MyTurnFree | TurnState::MyTurnComboLocked(_) => {}
            TurnState::WaitingForOpponent => return Err(SessionError::NotStarted),
            TurnState::OpponentTurn { .. } => return Err(SessionError::NotYourTurn),
            TurnState::GameOver(_) => return Err(SessionError::GameOver),
        }
        let room = self.room.clone().ok_or(SessionError::NotStarted)?;
        let Some(mv) = self.legal.find(from, to).copied() else {
            debug!(%from, %to, "ignoring illegal selection");
            return Err(SessionError::IllegalSelection { from, to });
        };

        let applied = apply(&mut self.board, &mv)?;
        let keep_turn = keeps_turn(&self.board, &mv, applied);
        debug!(%mv, promoted = applied.promoted, keep_turn, "played");

        let mut out = vec![Outbound::MakeMove(MoveEnvelope {
            room,
            mv: WireMove {
                from: mv.from,
                to: mv.to,
                kind: mv.kind,
                promoted: applied.promoted,
                keep_turn,
            },
        })];

        let finished = if keep_turn {
            self.state = TurnState::MyTurnComboLocked(mv.to);
            self.legal = legal_moves(&self.board, self.side, Some(mv.to));
            material_outcome(&self.board)
        } else {
            self.state = TurnState::OpponentTurn { combo: None };
            self.legal = LegalMoves::default();
            outcome(&self.board, self.side.other())
        };
        if let Some(done) = finished {
            out.extend(self.finish(done));
        }
        Ok(out)
    }

    /// Replay an opponent's announced move on our board.
    fn receive_move(&mut self, envelope: MoveEnvelope) -> Result<Vec<Outbound>, SessionError> {
        let combo = match self.state {
            TurnState::OpponentTurn { combo } => combo,
            TurnState::WaitingForOpponent => return Err(SessionError::NotStarted),
            TurnState::GameOver(_) => {
                debug!(mv = %envelope.mv.to_move(), "opponent move after the game ended");
                return Ok(Vec::new());
            }
            TurnState::MyTurnFree | TurnState::MyTurnComboLocked(_) => {
                return Err(SessionError::UnexpectedOpponentMove);
            }
        };
        self.check_room(&envelope.room)?;

        let wire = envelope.mv;
        let opponent = self.side.other();
        let (mv, keep_turn) = if self.config.verify_remote_moves {
            let mv = self.verified(wire, opponent, combo)?;
            let mut next = self.board.clone();
            let applied = apply(&mut next, &mv)?;
            let expected = keeps_turn(&next, &mv, applied);
            if expected != wire.keep_turn || applied.promoted != wire.promoted {
                warn!(
                    %mv,
                    announced_keep_turn = wire.keep_turn,
                    expected,
                    announced_promoted = wire.promoted,
                    promoted = applied.promoted,
                    "rejecting opponent announcement that disagrees with local rules"
                );
                return Err(SessionError::IllegalRemoteMove(mv));
            }
            self.board = next;
            (mv, expected)
        } else {
            let mv = wire.to_move();
            let applied = apply(&mut self.board, &mv)?;
            if wire.promoted && !applied.promoted {
                // Trust the announcement as the reference client does.
                self.board.set(mv.to, Some(Piece::king(opponent)));
            }
            (mv, wire.keep_turn)
        };
        debug!(%mv, keep_turn, "opponent moved");

        let finished = if keep_turn {
            self.state = TurnState::OpponentTurn {
                combo: Some(mv.to),
            };
            material_outcome(&self.board)
        } else {
            self.state = TurnState::MyTurnFree;
            self.legal = legal_moves(&self.board, self.side, None);
            outcome(&self.board, self.side)
        };
        Ok(finished.map(|done| self.finish(done)).unwrap_or_default())
    }

    /// Match a relayed move against the opponent's legal set, restricted to
    /// the combo piece when one is still capturing.
    fn verified(
        &self,
        wire: WireMove,
        opponent: Side,
        combo: Option<Square>,
    ) -> Result<Move, SessionError> {
        let legal = legal_moves(&self.board, opponent, combo);
        match legal.find(wire.from, wire.to) {
            Some(found) if found.kind == wire.kind => Ok(*found),
            _ => {
                warn!(mv = %wire.to_move(), "rejecting illegal opponent move");
                Err(SessionError::IllegalRemoteMove(wire.to_move()))
            }
        }
    }

    fn finish(&mut self, done: Outcome) -> Vec<Outbound> {
        info!(winner = %done.winner, reason = %done.reason, "game over");
        self.state = TurnState::GameOver(done);
        self.legal = LegalMoves::default();
        match &self.room {
            Some(room) => vec![Outbound::GameOver(GameOverNotice {
                room: room.clone(),
                winner: done.winner,
                reason: done.reason.as_str().to_string(),
            })],
            None => Vec::new(),
        }
    }

    fn check_room(&self, got: &RoomId) -> Result<(), SessionError> {
        match &self.room {
            Some(expected) if expected != got => Err(SessionError::WrongRoom {
                expected: expected.clone(),
                got: got.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
