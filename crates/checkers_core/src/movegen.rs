use std::collections::BTreeMap;

use crate::{board::Board, executor::apply, types::*};

/// Legal moves for one side, grouped by origin square in row-major order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalMoves {
    by_origin: BTreeMap<Square, Vec<Move>>,
}

impl LegalMoves {
    fn push(&mut self, mv: Move) {
        self.by_origin.entry(mv.from).or_default().push(mv);
    }

    pub fn is_empty(&self) -> bool {
        self.by_origin.is_empty()
    }

    /// Total number of moves across all origins.
    pub fn len(&self) -> usize {
        self.by_origin.values().map(Vec::len).sum()
    }

    /// Squares holding a piece that may move.
    pub fn origins(&self) -> impl Iterator<Item = Square> + '_ {
        self.by_origin.keys().copied()
    }

    pub fn from_square(&self, sq: Square) -> &[Move] {
        self.by_origin.get(&sq).map_or(&[], Vec::as_slice)
    }

    pub fn find(&self, from: Square, to: Square) -> Option<&Move> {
        self.from_square(from).iter().find(|mv| mv.to == to)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> + '_ {
        self.by_origin.values().flatten()
    }

    /// True when the side is under the mandatory-capture rule this turn.
    pub fn requires_capture(&self) -> bool {
        self.iter().any(Move::is_capture)
    }
}

/// Legal moves for `side`, or only for the piece on `restrict_to` while a
/// combo holds the turn.
///
/// Every candidate gets a chain score: 0 for a simple move, otherwise 1 plus
/// one if the same piece can capture again after the jump. Only candidates
/// matching the best score survive, so any available capture excludes every
/// simple move.
pub fn legal_moves(board: &Board, side: Side, restrict_to: Option<Square>) -> LegalMoves {
    let mut candidates = Vec::with_capacity(32);
    let mut buf = Vec::with_capacity(16);
    let mut best = 0u8;

    for (from, piece) in board.pieces(side) {
        if restrict_to.is_some_and(|only| only != from) {
            continue;
        }
        buf.clear();
        piece_moves(board, from, piece, &mut buf);
        for &mv in &buf {
            let score = chain_score(board, &mv);
            best = best.max(score);
            candidates.push((mv, score));
        }
    }

    let mut out = LegalMoves::default();
    for (mv, score) in candidates {
        if score == best {
            out.push(mv);
        }
    }
    out
}

/// All geometrically possible jumps for the piece on `from`, ignoring the
/// mandatory-capture filter.
pub fn piece_moves(board: &Board, from: Square, piece: Piece, out: &mut Vec<Move>) {
    for (dr, dc) in DIAGONALS {
        match piece.rank {
            Rank::Man => gen_man(board, from, piece.side, dr, dc, out),
            Rank::King => gen_king(board, from, piece.side, dr, dc, out),
        }
    }
}

fn gen_man(board: &Board, from: Square, side: Side, dr: i8, dc: i8, out: &mut Vec<Move>) {
    let Some(next) = from.offset(dr, dc) else {
        return;
    };
    match board.get(next) {
        None => {
            // Men step forward only but capture in every direction.
            if dr == side.forward() {
                out.push(Move::simple(from, next));
            }
        }
        Some(pc) if pc.side != side => {
            if let Some(land) = next.offset(dr, dc)
                && board.get(land).is_none()
            {
                out.push(Move::capture(from, land, next));
            }
        }
        Some(_) => {}
    }
}

fn gen_king(board: &Board, from: Square, side: Side, dr: i8, dc: i8, out: &mut Vec<Move>) {
    let mut cur = from;
    while let Some(next) = cur.offset(dr, dc) {
        match board.get(next) {
            None => {
                out.push(Move::simple(from, next));
                cur = next;
            }
            Some(pc) if pc.side != side => {
                // Every empty square past the enemy, up to the next obstruction.
                let mut land = next;
                while let Some(beyond) = land.offset(dr, dc) {
                    if board.get(beyond).is_some() {
                        break;
                    }
                    out.push(Move::capture(from, beyond, next));
                    land = beyond;
                }
                return;
            }
            Some(_) => return,
        }
    }
}

/// Single-ply lookahead: 0 for a simple move, 1 for a capture, 2 for a
/// capture after which the same piece can capture again. A capture that
/// promotes ends the turn and scores 1.
pub fn chain_score(board: &Board, mv: &Move) -> u8 {
    if !mv.is_capture() {
        return 0;
    }
    let mut scratch = board.clone();
    match apply(&mut scratch, mv) {
        Ok(applied) if !applied.promoted => 1 + u8::from(has_capture_from(&scratch, mv.to)),
        _ => 1,
    }
}

/// Whether the piece standing on `sq` has at least one capture available.
pub fn has_capture_from(board: &Board, sq: Square) -> bool {
    let Some(piece) = board.get(sq) else {
        return false;
    };
    let mut moves = Vec::with_capacity(16);
    piece_moves(board, sq, piece, &mut moves);
    moves.iter().any(Move::is_capture)
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
