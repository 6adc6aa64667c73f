use thiserror::Error;

use crate::{board::Board, movegen::has_capture_from, types::*};

/// What a single applied jump did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Applied {
    pub captured: Option<Square>,
    pub promoted: bool,
}

/// Structural problems that make a move impossible to replay. Nothing is
/// mutated when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("no piece on origin square {0}")]
    EmptyOrigin(Square),
    #[error("destination square {0} is occupied")]
    OccupiedDestination(Square),
    #[error("{from} and {to} do not share a diagonal")]
    NotDiagonal { from: Square, to: Square },
}

/// Apply one jump to `board`.
///
/// Turn ownership is not consulted: the caller guarantees the move came from
/// `legal_moves` for the acting side, or has chosen to trust a relayed move.
/// Captures remove the recorded victim, or when none was recorded the first
/// occupied square between origin and destination. A man landing on its
/// promotion row is crowned immediately, mid-combo included.
pub fn apply(board: &mut Board, mv: &Move) -> Result<Applied, ApplyError> {
    let piece = board.get(mv.from).ok_or(ApplyError::EmptyOrigin(mv.from))?;
    let (dr, dc) = mv.from.diagonal_step(mv.to).ok_or(ApplyError::NotDiagonal {
        from: mv.from,
        to: mv.to,
    })?;
    if board.get(mv.to).is_some() {
        return Err(ApplyError::OccupiedDestination(mv.to));
    }

    let captured = match mv.kind {
        MoveKind::Simple => None,
        MoveKind::Capture => mv
            .captured
            .filter(|sq| board.get(*sq).is_some())
            .or_else(|| first_occupied_between(board, mv.from, mv.to, dr, dc)),
    };

    board.set(mv.from, None);
    if let Some(victim) = captured {
        board.set(victim, None);
    }

    let promoted = !piece.is_king() && mv.to.row() == piece.side.promotion_row();
    let landed = if promoted {
        Piece::king(piece.side)
    } else {
        piece
    };
    board.set(mv.to, Some(landed));

    Ok(Applied { captured, promoted })
}

fn first_occupied_between(
    board: &Board,
    from: Square,
    to: Square,
    dr: i8,
    dc: i8,
) -> Option<Square> {
    let mut cur = from.offset(dr, dc)?;
    while cur != to {
        if board.get(cur).is_some() {
            return Some(cur);
        }
        cur = cur.offset(dr, dc)?;
    }
    None
}

/// Whether the piece that just made `mv` keeps the turn: it captured, was not
/// crowned by this jump, and can capture again from where it landed.
pub fn keeps_turn(board: &Board, mv: &Move, applied: Applied) -> bool {
    mv.is_capture() && !applied.promoted && has_capture_from(board, mv.to)
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod executor_tests;
