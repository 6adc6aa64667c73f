use crate::{
    board::Board,
    executor::{apply, keeps_turn},
    movegen::legal_moves,
    types::{Move, Side, Square},
};

/// Move-tree leaf count `depth` plies deep, where one ply is one jump.
/// A combo continuation keeps the same side to move, locked to the piece
/// that just captured.
pub fn perft(board: &Board, side: Side, depth: u8) -> u64 {
    inner(board, side, None, depth)
}

/// Per-root-move breakdown of [`perft`].
pub fn perft_divide(board: &Board, side: Side, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    legal_moves(board, side, None)
        .iter()
        .map(|mv| (*mv, after(board, side, mv, depth - 1)))
        .collect()
}

fn inner(board: &Board, side: Side, lock: Option<Square>, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    legal_moves(board, side, lock)
        .iter()
        .map(|mv| after(board, side, mv, depth - 1))
        .sum()
}

fn after(board: &Board, side: Side, mv: &Move, depth: u8) -> u64 {
    let mut next = board.clone();
    let Ok(applied) = apply(&mut next, mv) else {
        return 0;
    };
    if keeps_turn(&next, mv, applied) {
        inner(&next, side, Some(mv.to), depth)
    } else {
        inner(&next, side.other(), None, depth)
    }
}
