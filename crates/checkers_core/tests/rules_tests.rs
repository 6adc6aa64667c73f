//! Rule properties checked across every position reachable from a handful of
//! seed positions, plus the scenarios the rules are usually explained with:
//! - Mandatory capture
//! - Direction of man moves, clear rays for kings
//! - Combo continuation and promotion ending the turn
//! - Terminal detection

use checkers_core::{
    Board, EndReason, Move, MoveKind, Outcome, Piece, Rank, Side, Square, apply, has_capture_from,
    keeps_turn, legal_moves, material_outcome, outcome,
};

fn at(row: u8, col: u8) -> Square {
    Square::new(row, col).unwrap()
}

// =============================================================================
// Exhaustive walk
// =============================================================================

/// Visit every position reachable in `depth` jumps, following combos the way
/// the turn logic does.
fn walk(
    board: &Board,
    side: Side,
    lock: Option<Square>,
    depth: u8,
    visit: &mut dyn FnMut(&Board, Side, Option<Square>),
) {
    visit(board, side, lock);
    if depth == 0 {
        return;
    }
    for mv in legal_moves(board, side, lock).iter() {
        let mut next = board.clone();
        let applied = apply(&mut next, mv).expect("generated move must apply");
        if keeps_turn(&next, mv, applied) {
            walk(&next, side, Some(mv.to), depth - 1, visit);
        } else {
            walk(&next, side.other(), None, depth - 1, visit);
        }
    }
}

fn seeds() -> Vec<(Board, Side)> {
    let mid = Board::from_diagram(
        "
        ........
        ..r.r...
        .r......
        ..w.w...
        .w...R..
        ....w...
        .W......
        ........
        ",
    )
    .unwrap();
    vec![
        (Board::starting(), Side::White),
        (Board::starting(), Side::Red),
        (mid.clone(), Side::Red),
        (mid, Side::White),
    ]
}

fn enemies_between(board: &Board, mv: &Move, side: Side) -> (usize, usize) {
    let (dr, dc) = mv.from.diagonal_step(mv.to).unwrap();
    let mut cur = mv.from.offset(dr, dc).unwrap();
    let (mut enemies, mut friends) = (0, 0);
    while cur != mv.to {
        match board.get(cur) {
            Some(pc) if pc.side == side => friends += 1,
            Some(_) => enemies += 1,
            None => {}
        }
        cur = cur.offset(dr, dc).unwrap();
    }
    (enemies, friends)
}

#[test]
fn test_capture_excludes_simple_moves_everywhere() {
    for (board, side) in seeds() {
        walk(&board, side, None, 4, &mut |b: &Board, s: Side, lock: Option<Square>| {
            let moves = legal_moves(b, s, lock);
            if moves.requires_capture() {
                assert!(
                    moves.iter().all(Move::is_capture),
                    "simple move offered while a capture exists:\n{b}"
                );
            }
        });
    }
}

#[test]
fn test_move_geometry_everywhere() {
    for (board, side) in seeds() {
        walk(&board, side, None, 4, &mut |b: &Board, s: Side, lock: Option<Square>| {
            for mv in legal_moves(b, s, lock).iter() {
                let piece = b.get(mv.from).unwrap();
                assert_eq!(piece.side, s);
                assert!(b.get(mv.to).is_none());
                let dist = (mv.to.row() as i8 - mv.from.row() as i8).abs();
                let (enemies, friends) = enemies_between(b, mv, s);
                assert_eq!(friends, 0, "{mv} jumps a friendly piece");
                match (piece.rank, mv.kind) {
                    (Rank::Man, MoveKind::Simple) => {
                        assert_eq!(dist, 1);
                        assert_eq!(mv.to.row() as i8 - mv.from.row() as i8, s.forward());
                    }
                    (Rank::Man, MoveKind::Capture) => {
                        assert_eq!(dist, 2);
                        assert_eq!(enemies, 1);
                    }
                    (Rank::King, MoveKind::Simple) => assert_eq!(enemies, 0),
                    (Rank::King, MoveKind::Capture) => assert_eq!(enemies, 1),
                }
            }
        });
    }
}

#[test]
fn test_keep_turn_matches_restricted_regeneration() {
    for (board, side) in seeds() {
        walk(&board, side, None, 3, &mut |b: &Board, s: Side, lock: Option<Square>| {
            for mv in legal_moves(b, s, lock).iter() {
                let mut next = b.clone();
                let applied = apply(&mut next, mv).unwrap();
                let again = legal_moves(&next, s, Some(mv.to));
                let expected = mv.is_capture() && !applied.promoted && again.requires_capture();
                assert_eq!(keeps_turn(&next, mv, applied), expected, "{mv}\n{b}");
            }
        });
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_red_man_captures_from_starting_rows() {
    let mut board = Board::starting();
    board.set(at(5, 2), None);
    board.set(at(3, 2), Some(Piece::man(Side::White)));

    let moves = legal_moves(&board, Side::Red, None);
    assert!(moves.iter().all(Move::is_capture));
    let mv = *moves.find(at(2, 1), at(4, 3)).unwrap();

    let applied = apply(&mut board, &mv).unwrap();
    assert_eq!(board.get(at(2, 1)), None);
    assert_eq!(board.get(at(3, 2)), None);
    assert_eq!(board.get(at(4, 3)), Some(Piece::man(Side::Red)));
    assert_eq!(
        keeps_turn(&board, &mv, applied),
        legal_moves(&board, Side::Red, Some(at(4, 3))).requires_capture()
    );
    assert!(!keeps_turn(&board, &mv, applied));
}

#[test]
fn test_promotion_by_capture_ends_the_turn() {
    let mut board = Board::from_diagram(
        "
        ........
        ........
        ........
        ........
        ........
        ..r.....
        ...w.w..
        ........
        ",
    )
    .unwrap();
    let mv = *legal_moves(&board, Side::Red, None)
        .find(at(5, 2), at(7, 4))
        .unwrap();
    let applied = apply(&mut board, &mv).unwrap();

    assert!(applied.promoted);
    assert_eq!(board.get(at(7, 4)), Some(Piece::king(Side::Red)));
    // The new king could jump (6,5) geometrically, the turn still ends
    assert!(has_capture_from(&board, at(7, 4)));
    assert!(!keeps_turn(&board, &mv, applied));
}

#[test]
fn test_combo_is_locked_to_the_capturing_piece() {
    let mut board = Board::from_diagram(
        "
        ........
        ........
        .r......
        ..w.....
        ........
        ....w...
        .r......
        ..w.....
        ",
    )
    .unwrap();
    // The man on (6,1) touches a white piece but has nowhere to land
    let mv = *legal_moves(&board, Side::Red, None)
        .find(at(2, 1), at(4, 3))
        .unwrap();
    let applied = apply(&mut board, &mv).unwrap();
    assert!(keeps_turn(&board, &mv, applied));

    let locked = legal_moves(&board, Side::Red, Some(at(4, 3)));
    assert_eq!(locked.origins().collect::<Vec<_>>(), vec![at(4, 3)]);
    assert!(locked.find(at(4, 3), at(6, 5)).is_some());
}

// =============================================================================
// Terminal detection
// =============================================================================

#[test]
fn test_no_pieces_loses_for_any_arrangement() {
    let arrangements = [
        vec![at(0, 1)],
        vec![at(7, 0), at(3, 4)],
        vec![at(5, 2), at(5, 4), at(6, 5), at(1, 0)],
    ];
    for squares in arrangements {
        let mut board = Board::empty();
        for sq in squares {
            board.set(sq, Some(Piece::man(Side::White)));
        }
        let expected = Some(Outcome::new(Side::White, EndReason::NoPieces));
        assert_eq!(material_outcome(&board), expected);
        assert_eq!(outcome(&board, Side::Red), expected);
        assert_eq!(outcome(&board, Side::White), expected);
    }
}

#[test]
fn test_no_moves_loses() {
    let board = Board::from_diagram(
        "
        ........
        ........
        ........
        ........
        ........
        ..w.....
        .w......
        r.......
        ",
    )
    .unwrap();
    assert_eq!(
        outcome(&board, Side::Red),
        Some(Outcome::new(Side::White, EndReason::NoMoves))
    );
    assert_eq!(outcome(&board, Side::White), None);
    assert_eq!(outcome(&Board::starting(), Side::White), None);
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_square_serde_validates_range() {
    let sq: Square = serde_json::from_str(r#"{"row":2,"col":5}"#).unwrap();
    assert_eq!(sq, at(2, 5));
    assert_eq!(serde_json::to_string(&sq).unwrap(), r#"{"row":2,"col":5}"#);
    assert!(serde_json::from_str::<Square>(r#"{"row":8,"col":0}"#).is_err());
}

#[test]
fn test_piece_and_reason_wire_names() {
    let king = serde_json::to_string(&Piece::king(Side::Red)).unwrap();
    assert_eq!(king, r#"{"side":"red","rank":"king"}"#);
    assert_eq!(
        serde_json::to_string(&EndReason::NoPieces).unwrap(),
        r#""no_pieces""#
    );
    assert_eq!(serde_json::to_string(&MoveKind::Capture).unwrap(), r#""capture""#);
    assert_eq!(EndReason::from_wire("opponent_left"), EndReason::OpponentLeft);
    assert_eq!(EndReason::from_wire("timeout"), EndReason::Reported);
}
