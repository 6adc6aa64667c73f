use super::*;

#[test]
fn test_starting_layout() {
    let b = Board::starting();
    assert_eq!(b.count(Side::Red), 12);
    assert_eq!(b.count(Side::White), 12);
    for (sq, pc) in b.occupied() {
        assert!(sq.is_playable());
        match pc.side {
            Side::Red => assert!(sq.row() < 3),
            Side::White => assert!(sq.row() > 4),
        }
    }
    assert!(Board::is_playable(0, 1));
    assert!(!Board::is_playable(0, 0));
    assert!(!Board::is_playable(8, 1));
}

#[test]
fn test_diagram_round_trip() {
    let b = Board::starting();
    let text = b.to_string();
    assert!(text.starts_with(".r.r.r.r\n"));
    assert_eq!(Board::from_diagram(&text), Ok(b));
}

#[test]
fn test_diagram_errors() {
    assert_eq!(
        Board::from_diagram("........"),
        Err(BoardError::RowCount(1))
    );

    let short = "........\n".repeat(7) + ".......";
    assert_eq!(
        Board::from_diagram(&short),
        Err(BoardError::RowWidth { row: 7, found: 7 })
    );

    let light = "r.......\n".to_string() + &"........\n".repeat(7);
    assert_eq!(
        Board::from_diagram(&light),
        Err(BoardError::Unplayable(Square::new(0, 0).unwrap()))
    );

    let bad = ".x......\n".to_string() + &"........\n".repeat(7);
    assert!(matches!(
        Board::from_diagram(&bad),
        Err(BoardError::InvalidChar { ch: 'x', .. })
    ));
}

#[test]
fn test_clone_is_independent() {
    let b = Board::starting();
    let mut copy = b.clone();
    copy.set(Square::new(2, 1).unwrap(), None);
    assert_eq!(b.count(Side::Red), 12);
    assert_eq!(copy.count(Side::Red), 11);
}
