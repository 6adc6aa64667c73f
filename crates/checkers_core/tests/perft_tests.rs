use std::time::Instant;

use rayon::prelude::*;

use checkers_core::{Board, Side, perft, perft_divide};

#[test]
fn perft_from_starting_position() {
    let board = Board::starting();
    for side in [Side::White, Side::Red] {
        assert_eq!(perft(&board, side, 0), 1);
        assert_eq!(perft(&board, side, 1), 7);
        assert_eq!(perft(&board, side, 2), 49);
    }
}

#[test]
fn perft_divide_matches_total() {
    let cases = [
        (Board::starting(), Side::White, 5),
        (
            Board::from_diagram(
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
            .unwrap(),
            Side::Red,
            4,
        ),
    ];

    cases.par_iter().for_each(|(board, side, depth)| {
        let start = Instant::now();
        let divided = perft_divide(board, *side, *depth);
        let split: u64 = divided.par_iter().map(|(_, nodes)| nodes).sum();
        let total = perft(board, *side, *depth);
        assert_eq!(
            split, total,
            "divide mismatch at depth {depth} for {side} to move:\n{board}"
        );
        println!(
            "{side} depth {depth}: {} roots, {total} nodes, elapsed {:.3?}",
            divided.len(),
            start.elapsed()
        );
    });
}
