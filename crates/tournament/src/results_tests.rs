use super::*;

fn record(game: u32, engine1_side: Side, winner: Option<Side>) -> GameRecord {
    GameRecord {
        game,
        engine1_side,
        winner,
        reason: winner.map(|_| EndReason::NoPieces),
        plies: 30,
        adjourned: winner.is_none(),
        desync: false,
    }
}

#[test]
fn test_score() {
    let result = MatchResult {
        wins: 3,
        losses: 1,
        draws: 2,
        desyncs: 0,
    };
    assert_eq!(result.total_games(), 6);
    assert!((result.score() - 4.0 / 6.0).abs() < 1e-9);
    assert_eq!(MatchResult::new().score(), 0.5);
}

#[test]
fn test_results_follow_engine1_side() {
    let mut report = MatchReport::new("a", "b", MatchConfig::default());
    report.add_game(record(1, Side::White, Some(Side::White)));
    report.add_game(record(2, Side::Red, Some(Side::White)));
    report.add_game(record(3, Side::White, None));
    let mut desynced = record(4, Side::Red, Some(Side::Red));
    desynced.desync = true;
    report.add_game(desynced);

    assert_eq!(report.result.wins, 2);
    assert_eq!(report.result.losses, 1);
    assert_eq!(report.result.draws, 1);
    assert_eq!(report.result.desyncs, 1);

    let text = report.generate_report();
    assert!(text.contains("adjourned"));
    assert!(text.contains(" desync\n"));
}

#[test]
fn test_save_and_load() {
    let mut report = MatchReport::new("Random v1.0", "Random v1.0", MatchConfig::default());
    report.add_game(record(1, Side::White, Some(Side::Red)));

    let path = std::env::temp_dir().join(format!("checkers-report-{}.json", std::process::id()));
    report.save(&path).unwrap();
    let loaded = MatchReport::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.games, report.games);
    assert_eq!(loaded.result, report.result);
    assert_eq!(loaded.config, report.config);
}

#[test]
fn test_load_missing_file_fails() {
    let path = std::env::temp_dir().join("checkers-report-does-not-exist.json");
    assert!(MatchReport::load(&path).is_err());
}
