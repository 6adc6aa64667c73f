//! Match runner for playing games between engines
//!
//! Every game is played the way two remote players would play it: each engine
//! drives its own [`GameSession`] with its own board, and the two only talk
//! through a [`LoopbackRelay`].

use anyhow::Context;
use checkers_core::{Engine, Side};
use checkers_session::{GameSession, LoopbackRelay, RelayConfig, RoomId, SessionConfig, run_peer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::results::{GameRecord, MatchReport, MatchResult};

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Relayed jumps before a game is adjourned as a draw (None = no limit)
    pub max_plies: Option<u32>,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Seed for the bots' move choice (None = from entropy)
    pub seed: Option<u64>,
    /// Settings for both peers' sessions
    pub session: SessionConfig,
    /// Queue depth of every relay link
    pub channel_capacity: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_plies: Some(400),
            alternate_colors: true,
            seed: None,
            session: SessionConfig::default(),
            channel_capacity: 32,
        }
    }
}

impl MatchConfig {
    /// Load a config from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            max_plies: self.max_plies,
            channel_capacity: self.channel_capacity,
            first_to_move: Side::White,
        }
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub async fn run_match(
        &self,
        engine1: &mut dyn Engine,
        engine2: &mut dyn Engine,
    ) -> MatchResult {
        self.run_report(engine1, engine2).await.result
    }

    /// Run a match and keep the per-game records
    pub async fn run_report(
        &self,
        engine1: &mut dyn Engine,
        engine2: &mut dyn Engine,
    ) -> MatchReport {
        let mut report = MatchReport::new(engine1.name(), engine2.name(), self.config.clone());

        for game_num in 0..self.config.num_games {
            // Alternate colors if configured
            let engine1_white = !self.config.alternate_colors || game_num % 2 == 0;

            let record = if engine1_white {
                self.play_game(game_num + 1, Side::White, engine1, engine2).await
            } else {
                self.play_game(game_num + 1, Side::Red, engine2, engine1).await
            };

            info!(
                game = record.game,
                of = self.config.num_games,
                side = %record.engine1_side,
                result = ?record.result(),
                plies = record.plies,
                "game finished"
            );
            report.add_game(record);
        }

        report
    }

    /// Play a single game with `white` and `red` on separate sessions
    async fn play_game(
        &self,
        game: u32,
        engine1_side: Side,
        white: &mut dyn Engine,
        red: &mut dyn Engine,
    ) -> GameRecord {
        let room = RoomId::new(format!("game-{game}"));
        let (relay, white_link, red_link) =
            LoopbackRelay::new(room, self.config.relay_config());

        let (white_end, red_end, relayed) = tokio::join!(
            run_peer(GameSession::new(self.config.session.clone()), white, white_link),
            run_peer(GameSession::new(self.config.session.clone()), red, red_link),
            relay.run(),
        );

        let mut record = GameRecord {
            game,
            engine1_side,
            winner: relayed.outcome.map(|o| o.winner),
            reason: relayed.outcome.map(|o| o.reason),
            plies: relayed.plies,
            adjourned: relayed.adjourned,
            desync: false,
        };

        match (white_end, red_end) {
            (Ok(white_end), Ok(red_end)) => {
                let seen = (white_end.state().outcome(), red_end.state().outcome());
                let agreed = match seen {
                    (Some(w), Some(r)) => {
                        w.winner == r.winner && white_end.board() == red_end.board()
                    }
                    (None, None) => true,
                    _ => false,
                };
                if let Some(outcome) = seen.0.or(seen.1) {
                    record.winner = Some(outcome.winner);
                    record.reason = Some(outcome.reason);
                    record.adjourned = false;
                }
                if !agreed {
                    warn!(game, "peers disagree about the final position");
                    record.desync = true;
                }
            }
            (white_end, red_end) => {
                for (side, end) in [(Side::White, white_end), (Side::Red, red_end)] {
                    if let Err(err) = end {
                        warn!(game, %side, error = %err, "peer stopped with an error");
                    }
                }
                record.desync = true;
            }
        }

        record
    }
}

/// Quick utility to run a single match
pub async fn quick_match(
    engine1: &mut dyn Engine,
    engine2: &mut dyn Engine,
    num_games: u32,
) -> MatchResult {
    let config = MatchConfig {
        num_games,
        ..Default::default()
    };
    let runner = MatchRunner::new(config);
    runner.run_match(engine1, engine2).await
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
