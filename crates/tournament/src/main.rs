//! Match CLI
//!
//! Plays two random bots against each other through the loopback relay and
//! reports how the games went.

use anyhow::Context;
use clap::Parser;
use random_engine::RandomEngine;
use std::path::PathBuf;
use tournament::{MatchConfig, MatchRunner};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[clap(name = "checkers-match", about = "Run a checkers match between two bots")]
struct Arguments {
    /// TOML file with match settings; flags below override it
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Number of games to play
    #[clap(short, long)]
    games: Option<u32>,

    /// Relayed jumps before a game is adjourned
    #[clap(short, long)]
    max_plies: Option<u32>,

    /// Seed for both bots
    #[clap(short, long)]
    seed: Option<u64>,

    /// Write the match report as JSON
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl Arguments {
    fn match_config(&self) -> anyhow::Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::load(path)?,
            None => MatchConfig::default(),
        };
        if let Some(games) = self.games {
            config.num_games = games;
        }
        if let Some(plies) = self.max_plies {
            config.max_plies = Some(plies);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("tournament=info".parse()?))
        .init();

    let arguments = Arguments::parse();
    let config = arguments.match_config()?;

    let (mut engine1, mut engine2) = match config.seed {
        Some(seed) => (
            RandomEngine::with_seed(seed),
            RandomEngine::with_seed(seed.wrapping_add(1)),
        ),
        None => (RandomEngine::new(), RandomEngine::new()),
    };

    tracing::info!(
        games = config.num_games,
        max_plies = ?config.max_plies,
        seed = ?config.seed,
        "match starting"
    );

    let runner = MatchRunner::new(config);
    let report = runner.run_report(&mut engine1, &mut engine2).await;
    report.print_report();

    if report.result.desyncs > 0 {
        tracing::warn!(desyncs = report.result.desyncs, "some games desynchronized");
    }

    if let Some(path) = &arguments.output {
        report
            .save(path)
            .with_context(|| format!("saving report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(())
}
