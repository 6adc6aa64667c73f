//! Match results storage and reporting

use anyhow::Context;
use checkers_core::{EndReason, Side};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::match_runner::MatchConfig;

/// Result of a single game from engine1's perspective
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Games where the two peers disagreed about the board or the outcome.
    /// These are also counted in wins/losses/draws.
    pub desyncs: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// How one game of a match went.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    pub game: u32,
    /// Side engine1 played.
    pub engine1_side: Side,
    pub winner: Option<Side>,
    pub reason: Option<EndReason>,
    /// Jumps relayed; each step of a combo counts.
    pub plies: u32,
    pub adjourned: bool,
    pub desync: bool,
}

impl GameRecord {
    pub fn result(&self) -> GameResult {
        match self.winner {
            Some(side) if side == self.engine1_side => GameResult::Win,
            Some(_) => GameResult::Loss,
            None => GameResult::Draw,
        }
    }
}

/// Complete match report, written to disk after a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub engine1: String,
    pub engine2: String,
    pub config: MatchConfig,
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

impl MatchReport {
    pub fn new(engine1: &str, engine2: &str, config: MatchConfig) -> Self {
        Self {
            engine1: engine1.to_string(),
            engine2: engine2.to_string(),
            config,
            result: MatchResult::new(),
            games: Vec::new(),
        }
    }

    /// Add a finished game and fold it into the totals
    pub fn add_game(&mut self, record: GameRecord) {
        self.result.record(record.result());
        if record.desync {
            self.result.desyncs += 1;
        }
        self.games.push(record);
    }

    /// Save report to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Load report from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Match: {} vs {} ===\n\n",
            self.engine1, self.engine2
        ));
        report.push_str(&format!(
            "{:<6} {:<7} {:<8} {:<14} {:>6}\n",
            "Game", "Side", "Result", "Reason", "Plies"
        ));
        report.push_str(&"-".repeat(45));
        report.push('\n');

        for game in &self.games {
            let result = match game.result() {
                GameResult::Win => "1-0",
                GameResult::Loss => "0-1",
                GameResult::Draw => "1/2",
            };
            let reason = match (game.reason, game.adjourned) {
                (Some(reason), _) => reason.as_str(),
                (None, true) => "adjourned",
                (None, false) => "-",
            };
            let flag = if game.desync { " desync" } else { "" };
            report.push_str(&format!(
                "{:<6} {:<7} {:<8} {:<14} {:>6}{}\n",
                game.game, game.engine1_side, result, reason, game.plies, flag
            ));
        }

        report.push_str(&format!(
            "\n{}: {} wins, {} losses, {} draws ({} desynced)\nScore: {:.1}%\n",
            self.engine1,
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.desyncs,
            self.result.score() * 100.0
        ));
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
