//! Match Runner for checkers bots
//!
//! This crate provides infrastructure for:
//! - Running matches between two bots, each on its own peer session
//! - Detecting games where the two peers' boards drifted apart
//! - Writing per-game reports as JSON
//!
//! # Usage
//!
//! ```bash
//! # Run a seeded 20-game match, adjourning games after 300 jumps
//! cargo run -p tournament -- --games 20 --max-plies 300 --seed 7
//!
//! # Take settings from a file and save the report
//! cargo run -p tournament -- --config match.toml --output report.json
//! ```

mod match_runner;
mod results;

pub use match_runner::*;
pub use results::*;
