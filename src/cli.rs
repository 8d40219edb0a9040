//! Command-line interface for strictly_games.

use clap::{Parser, Subcommand};
use strictly_games::StrategyKind;

/// Strictly Games - backgammon rules engine host
#[derive(Parser, Debug)]
#[command(name = "strictly_games")]
#[command(about = "Backgammon rules engine with self-play", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a whole match between two computer strategies
    Selfplay {
        /// Path to match configuration file (defaults are used if absent)
        #[arg(short, long, default_value = "match_config.toml")]
        config: std::path::PathBuf,

        /// Seed for the dice and strategies
        #[arg(long)]
        seed: Option<u64>,

        /// Points needed to win the match
        #[arg(short, long)]
        match_length: Option<u32>,

        /// Move picker for both players (random or first)
        #[arg(long)]
        strategy: Option<StrategyKind>,

        /// Print the match summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the moves allowed from the opening position for a given roll
    Moves {
        /// The two dice, e.g. `--dice 5 2`
        #[arg(
            long,
            required = true,
            num_args = 2,
            value_names = ["DIE1", "DIE2"],
            value_parser = clap::value_parser!(u8).range(1..=6)
        )]
        dice: Vec<u8>,
    },
}
