//! Strictly Games - Unified CLI
//!
//! Self-play matches and move listings on top of the backgammon engine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_backgammon::{
    PerPlayer, all_legal_turns, constrained_moves, create_initial_state, roll, roll_dice,
};
use strictly_games::{MatchConfig, StrategyKind, play_match, strategy_for};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Selfplay {
            config,
            seed,
            match_length,
            strategy,
            json,
        } => {
            let config = load_config(&config)?
                .with_seed(seed)
                .with_match_length(match_length)
                .with_strategy(strategy);
            init_tracing(config.log_filter());
            run_selfplay(&config, json)
        }
        Command::Moves { dice } => {
            init_tracing("info");
            run_moves(&dice)
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the config file, falling back to defaults when it does not exist.
fn load_config(path: &Path) -> Result<MatchConfig> {
    if !path.exists() {
        return Ok(MatchConfig::default());
    }
    MatchConfig::from_file(path).with_context(|| format!("loading {}", path.display()))
}

/// Play a match between two computer strategies
#[instrument(skip_all, fields(match_length = config.match_length(), strategy = %config.strategy()))]
fn run_selfplay(config: &MatchConfig, json: bool) -> Result<()> {
    let seed = (*config.seed()).unwrap_or_else(rand::random);
    let config = config.clone().with_seed(Some(seed));
    info!(seed, "Starting self-play match");

    let kind: StrategyKind = *config.strategy();
    let players = PerPlayer::new(
        strategy_for(kind, seed.wrapping_add(1)),
        strategy_for(kind, seed.wrapping_add(2)),
    );
    let summary = play_match(&config, players)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for (number, game) in summary.games.iter().enumerate() {
        println!(
            "Game {}: {} wins {} for {} point(s) in {} turns",
            number + 1,
            game.winner,
            game.win_type,
            game.points,
            game.turns
        );
    }
    println!(
        "{} wins the match {}-{} (seed {})",
        summary.winner, summary.score.gold, summary.score.red, seed
    );
    Ok(())
}

/// List the allowed moves from the opening position
#[instrument]
fn run_moves(dice: &[u8]) -> Result<()> {
    let [a, b] = dice else {
        anyhow::bail!("expected exactly two dice");
    };
    let state = roll(&create_initial_state(), roll_dice(Some((*a, *b))))?;
    let moves = constrained_moves(&state);
    if moves.is_empty() {
        warn!("No legal move for this roll");
    }

    println!("{} to play {}-{}", state.current_player(), a, b);
    println!("Allowed first moves:");
    for mv in &moves {
        println!("  {}", mv);
    }
    println!("Complete turns:");
    for turn in all_legal_turns(&state) {
        let line: Vec<String> = turn.iter().map(ToString::to_string).collect();
        println!("  {}", line.join(" "));
    }
    Ok(())
}
