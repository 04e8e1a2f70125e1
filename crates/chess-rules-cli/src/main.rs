//! `chess-rules` - developer tool for the chess rules engine.
//!
//! Runs perft from the starting position and plays random games through the
//! checked game API.

use anyhow::Context;
use chess_rules::{perft, perft_divide, Position};
use chess_rules_cli::config::RulesConfig;
use chess_rules_cli::selfplay::{play_random_game, Outcome};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "chess-rules")]
#[command(about = "Chess rules engine developer tool")]
struct Cli {
    /// Path to the configuration file [default: chess-rules.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count leaf nodes of the legal move tree from the starting position
    Perft {
        /// Search depth
        #[arg(short, long)]
        depth: Option<u32>,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Play a game of random legal moves
    Play {
        /// Seed for the move picker
        #[arg(short, long)]
        seed: Option<u64>,
        /// Stop after this many half-moves
        #[arg(long)]
        max_plies: Option<u32>,
        /// Print the game record as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = RulesConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Perft { depth, divide } => {
            let depth = depth.unwrap_or(config.perft.depth);
            let position = Position::startpos();
            tracing::info!(depth, divide, "running perft");

            let start = Instant::now();
            let nodes = if divide {
                let results = perft_divide(&position, depth);
                for (mv, count) in &results {
                    println!("{}: {}", mv, count);
                }
                println!();
                results.iter().map(|(_, n)| n).sum()
            } else {
                perft(&position, depth)
            };
            let elapsed = start.elapsed();

            println!("Nodes searched: {}", nodes);
            println!("Time: {:.3}s", elapsed.as_secs_f64());
            if elapsed.as_secs_f64() > 0.0 {
                println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64());
            }
        }

        Commands::Play {
            seed,
            max_plies,
            json,
        } => {
            let seed = seed.or(config.play.seed).unwrap_or_else(rand::random);
            let max_plies = max_plies.unwrap_or(config.play.max_plies);
            let record = play_random_game(seed, max_plies)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
                return Ok(());
            }

            println!("Seed: {}", seed);
            for pair in record.moves.chunks(2) {
                let number = (pair[0].ply + 1) / 2;
                let line: Vec<&str> = pair.iter().map(|p| p.mv.as_str()).collect();
                println!("{:>3}. {}", number, line.join(" "));
            }
            println!();
            for row in &record.final_board {
                println!("{}", row);
            }
            println!();
            match record.outcome {
                Outcome::Checkmate { winner } => println!("Checkmate, {} wins", winner),
                Outcome::Stalemate => println!("Stalemate"),
                Outcome::PlyLimit => println!("Stopped after {} plies", record.moves.len()),
            }
        }
    }

    Ok(())
}
