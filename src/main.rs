//! Sylva CLI - Command-line interface for playing and inspecting forest games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sylva - A deterministic hex forest game simulator
#[derive(Parser, Debug)]
#[command(name = "sylva")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single game between two policies
    Run {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Policy for player 0
        #[arg(long, default_value = "greedy")]
        p0: cli::PolicyArg,

        /// Policy for player 1
        #[arg(long, default_value = "random")]
        p1: cli::PolicyArg,

        /// Stop after this many rounds (1-24)
        #[arg(short, long, default_value = "24")]
        rounds: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save the final position to a JSON file
        #[arg(long)]
        save: Option<std::path::PathBuf>,

        /// Suppress the header
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run mass parallel games and aggregate statistics
    Tournament {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Policy for player 0
        #[arg(long, default_value = "greedy")]
        p0: cli::PolicyArg,

        /// Policy for player 1
        #[arg(long, default_value = "random")]
        p1: cli::PolicyArg,

        /// Stop each game after this many rounds (1-24)
        #[arg(short, long, default_value = "24")]
        rounds: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Load a position file and list the legal moves
    Inspect {
        /// Position file (.json)
        #[arg(required = true)]
        position: std::path::PathBuf,

        /// Only list moves for this player (0 or 1)
        #[arg(short, long)]
        player: Option<u8>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Run {
            seed,
            p0,
            p1,
            rounds,
            format,
            save,
            quiet,
        } => cli::run::execute(seed, [p0.into(), p1.into()], rounds, format, save, quiet),

        Commands::Tournament {
            games,
            seed,
            threads,
            p0,
            p1,
            rounds,
            format,
            progress,
        } => cli::tournament::execute(
            games,
            seed,
            threads,
            [p0.into(), p1.into()],
            rounds,
            format,
            progress,
        ),

        Commands::Inspect { position, player } => cli::inspect::execute(&position, player),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
