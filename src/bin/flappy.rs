//! flappy CLI - Train and study a tabular Q-learning agent
//!
//! This CLI provides a unified interface for:
//! - Training an agent over many generations, optionally resuming a table
//! - Evaluating a saved table greedily without learning
//! - Inspecting the policy a table has learned

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flappy")]
#[command(version, about = "Q-learning agent for a pipe-dodging game", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent
    Train(Box<flappy_ql::cli::commands::train::TrainArgs>),

    /// Evaluate a saved Q-table without learning
    Evaluate(flappy_ql::cli::commands::evaluate::EvaluateArgs),

    /// Show the policy stored in a Q-table
    Inspect(flappy_ql::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    flappy_ql::logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Train(args) => flappy_ql::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => flappy_ql::cli::commands::evaluate::execute(args),
        Commands::Inspect(args) => flappy_ql::cli::commands::inspect::execute(args),
    }
}
