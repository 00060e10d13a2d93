//! Development tasks for the game agent
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Predict, Replay};

/// Development tasks for the game agent
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the game agent", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run the default agent against a recorded world packet
    Replay(Replay),

    /// Print the predicted ball path of a recorded world packet
    Predict(Predict),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for AGENT_* and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay(cmd) => cmd.execute(),
        Command::Predict(cmd) => cmd.execute(),
    }
}
