//! Tic-tac-toe console
//!
//! Terminal front-end for the game state machine.

#![warn(missing_docs)]

mod cli;
mod console;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use rand::{SeedableRng, rngs::StdRng};
use tictactoe_machine::{FileStore, GameMachine, GameRuntime, PersistenceGateway};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    info!(?config, "Starting tic-tac-toe console");

    let gateway = PersistenceGateway::with_key(
        FileStore::new(config.storage_dir()),
        config.storage_key().clone(),
    );
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let machine = GameMachine::new(gateway, rng, &config);
    let (handle, task) = GameRuntime::spawn(machine);

    console::run(handle).await?;
    task.await?;

    info!("Goodbye");
    Ok(())
}
