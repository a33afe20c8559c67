//! Command-line interface for the tic-tac-toe console.

use clap::Parser;
use std::path::PathBuf;
use tictactoe_machine::{ConfigError, GameConfig};
use tracing::instrument;

/// Tic-tac-toe in the terminal, with resumable games and a computer opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board side length (overrides the config file)
    #[arg(long)]
    pub size: Option<usize>,

    /// Computer thinking delay in milliseconds (overrides the config file)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Directory where the in-progress game is saved (overrides the config file)
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Seed for the computer opponent, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Builds the game config from the optional file plus flag overrides.
    #[instrument(skip(self))]
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(size) = self.size {
            config = config.with_board_size(size);
        }
        if let Some(delay_ms) = self.delay_ms {
            config = config.with_computer_delay_ms(delay_ms);
        }
        if let Some(dir) = &self.store_dir {
            config = config.with_storage_dir(dir.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
