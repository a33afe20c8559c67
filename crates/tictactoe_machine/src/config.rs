//! Game configuration loaded from TOML.

use crate::persistence::DEFAULT_STORAGE_KEY;
use crate::types::DEFAULT_BOARD_SIZE;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Largest accepted board side length.
pub const MAX_BOARD_SIZE: usize = 32;

/// Runtime settings for a game.
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Side length of the square board.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// How long the computer "thinks" before moving, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Key the in-progress session is stored under.
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// Directory of the file-backed session store.
    #[serde(default = "default_storage_dir")]
    storage_dir: PathBuf,
}

#[instrument]
fn default_board_size() -> usize {
    DEFAULT_BOARD_SIZE
}

#[instrument]
fn default_computer_delay_ms() -> u64 {
    500
}

#[instrument]
fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

#[instrument]
fn default_storage_dir() -> PathBuf {
    PathBuf::from(".tictactoe")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            computer_delay_ms: default_computer_delay_ms(),
            storage_key: default_storage_key(),
            storage_dir: default_storage_dir(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            board_size = config.board_size,
            computer_delay_ms = config.computer_delay_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks values serde cannot reject on its own.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::new("board_size must be at least 1".to_string()));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::new(format!(
                "board_size must be at most {}, got {}",
                MAX_BOARD_SIZE, self.board_size
            )));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::new("storage_key must not be empty".to_string()));
        }
        Ok(())
    }

    /// Computer thinking delay as a [`Duration`].
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = GameConfig::from_toml("").expect("empty config is valid");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.computer_delay(), Duration::from_millis(500));
        assert_eq!(config.storage_key(), "currentGame");
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = GameConfig::from_toml("board_size = 4\ncomputer_delay_ms = 0\n")
            .expect("valid config");
        assert_eq!(*config.board_size(), 4);
        assert_eq!(config.computer_delay(), Duration::ZERO);
        assert_eq!(config.storage_dir(), &PathBuf::from(".tictactoe"));
    }

    #[test]
    fn test_zero_board_rejected() {
        let err = GameConfig::from_toml("board_size = 0").expect_err("must fail");
        assert!(err.message.contains("board_size"));
    }

    #[test]
    fn test_oversized_board_rejected() {
        let err = GameConfig::from_toml("board_size = 1000000").expect_err("must fail");
        assert!(err.message.contains("at most 32"));

        let largest = GameConfig::default().with_board_size(MAX_BOARD_SIZE);
        assert!(largest.validate().is_ok());
        assert!(largest.with_board_size(MAX_BOARD_SIZE + 1).validate().is_err());
    }

    #[test]
    fn test_setters_chain() {
        let config = GameConfig::default()
            .with_board_size(5)
            .with_storage_key("slot".to_string());
        assert_eq!(*config.board_size(), 5);
        assert_eq!(config.storage_key(), "slot");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "storage_dir = \"saves\"\n").expect("write");

        let config = GameConfig::from_file(&path).expect("load");
        assert_eq!(config.storage_dir(), &PathBuf::from("saves"));
        assert!(GameConfig::from_file(dir.path().join("missing.toml")).is_err());
    }
}
