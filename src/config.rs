//! Game and series configuration.
//!
//! Both structs carry defaults for every field so a JSON config file only
//! needs to name the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::strategy::HoldStrategy;

/// Fewest players a game can be constructed with.
pub const MIN_PLAYERS: usize = 2;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Table setup for a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of players, at least [`MIN_PLAYERS`].
    pub players: usize,
    /// Number of dice on the table.
    pub dice: usize,
    /// Rolls each player may make per turn.
    pub max_rolls: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            players: 2,
            dice: 5,
            max_rolls: 3,
        }
    }
}

impl GameConfig {
    /// Checks the player count. Dice and roll counts are taken as given.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.players < MIN_PLAYERS {
            return Err(GameError::InvalidConfiguration(format!(
                "need at least {} players, got {}",
                MIN_PLAYERS, self.players
            )));
        }
        Ok(())
    }
}

/// Configuration for simulating a series of matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// Table setup used by every match.
    pub game: GameConfig,
    /// Rounds played per match.
    pub rounds: usize,
    /// Number of independent matches.
    pub num_matches: usize,
    /// How the automated players hold dice.
    pub strategy: HoldStrategy,
    /// Worker threads; 1 plays matches sequentially.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-match progress logging.
    pub quiet: bool,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        SeriesConfig {
            game: GameConfig::default(),
            rounds: 5,
            num_matches: 10,
            strategy: HoldStrategy::default(),
            threads: 1,
            seed: 0,
            quiet: false,
        }
    }
}

impl SeriesConfig {
    /// Parses a series configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a series configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
