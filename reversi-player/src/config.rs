//! The player's configuration file.
//!
//! ```toml
//! [game]
//! black = "human"
//! white = "alphabeta"
//! delay_ms = 500
//!
//! [search]
//! max_depth = 7
//! time_limit_ms = 2000
//!
//! [search.weights]
//! corner = 30.0
//! ```

use crate::strategy::StrategyKind;
use derive_more::{Display, Error, From};
use reversi_search::{InvalidConfigurationError, SearchConfig};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use std::{fs, io};

/// Who plays and how the game is shown.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub black: StrategyKind,
    pub white: StrategyKind,
    /// Seed for random strategies. Drawn from the OS when absent.
    pub seed: Option<u64>,
    #[serde(rename = "delay_ms", deserialize_with = "millis")]
    pub delay: Duration,
    /// Print only the result.
    pub quiet: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            black: StrategyKind::Human,
            white: StrategyKind::AlphaBeta,
            seed: None,
            delay: Duration::ZERO,
            quiet: false,
        }
    }
}

fn millis<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    Ok(Duration::from_millis(u64::deserialize(deserializer)?))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub game: GameConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Display, Error, From)]
pub enum ConfigError {
    #[display(fmt = "could not read config: {}", _0)]
    Io(io::Error),
    #[display(fmt = "could not parse config: {}", _0)]
    Parse(toml::de::Error),
    #[display(fmt = "invalid config: {}", _0)]
    Invalid(InvalidConfigurationError),
}

impl Config {
    /// Parse and validate a configuration.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.search.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml(&fs::read_to_string(path)?)
    }
}
