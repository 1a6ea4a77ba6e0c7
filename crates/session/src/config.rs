//! Session settings, loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chess_core::Color;
use heuristic_engine::Difficulty;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for a [`GameSession`](crate::GameSession).
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// difficulty = "hard"
/// human_color = "black"
/// thinking_min_ms = 200
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Difficulty used by [`reset_game`](crate::GameSession::reset_game)
    /// until `start_game` picks another.
    pub difficulty: Difficulty,
    pub human_color: Color,
    /// Pause between the human's move and the opponent starting to think.
    pub opponent_delay_ms: u64,
    pub thinking_min_ms: u64,
    /// Extra thinking time, drawn uniformly from `[0, thinking_jitter_ms)`.
    pub thinking_jitter_ms: u64,
    /// Pause before the end of the game is announced.
    pub terminal_delay_ms: u64,
    /// Seeds both the opponent and its thinking time. Unset means entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            human_color: Color::White,
            opponent_delay_ms: 500,
            thinking_min_ms: 1000,
            thinking_jitter_ms: 1500,
            terminal_delay_ms: 500,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Same settings with every delay set to zero.
    pub fn without_delays(self) -> Self {
        Self {
            opponent_delay_ms: 0,
            thinking_min_ms: 0,
            thinking_jitter_ms: 0,
            terminal_delay_ms: 0,
            ..self
        }
    }

    pub fn opponent_color(&self) -> Color {
        self.human_color.other()
    }

    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    pub fn terminal_delay(&self) -> Duration {
        Duration::from_millis(self.terminal_delay_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
