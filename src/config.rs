//! Engine configuration
//!
//! Grid geometry, seat and clock settings handed to [`Engine::initialize`].
//! Loadable from TOML; every field except the geometry has a default.
//!
//! ```
//! use connectx::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     rows = 6
//!     columns = 7
//!     win_length = 4
//!     turn_budget_secs = 0.5
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.plays_first);
//! assert_eq!(config.soft_deadline_ratio, 0.93);
//! ```
//!
//! [`Engine::initialize`]: crate::Engine::initialize

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::DEFAULT_DEADLINE_RATIO;

/// Invalid or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("board dimensions must be non-zero, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("win length {win_length} does not fit a {rows}x{columns} board")]
    InvalidWinLength {
        win_length: usize,
        rows: usize,
        columns: usize,
    },
    #[error("turn budget must be a positive number of seconds, got {0}")]
    InvalidBudget(f64),
    #[error("soft deadline ratio must lie in (0, 1], got {0}")]
    InvalidDeadlineRatio(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub rows: usize,
    pub columns: usize,
    /// Tokens in a line needed to win (K)
    pub win_length: usize,
    #[serde(default = "default_plays_first")]
    pub plays_first: bool,
    #[serde(default = "default_budget")]
    pub turn_budget_secs: f64,
    /// Share of the budget the search may spend before it cancels itself
    #[serde(default = "default_ratio")]
    pub soft_deadline_ratio: f64,
    /// Cap on iterative deepening; `None` searches until the deadline
    #[serde(default)]
    pub max_depth: Option<u32>,
    /// Seed for hash keys and the random fallback; `None` draws from the OS
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_plays_first() -> bool {
    true
}

fn default_budget() -> f64 {
    1.0
}

fn default_ratio() -> f64 {
    DEFAULT_DEADLINE_RATIO
}

impl Default for EngineConfig {
    /// The standard 6x7 connect-four grid, playing first with one second a turn.
    fn default() -> Self {
        Self::new(6, 7, 4)
    }
}

impl EngineConfig {
    /// Geometry with default seat and clock settings.
    #[must_use]
    pub fn new(rows: usize, columns: usize, win_length: usize) -> Self {
        Self {
            rows,
            columns,
            win_length,
            plays_first: default_plays_first(),
            turn_budget_secs: default_budget(),
            soft_deadline_ratio: default_ratio(),
            max_depth: None,
            seed: None,
        }
    }

    #[must_use]
    pub fn plays_first(mut self, plays_first: bool) -> Self {
        self.plays_first = plays_first;
        self
    }

    #[must_use]
    pub fn turn_budget_secs(mut self, secs: f64) -> Self {
        self.turn_budget_secs = secs;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: Option<u32>) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.win_length == 0 || self.win_length > self.rows.max(self.columns) {
            return Err(ConfigError::InvalidWinLength {
                win_length: self.win_length,
                rows: self.rows,
                columns: self.columns,
            });
        }
        if !(self.turn_budget_secs.is_finite() && self.turn_budget_secs > 0.0) {
            return Err(ConfigError::InvalidBudget(self.turn_budget_secs));
        }
        let ratio = self.soft_deadline_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::InvalidDeadlineRatio(ratio));
        }
        Ok(())
    }
}
