//! Match configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// How the self-play driver picks among the allowed moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StrategyKind {
    /// Uniformly random allowed move.
    #[default]
    Random,
    /// Always the first allowed move.
    First,
}

/// Configuration for a hosted match.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Points needed to win the match.
    #[serde(default = "default_match_length")]
    match_length: u32,

    /// Seed for the dice; `None` draws one from the OS.
    #[serde(default)]
    seed: Option<u64>,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Move picker for self-play.
    #[serde(default)]
    strategy: StrategyKind,

    /// Whether players offer doubles during self-play.
    #[serde(default)]
    use_cube: bool,
}

#[instrument]
fn default_match_length() -> u32 {
    5
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl MatchConfig {
    /// Creates a configuration with defaults for everything but the length.
    #[instrument]
    pub fn new(match_length: u32) -> Self {
        Self {
            match_length,
            seed: None,
            log_filter: default_log_filter(),
            strategy: StrategyKind::default(),
            use_cube: false,
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(match_length = config.match_length, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        if config.match_length == 0 {
            return Err(ConfigError::new("match_length must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Overrides the match length.
    pub fn with_match_length(mut self, match_length: Option<u32>) -> Self {
        if let Some(length) = match_length {
            self.match_length = length.max(1);
        }
        self
    }

    /// Overrides the strategy.
    pub fn with_strategy(mut self, strategy: Option<StrategyKind>) -> Self {
        if let Some(strategy) = strategy {
            self.strategy = strategy;
        }
        self
    }

    /// Turns doubling on or off for self-play.
    pub fn with_use_cube(mut self, use_cube: bool) -> Self {
        self.use_cube = use_cube;
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(default_match_length())
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
    fn test_defaults_fill_missing_fields() {
        let config = MatchConfig::from_toml("").unwrap();
        assert_eq!(*config.match_length(), 5);
        assert_eq!(*config.seed(), None);
        assert_eq!(config.log_filter(), "info");
        assert_eq!(*config.strategy(), StrategyKind::Random);
        assert!(!*config.use_cube());
    }

    #[test]
    fn test_parses_all_fields() {
        let config = MatchConfig::from_toml(
            r#"
            match_length = 11
            seed = 99
            log_filter = "debug"
            strategy = "first"
            use_cube = true
            "#,
        )
        .unwrap();
        assert_eq!(*config.match_length(), 11);
        assert_eq!(*config.seed(), Some(99));
        assert_eq!(*config.strategy(), StrategyKind::First);
        assert!(*config.use_cube());
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = MatchConfig::from_toml("match_length = 0").unwrap_err();
        assert!(err.message.contains("at least 1"));
    }

    #[test]
    fn test_overrides() {
        let config = MatchConfig::default()
            .with_seed(Some(3))
            .with_match_length(Some(9))
            .with_strategy(None)
            .with_use_cube(true);
        assert!(*config.use_cube());
        assert_eq!(*config.seed(), Some(3));
        assert_eq!(*config.match_length(), 9);
        assert_eq!(*config.strategy(), StrategyKind::Random);
    }
}
