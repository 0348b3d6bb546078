//! Application configuration loaded from TOML.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{LedgerConfig, SettlementGuard};

/// Application configuration.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `accounts.json` and `history.json`.
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,

    /// Rating of newly created accounts.
    #[serde(default = "default_rating")]
    default_rating: u32,

    /// Minimum rating after any settlement.
    #[serde(default = "default_rating_floor")]
    rating_floor: u32,

    /// Loss divisor / gain factor for premium tiers.
    #[serde(default = "default_premium_multiplier")]
    premium_multiplier: u32,

    /// Double-settlement guard.
    #[serde(default)]
    settlement_guard: SettlementGuard,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".wager_games")
}

fn default_rating() -> u32 {
    100
}

fn default_rating_floor() -> u32 {
    1
}

fn default_premium_multiplier() -> u32 {
    2
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_rating: default_rating(),
            rating_floor: default_rating_floor(),
            premium_multiplier: default_premium_multiplier(),
            settlement_guard: SettlementGuard::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(data_dir = %config.data_dir.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the data directory (from the command line).
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.premium_multiplier == 0 {
            return Err(ConfigError::new(
                "premium_multiplier must be at least 1".to_string(),
            ));
        }
        if self.default_rating < self.rating_floor {
            return Err(ConfigError::new(format!(
                "default_rating {} is below rating_floor {}",
                self.default_rating, self.rating_floor
            )));
        }
        Ok(())
    }

    /// Rules handed to the ledger.
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig::default()
            .with_default_rating(self.default_rating)
            .with_rating_floor(self.rating_floor)
            .with_premium_multiplier(self.premium_multiplier)
            .with_settlement_guard(self.settlement_guard)
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
    fn test_empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").expect("parse");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.ledger_config(), LedgerConfig::default());
    }

    #[test]
    fn test_overrides_apply() {
        let config = AppConfig::from_toml(
            r#"
            data_dir = "/tmp/wager"
            rating_floor = 0
            premium_multiplier = 3
            settlement_guard = "per_account"
            "#,
        )
        .expect("parse");
        let ledger = config.ledger_config();
        assert_eq!(*ledger.rating_floor(), 0);
        assert_eq!(*ledger.premium_multiplier(), 3);
        assert_eq!(*ledger.settlement_guard(), SettlementGuard::PerAccount);
        assert_eq!(config.data_dir(), &PathBuf::from("/tmp/wager"));
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        let err = AppConfig::from_toml("premium_multiplier = 0").unwrap_err();
        assert!(err.message.contains("premium_multiplier"));
    }

    #[test]
    fn test_default_below_floor_rejected() {
        assert!(AppConfig::from_toml("default_rating = 0\nrating_floor = 1").is_err());
    }
}
