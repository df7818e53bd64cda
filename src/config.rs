//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the file named by `BETSLIP_CONFIG`) and
//! deserializes into strongly-typed structs. Every section is optional;
//! missing values fall back to the defaults of the reference card.

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;

use crate::catalog::{default_fixtures, Catalog};
use crate::engine::ledger::{LedgerConfig, DEFAULT_BALANCE, DEFAULT_STAKE};
use crate::engine::session::DEFAULT_HISTORY;
use crate::types::MatchRecord;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable that overrides the config path.
pub const CONFIG_PATH_ENV: &str = "BETSLIP_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub dashboard: DashboardConfig,
    /// Catalog fixtures. Empty means the built-in card.
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub initial_balance: Decimal,
    pub default_stake: Decimal,
    /// Lower bound offered to the stake input widget.
    pub min_stake: Decimal,
    pub currency: String,
    pub notification_history: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_BALANCE,
            default_stake: DEFAULT_STAKE,
            min_stake: dec!(10),
            currency: "RUB".to_string(),
            notification_history: DEFAULT_HISTORY,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the config file: `BETSLIP_CONFIG` if set, else `config.toml`.
    pub fn path_from_env() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.session;
        if s.initial_balance < Decimal::ZERO {
            bail!("session.initial_balance must not be negative: {}", s.initial_balance);
        }
        if s.default_stake <= Decimal::ZERO {
            bail!("session.default_stake must be positive: {}", s.default_stake);
        }
        if s.min_stake <= Decimal::ZERO {
            bail!("session.min_stake must be positive: {}", s.min_stake);
        }
        Ok(())
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            initial_balance: self.session.initial_balance,
            default_stake: self.session.default_stake,
        }
    }

    /// Build the catalog from the configured matches, or the built-in card.
    pub fn catalog(&self) -> Result<Catalog> {
        let matches = if self.matches.is_empty() {
            default_fixtures()
        } else {
            self.matches.clone()
        };
        Catalog::new(matches).context("Invalid match catalog")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use crate::types::MatchStatus;

    #[test]
    fn test_load_shipped_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/", "config.toml");
        let cfg = AppConfig::load(path).unwrap();
        assert_eq!(cfg.session.initial_balance, dec!(10000));
        assert_eq!(cfg.session.default_stake, dec!(100));
        assert_eq!(cfg.session.min_stake, dec!(10));
        assert_eq!(cfg.session.notification_history, 50);
        assert_eq!(cfg.dashboard.port, 8080);
        assert_eq!(cfg.catalog().unwrap().len(), 4);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.session.initial_balance, dec!(10000));
        assert_eq!(cfg.session.default_stake, dec!(100));
        assert_eq!(cfg.session.min_stake, dec!(10));
        assert_eq!(cfg.session.currency, "RUB");
        assert!(cfg.dashboard.enabled);
        assert_eq!(cfg.dashboard.port, 8080);
        assert_eq!(cfg.catalog().unwrap().len(), 4);
    }

    #[test]
    fn test_session_overrides() {
        let cfg = AppConfig::from_toml(
            r#"
            [session]
            initial_balance = 500
            default_stake = 25
            currency = "EUR"

            [dashboard]
            enabled = false
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.session.initial_balance, dec!(500));
        assert_eq!(cfg.ledger_config().default_stake, dec!(25));
        assert_eq!(cfg.session.currency, "EUR");
        assert!(!cfg.dashboard.enabled);
        assert_eq!(cfg.dashboard.port, 9000);
    }

    #[test]
    fn test_custom_matches() {
        let cfg = AppConfig::from_toml(
            r#"
            [[matches]]
            id = 7
            home_team = "Akhmat"
            away_team = "Orenburg"
            date = "20 November"
            time = "15:00"
            odds = { home = 2, draw = 3, away = 4 }
            status = "finished"
            "#,
        )
        .unwrap();
        let catalog = cfg.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        let m = catalog.get(7).unwrap();
        assert_eq!(m.status, MatchStatus::Finished);
        assert_eq!(m.odds.away, dec!(4));
    }

    #[test]
    fn test_rejects_non_positive_default_stake() {
        let err = AppConfig::from_toml("[session]\ndefault_stake = 0").unwrap_err();
        assert!(err.to_string().contains("default_stake"));
    }

    #[test]
    fn test_rejects_negative_balance() {
        assert!(AppConfig::from_toml("[session]\ninitial_balance = -1").is_err());
    }

    #[test]
    fn test_invalid_catalog_reported() {
        let cfg = AppConfig::from_toml(
            r#"
            [[matches]]
            id = 1
            home_team = "A"
            away_team = "B"
            date = "d"
            time = "t"
            odds = { home = 0, draw = 3, away = 4 }
            status = "upcoming"
            "#,
        )
        .unwrap();
        assert!(cfg.catalog().is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(AppConfig::load("/nonexistent/betslip.toml").is_err());
    }
}
