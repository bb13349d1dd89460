//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`ecofinds.toml` in the platform config directory)
//! 3. Environment variables (`ECOFINDS_*`)
//!
//! ```toml
//! # ecofinds.toml
//! currency = "INR"
//! usd_to_inr_rate = 8312   # hundredths: 83.12 rupees per dollar
//! tax_rate_bps = 800       # 8%
//! seed_catalog = true
//! data_dir = "/tmp/ecofinds"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use ecofinds_core::{
    Currency, CurrencyFormatter, Money, TaxRate, UsdToInrRate, DEFAULT_TAX_RATE_BPS,
};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "ecofinds.toml";

/// Configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the app data directory")]
    NoDataDir,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Initial display currency.
    pub currency: Currency,

    /// Rupees per dollar in hundredths (8312 = 83.12).
    pub usd_to_inr_rate: u32,

    /// Checkout tax rate in basis points (800 = 8%).
    pub tax_rate_bps: u32,

    /// Where the session file lives. Platform data dir when unset.
    pub data_dir: Option<PathBuf>,

    /// Start with the demo listings.
    pub seed_catalog: bool,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            currency: Currency::Usd,
            usd_to_inr_rate: UsdToInrRate::DEFAULT.hundredths(),
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            data_dir: None,
            seed_catalog: true,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; an unparseable one is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks the values that would break formatting or checkout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.usd_to_inr_rate == 0 {
            return Err(ConfigError::Invalid(
                "usd_to_inr_rate must be greater than 0".into(),
            ));
        }

        if self.usd_to_inr_rate > UsdToInrRate::MAX.hundredths() {
            return Err(ConfigError::Invalid(format!(
                "usd_to_inr_rate must be at most {}, got {}",
                UsdToInrRate::MAX.hundredths(),
                self.usd_to_inr_rate
            )));
        }

        if self.tax_rate_bps > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "tax_rate_bps must be at most 10000, got {}",
                self.tax_rate_bps
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `ECOFINDS_*` overrides read through `lookup`.
    ///
    /// ## Variables
    /// - `ECOFINDS_CURRENCY`: `USD` or `INR`
    /// - `ECOFINDS_USD_TO_INR_RATE`: decimal rate, e.g. `83.12`
    /// - `ECOFINDS_TAX_RATE_BPS`: e.g. `800`
    /// - `ECOFINDS_DATA_DIR`: session directory
    /// - `ECOFINDS_SEED_CATALOG`: `true` / `false`
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(currency) = lookup("ECOFINDS_CURRENCY") {
            match currency.parse() {
                Ok(parsed) => self.currency = parsed,
                Err(_) => warn!(currency = %currency, "Unknown currency in environment"),
            }
        }

        if let Some(rate) = lookup("ECOFINDS_USD_TO_INR_RATE") {
            match Money::parse_decimal(&rate).map(|m| u32::try_from(m.cents())) {
                Ok(Ok(hundredths)) => {
                    debug!(hundredths, "Overriding conversion rate from environment");
                    self.usd_to_inr_rate = hundredths;
                }
                _ => warn!(rate = %rate, "Invalid conversion rate in environment"),
            }
        }

        if let Some(bps) = lookup("ECOFINDS_TAX_RATE_BPS") {
            match bps.trim().parse::<u32>() {
                Ok(parsed) => self.tax_rate_bps = parsed,
                Err(_) => warn!(bps = %bps, "Invalid tax rate in environment"),
            }
        }

        if let Some(dir) = lookup("ECOFINDS_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(seed) = lookup("ECOFINDS_SEED_CATALOG") {
            match seed.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.seed_catalog = true,
                "0" | "false" | "no" => self.seed_catalog = false,
                _ => warn!(seed = %seed, "Invalid seed flag in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Directory for the session file, created if missing.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.ecofinds.marketplace`
    /// - **Windows**: `%APPDATA%\ecofinds\marketplace\data`
    /// - **Linux**: `~/.local/share/marketplace`
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or(ConfigError::NoDataDir)?,
        };

        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    pub fn formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter::new(
            self.currency,
            UsdToInrRate::from_hundredths(self.usd_to_inr_rate),
        )
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "ecofinds", "marketplace")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.usd_to_inr_rate, 8312);
        assert_eq!(config.tax_rate().bps(), 800);
        assert!(config.seed_catalog);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_partial_file() {
        let config = ConfigState::from_toml_str("currency = \"INR\"\nseed_catalog = false\n").unwrap();
        assert_eq!(config.currency, Currency::Inr);
        assert!(!config.seed_catalog);
        assert_eq!(config.tax_rate_bps, 800);
    }

    #[test]
    fn test_toml_rejects_bad_types() {
        assert!(matches!(
            ConfigState::from_toml_str("tax_rate_bps = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[
            ("ECOFINDS_CURRENCY", "inr"),
            ("ECOFINDS_USD_TO_INR_RATE", "80.5"),
            ("ECOFINDS_TAX_RATE_BPS", "0"),
            ("ECOFINDS_SEED_CATALOG", "no"),
            ("ECOFINDS_DATA_DIR", "/tmp/eco"),
        ]));

        assert_eq!(config.currency, Currency::Inr);
        assert_eq!(config.usd_to_inr_rate, 8050);
        assert_eq!(config.tax_rate_bps, 0);
        assert!(!config.seed_catalog);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/eco")));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[
            ("ECOFINDS_CURRENCY", "EUR"),
            ("ECOFINDS_USD_TO_INR_RATE", "lots"),
            ("ECOFINDS_TAX_RATE_BPS", "-5"),
        ]));
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_validate() {
        let zero_rate = ConfigState {
            usd_to_inr_rate: 0,
            ..ConfigState::default()
        };
        assert!(matches!(zero_rate.validate(), Err(ConfigError::Invalid(_))));

        let huge_tax = ConfigState {
            tax_rate_bps: 10_001,
            ..ConfigState::default()
        };
        assert!(huge_tax.validate().is_err());

        let huge_rate = ConfigState {
            usd_to_inr_rate: u32::MAX,
            ..ConfigState::default()
        };
        assert!(matches!(huge_rate.validate(), Err(ConfigError::Invalid(_))));

        let max_rate = ConfigState {
            usd_to_inr_rate: 1_000_000,
            ..ConfigState::default()
        };
        assert!(max_rate.validate().is_ok());
    }

    #[test]
    fn test_oversized_rate_in_file_is_rejected() {
        let dir = std::env::temp_dir().join(format!("ecofinds-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "currency = \"INR\"\nusd_to_inr_rate = 4294967295\n").unwrap();

        let result = ConfigState::load(Some(path));
        std::fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = std::env::temp_dir().join(format!("ecofinds-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "usd_to_inr_rate = 9000\n").unwrap();

        let config = ConfigState::load(Some(path)).unwrap();
        assert_eq!(config.formatter().rate.hundredths(), 9000);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_resolve_data_dir_creates_override() {
        let dir = std::env::temp_dir().join(format!("ecofinds-data-{}", uuid::Uuid::new_v4()));
        let config = ConfigState {
            data_dir: Some(dir.clone()),
            ..ConfigState::default()
        };

        assert_eq!(config.resolve_data_dir().unwrap(), dir);
        assert!(dir.is_dir());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
