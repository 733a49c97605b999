//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PLATTER_STORE_NAME="Spice Route"                                   │
//! │     PLATTER_LOCK_CART_DURING_SUBMISSION=false                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/platter/platter.toml (Linux)                             │
//! │     ~/Library/Application Support/com.platter.storefront/platter.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Spice Route"
//! currency_symbol = "₹"
//! currency_decimals = 2
//! database_path = "/var/lib/platter/platter.db"
//!
//! [cart]
//! lock_during_submission = true
//! ```
//!
//! Read-only after initialization, so no lock around it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Largest supported number of currency decimals.
const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Configuration load and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Cart Store behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Reject cart mutations while an order write is in flight.
    ///
    /// When false, a mutation made during submission is applied and then
    /// wiped by the clear that follows a successful write.
    #[serde(default = "default_true")]
    pub lock_during_submission: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            lock_during_submission: true,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Store name (shown on the order summary)
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Currency symbol (for display)
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Number of decimal places for currency
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,

    /// Document store file. `None` means the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default)]
    pub cart: CartSettings,
}

fn default_store_name() -> String {
    "Platter".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store_name: default_store_name(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
            database_path: None,
            cart: CartSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Load Order
    /// 1. Defaults
    /// 2. Config file (`platter.toml`), explicit path or platform default
    /// 3. Environment overrides (`PLATTER_*`)
    /// 4. Validation
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> Result<(), ConfigError> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Invalid("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS, self.currency_decimals
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("PLATTER_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Ok(symbol) = std::env::var("PLATTER_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Ok(decimals) = std::env::var("PLATTER_CURRENCY_DECIMALS") {
            match decimals.parse() {
                Ok(d) => self.currency_decimals = d,
                Err(_) => warn!(value = %decimals, "Ignoring invalid PLATTER_CURRENCY_DECIMALS"),
            }
        }

        if let Ok(path) = std::env::var("PLATTER_DATABASE_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Ok(lock) = std::env::var("PLATTER_LOCK_CART_DURING_SUBMISSION") {
            match lock.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cart.lock_during_submission = true,
                "0" | "false" | "no" | "off" => self.cart.lock_during_submission = false,
                other => warn!(value = %other, "Ignoring invalid PLATTER_LOCK_CART_DURING_SUBMISSION"),
            }
        }
    }

    /// Returns the platform config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "platter", "storefront")
            .map(|dirs| dirs.config_dir().join("platter.toml"))
    }

    /// Resolves the document store path.
    ///
    /// Uses `database_path` when set, otherwise `platter.db` in the platform
    /// data directory (created if missing).
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = directories::ProjectDirs::from("com", "platter", "storefront")
            .ok_or_else(|| ConfigError::Invalid("Could not determine app data directory".into()))?;

        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("platter.db"))
    }

    /// Formats a minor-unit amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(24900), "₹249.00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.currency_decimals, 2);
        assert!(config.cart.lock_during_submission);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(24900), "₹249.00");
        assert_eq!(config.format_currency(1), "₹0.01");
        assert_eq!(config.format_currency(0), "₹0.00");
        assert_eq!(config.format_currency(-1234), "-₹12.34");
    }

    #[test]
    fn test_format_currency_without_decimals() {
        let config = AppConfig {
            currency_decimals: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.format_currency(249), "₹249");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            store_name = "Spice Route"

            [cart]
            lock_during_submission = false
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Spice Route");
        assert_eq!(config.currency_symbol, "₹");
        assert!(!config.cart.lock_during_submission);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AppConfig {
            store_name: "  ".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = AppConfig {
            currency_decimals: 9,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!("platter-{}.toml", uuid::Uuid::new_v4()));
        let config = AppConfig {
            store_name: "Tandoor House".to_string(),
            database_path: Some(PathBuf::from("/tmp/tandoor.db")),
            ..AppConfig::default()
        };

        config.save(Some(path.clone())).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: AppConfig = toml::from_str(&contents).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }
}
