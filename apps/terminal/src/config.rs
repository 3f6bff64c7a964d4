//! # Terminal Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PUMP_DATA_DIR=/var/lib/petrol-pump                                 │
//! │     PUMP_STATION_NAME="HP Petrol Pump"                                 │
//! │     PUMP_REQUIRE_LOGIN=true                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $PUMP_CONFIG, or                                                   │
//! │     ~/.config/petrol-pump/pump.toml (Linux)                            │
//! │     ~/Library/Application Support/com.petrolpump.pos/pump.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [station]
//! name = "HP Petrol Pump"
//! currency_symbol = "₱"
//!
//! [paths]
//! data_dir = "/var/lib/petrol-pump"
//!
//! [rates]
//! "Premium Gasoline" = "78.90"
//! Diesel = "68.30"
//!
//! [[menu]]
//! key = "A"
//! fuel = "Premium Gasoline"
//!
//! [[menu]]
//! key = "B"
//! fuel = "Diesel"
//!
//! [auth]
//! require_login = true
//! max_attempts = 3
//! ```
//!
//! A `[rates]` table replaces the default rates; it is not merged with them.

use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::menu::COMMAND_KEYS;
use pump_core::validation::{parse_money, validate_fuel_name, validate_menu_key};
use pump_core::{Money, RateTable, DEFAULT_CURRENCY_SYMBOL};
use pump_store::store::DEFAULT_STATION_NAME;
use pump_store::StoreConfig;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE: &str = "pump.toml";

/// Data directory used when no platform directory is available.
pub const FALLBACK_DATA_DIR: &str = "./pump_data";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[station]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSettings {
    /// Printed on the menu banner and receipts.
    #[serde(default = "default_station_name")]
    pub name: String,

    /// Prefix for amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_station_name() -> String {
    DEFAULT_STATION_NAME.to_string()
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for StationSettings {
    fn default() -> Self {
        StationSettings {
            name: default_station_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// `[paths]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Data directory; platform data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// One `[[menu]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Single letter or digit typed at the menu.
    pub key: String,

    /// Fuel sold under that key.
    pub fuel: String,
}

impl MenuEntry {
    fn new(key: &str, fuel: &str) -> Self {
        MenuEntry {
            key: key.to_string(),
            fuel: fuel.to_string(),
        }
    }
}

fn default_menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry::new("A", "Premium Gasoline"),
        MenuEntry::new("B", "Unleaded Gasoline"),
        MenuEntry::new("C", "Diesel"),
        MenuEntry::new("D", "LPG"),
    ]
}

/// `[auth]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Ask for a username and password before the menu.
    #[serde(default)]
    pub require_login: bool,

    /// Failed logins allowed before the program exits.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            require_login: false,
            max_attempts: default_max_attempts(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete terminal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PumpConfig {
    #[serde(default)]
    pub station: StationSettings,

    #[serde(default)]
    pub paths: PathSettings,

    /// Fuel name → rate per litre.
    #[serde(default = "RateTable::default_decimals")]
    pub rates: BTreeMap<String, Decimal>,

    /// Fuel keys in display order.
    #[serde(default = "default_menu")]
    pub menu: Vec<MenuEntry>,

    #[serde(default)]
    pub auth: AuthSettings,
}

impl Default for PumpConfig {
    fn default() -> Self {
        PumpConfig {
            station: StationSettings::default(),
            paths: PathSettings::default(),
            rates: RateTable::default_decimals(),
            menu: default_menu(),
            auth: AuthSettings::default(),
        }
    }
}

impl PumpConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path`, else `$PUMP_CONFIG`, else the
    ///    platform config dir
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let path = config_path
            .or_else(|| std::env::var_os("PUMP_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Self::from_toml(&contents)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file body.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - Every rate is positive and every fuel name is ledger-safe
    /// - Menu keys are single letters/digits, unique, and not a command key
    /// - Menu fuels are ledger-safe names
    /// - `max_attempts` is at least 1
    /// - Currency symbol contains no `|` or line break, and amounts written
    ///   with it read back unchanged (no digits, `-`, `,` ...)
    pub fn validate(&self) -> ConfigResult<()> {
        RateTable::from_decimals(&self.rates).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let mut seen = HashSet::new();
        for entry in &self.menu {
            let key = validate_menu_key(&entry.key)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            if COMMAND_KEYS.contains(&key) {
                return Err(ConfigError::Invalid(format!(
                    "menu key '{}' is reserved for a command",
                    key
                )));
            }
            if !seen.insert(key) {
                return Err(ConfigError::Invalid(format!(
                    "menu key '{}' is used more than once",
                    key
                )));
            }
            validate_fuel_name(&entry.fuel).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        if self.auth.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "auth.max_attempts must be greater than 0".into(),
            ));
        }

        validate_currency_symbol(&self.station.currency_symbol)?;

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup` (an environment stand-in).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("PUMP_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.paths.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(name) = lookup("PUMP_STATION_NAME") {
            self.station.name = name;
        }

        if let Some(flag) = lookup("PUMP_REQUIRE_LOGIN") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.auth.require_login = true,
                "0" | "false" | "no" | "off" => self.auth.require_login = false,
                _ => warn!(value = %flag, "Unknown PUMP_REQUIRE_LOGIN value in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "petrolpump", "pos")
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Data directory: configured, else platform data dir, else `./pump_data`.
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
    }

    /// Builds the rate table.
    pub fn rate_table(&self) -> ConfigResult<RateTable> {
        RateTable::from_decimals(&self.rates).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Menu fuel keys, upper-cased, in display order.
    pub fn menu_entries(&self) -> ConfigResult<Vec<(char, String)>> {
        self.menu
            .iter()
            .map(|entry| {
                validate_menu_key(&entry.key)
                    .map(|key| (key, entry.fuel.trim().to_string()))
                    .map_err(|e| ConfigError::Invalid(e.to_string()))
            })
            .collect()
    }

    /// Store settings derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.data_dir())
            .station_name(&self.station.name)
            .currency_symbol(&self.station.currency_symbol)
    }
}

/// Checks that ledger and receipt amounts written with `symbol` parse back.
fn validate_currency_symbol(symbol: &str) -> ConfigResult<()> {
    if symbol.contains(|c: char| c == '|' || c == '\n' || c == '\r') {
        return Err(ConfigError::Invalid(
            "station.currency_symbol must not contain '|' or line breaks".into(),
        ));
    }

    for sample in [Money::from_cents(123_456_789), Money::from_cents(-550)] {
        let written = sample.with_symbol(symbol);
        if parse_money("amount", &written).ok() != Some(sample) {
            return Err(ConfigError::Invalid(format!(
                "station.currency_symbol '{}' makes amounts unreadable ('{}')",
                symbol, written
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PumpConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.auth.require_login);
        assert_eq!(config.auth.max_attempts, 3);
        assert_eq!(config.menu.len(), 4);
        assert_eq!(config.station.currency_symbol, "₱");
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = PumpConfig::from_toml("").unwrap();
        assert_eq!(config, PumpConfig::default());
    }

    #[test]
    fn test_parse_full_file() {
        let config = PumpConfig::from_toml(
            r#"
            [station]
            name = "Shell Katipunan"
            currency_symbol = "$"

            [paths]
            data_dir = "/tmp/pump"

            [rates]
            Diesel = "60.00"
            "Premium Gasoline" = 80.5

            [[menu]]
            key = "d"
            fuel = "Diesel"

            [auth]
            require_login = true
            "#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.station.name, "Shell Katipunan");
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/pump"));
        assert_eq!(config.rates.len(), 2);
        assert_eq!(config.rates["Diesel"], Decimal::new(6000, 2));
        assert_eq!(config.menu_entries().unwrap(), vec![('D', "Diesel".to_string())]);
        assert!(config.auth.require_login);
        assert_eq!(config.auth.max_attempts, 3);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = PumpConfig::default();
        config.rates.insert("Diesel".to_string(), Decimal::ZERO);
        assert!(config.validate().is_err());

        let mut config = PumpConfig::default();
        config.menu.push(MenuEntry::new("q", "Kerosene"));
        assert!(config.validate().is_err());

        let mut config = PumpConfig::default();
        config.menu.push(MenuEntry::new("a", "Kerosene"));
        assert!(config.validate().is_err());

        let mut config = PumpConfig::default();
        config.menu.push(MenuEntry::new("AB", "Kerosene"));
        assert!(config.validate().is_err());

        let mut config = PumpConfig::default();
        config.auth.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_currency_symbol_must_read_back() {
        for symbol in ["₱", "$", "Rs.", "US$", "€ ", ""] {
            let mut config = PumpConfig::default();
            config.station.currency_symbol = symbol.to_string();
            assert!(config.validate().is_ok(), "{symbol:?} should be accepted");
        }
        for symbol in ["R1", "-", "1", ".", "|", "a|b", "L\n"] {
            let mut config = PumpConfig::default();
            config.station.currency_symbol = symbol.to_string();
            assert!(config.validate().is_err(), "{symbol:?} should be rejected");
        }
    }

    #[test]
    fn test_menu_fuel_without_rate_is_allowed() {
        let mut config = PumpConfig::default();
        config.menu.push(MenuEntry::new("K", "Kerosene"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = PumpConfig::default();
        config.apply_overrides(|key| match key {
            "PUMP_DATA_DIR" => Some("/srv/pump".to_string()),
            "PUMP_STATION_NAME" => Some("Petron EDSA".to_string()),
            "PUMP_REQUIRE_LOGIN" => Some("yes".to_string()),
            _ => None,
        });
        assert_eq!(config.data_dir(), PathBuf::from("/srv/pump"));
        assert_eq!(config.station.name, "Petron EDSA");
        assert!(config.auth.require_login);
    }

    #[test]
    fn test_store_config() {
        let mut config = PumpConfig::default();
        config.paths.data_dir = Some(PathBuf::from("/srv/pump"));
        let store = config.store_config();
        assert_eq!(store.data_dir, PathBuf::from("/srv/pump"));
        assert_eq!(store.station_name, "HP Petrol Pump");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = PumpConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.rates, RateTable::default_decimals());
    }
}
