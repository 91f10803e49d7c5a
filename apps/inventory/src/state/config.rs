//! # Inventory Configuration
//!
//! Settings for the stock-floor policy, dashboard and export.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults          allow_negative_stock = false, threshold 10, top 5 │
//! │  2. inventory.toml    --config <PATH> or the platform config dir       │
//! │  3. Environment       LLANO_ALLOW_NEGATIVE_STOCK, LLANO_LOW_STOCK_...  │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use llano_core::{StockPolicy, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_TOP_N};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "inventory.toml";

pub const ENV_ALLOW_NEGATIVE_STOCK: &str = "LLANO_ALLOW_NEGATIVE_STOCK";
pub const ENV_LOW_STOCK_THRESHOLD: &str = "LLANO_LOW_STOCK_THRESHOLD";
pub const ENV_TOP_N: &str = "LLANO_TOP_N";
pub const ENV_EXPORT_DIR: &str = "LLANO_EXPORT_DIR";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// `[stock]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSettings {
    /// Let sales drive stock below zero.
    #[serde(default)]
    pub allow_negative_stock: bool,

    /// Stock at or below this value counts as low.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

fn default_low_stock_threshold() -> i64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for StockSettings {
    fn default() -> Self {
        StockSettings {
            allow_negative_stock: false,
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Length of the top-sold / top-purchased rankings.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            top_n: default_top_n(),
        }
    }
}

/// `[export]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Workbook directory.
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("export")
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            directory: default_export_dir(),
        }
    }
}

// =============================================================================
// Inventory Configuration
// =============================================================================

/// Complete application configuration.
///
/// ## Example Config File
/// ```toml
/// [stock]
/// allow_negative_stock = false
/// low_stock_threshold = 10
///
/// [report]
/// top_n = 5
///
/// [export]
/// directory = "export"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub stock: StockSettings,

    #[serde(default)]
    pub report: ReportSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

impl InventoryConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit path that does not exist is an error; a missing file at
    /// the default location just means defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() || explicit {
                info!(?path, "Loading inventory config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::Read {
                        path: path.clone(),
                        source,
                    }
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stock.low_stock_threshold < 0 {
            return Err(ConfigError::Invalid(
                "low_stock_threshold must not be negative".into(),
            ));
        }
        if self.report.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be greater than 0".into()));
        }
        if self.export.directory.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("export directory is required".into()));
        }
        Ok(())
    }

    /// Stock-floor policy for the movement processor.
    pub fn stock_policy(&self) -> StockPolicy {
        StockPolicy {
            allow_negative_stock: self.stock.allow_negative_stock,
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the process environment in
    /// production). Unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_ALLOW_NEGATIVE_STOCK) {
            match parse_bool(&value) {
                Some(allow) => {
                    debug!(allow, "Overriding stock-floor policy from environment");
                    self.stock.allow_negative_stock = allow;
                }
                None => warn!(value = %value, "Invalid {}", ENV_ALLOW_NEGATIVE_STOCK),
            }
        }

        if let Some(value) = lookup(ENV_LOW_STOCK_THRESHOLD) {
            match value.trim().parse::<i64>() {
                Ok(threshold) => self.stock.low_stock_threshold = threshold,
                Err(_) => warn!(value = %value, "Invalid {}", ENV_LOW_STOCK_THRESHOLD),
            }
        }

        if let Some(value) = lookup(ENV_TOP_N) {
            match value.trim().parse::<usize>() {
                Ok(n) => self.report.top_n = n,
                Err(_) => warn!(value = %value, "Invalid {}", ENV_TOP_N),
            }
        }

        if let Some(dir) = lookup(ENV_EXPORT_DIR) {
            self.export.directory = PathBuf::from(dir);
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "llano", "inventory")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = InventoryConfig::default();
        assert!(!config.stock.allow_negative_stock);
        assert_eq!(config.stock.low_stock_threshold, 10);
        assert_eq!(config.report.top_n, 5);
        assert_eq!(config.export.directory, PathBuf::from("export"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: InventoryConfig = toml::from_str(
            r#"
            [stock]
            allow_negative_stock = true
            "#,
        )
        .unwrap();

        assert!(config.stock.allow_negative_stock);
        assert_eq!(config.stock.low_stock_threshold, 10);
        assert_eq!(config.report.top_n, 5);
        assert!(config.stock_policy().allow_negative_stock);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.toml");
        std::fs::write(&path, "[report]\ntop_n = 3\n[export]\ndirectory = \"out\"\n").unwrap();

        let config = InventoryConfig::load(Some(path)).unwrap();
        assert_eq!(config.report.top_n, 3);
        assert_eq!(config.export.directory, PathBuf::from("out"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = InventoryConfig::load(Some(dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ALLOW_NEGATIVE_STOCK, "yes"),
            (ENV_LOW_STOCK_THRESHOLD, "not-a-number"),
            (ENV_TOP_N, "8"),
        ]
        .into_iter()
        .collect();

        let mut config = InventoryConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert!(config.stock.allow_negative_stock);
        assert_eq!(config.stock.low_stock_threshold, 10);
        assert_eq!(config.report.top_n, 8);
    }

    #[test]
    fn test_validate_rejects_zero_top_n() {
        let mut config = InventoryConfig::default();
        config.report.top_n = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
