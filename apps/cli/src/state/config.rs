//! # Configuration State
//!
//! Application configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --data-dir ./cache  --backup-dir ./backups                         │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     FACTURA_DATA_DIR=/srv/facturas                                     │
//! │     FACTURA_BACKUP_DIR=/srv/facturas-bak                               │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/factura/factura.toml (Linux)                             │
//! │     ~/Library/Application Support/pe.peru-delivery.factura/ (macOS)    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     ./cache and ./backups                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # factura.toml
//! [storage]
//! data_dir = "/srv/facturas/cache"
//! backup_dir = "/srv/facturas/backups"
//!
//! [display]
//! currency_symbol = "S/."
//! show_file_sizes = true
//! ```
//!
//! Read-only after startup: commands receive `&AppConfig`.

use std::path::{Path, PathBuf};

use factura_core::{Money, CURRENCY_SYMBOL};
use factura_store::StoreConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable overriding the invoice directory.
pub const ENV_DATA_DIR: &str = "FACTURA_DATA_DIR";

/// Environment variable overriding the backup directory.
pub const ENV_BACKUP_DIR: &str = "FACTURA_BACKUP_DIR";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// Where invoices and backups live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("cache")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("backups")
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: default_data_dir(),
            backup_dir: default_backup_dir(),
        }
    }
}

/// How amounts and listings are printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Shown in front of amounts in terminal output. The invoice files
    /// always use `S/.` regardless.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Include the file size column in `list`.
    #[serde(default = "default_true")]
    pub show_file_sizes: bool,
}

fn default_currency_symbol() -> String {
    CURRENCY_SYMBOL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            show_file_sizes: true,
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    /// File the configuration was read from, if any.
    #[serde(skip_deserializing)]
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from file and environment, over the defaults.
    ///
    /// An explicit `config_path` must exist; the platform default path is
    /// optional. The result is not validated: callers apply command-line
    /// overrides first and then call [`AppConfig::validate`].
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(path = %path.display(), "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Reads one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading config file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: AppConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    /// Applies `FACTURA_*` overrides; `lookup` is `std::env::var` in production.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup(ENV_BACKUP_DIR) {
            debug!(backup_dir = %dir, "Overriding backup dir from environment");
            self.storage.backup_dir = PathBuf::from(dir);
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        backup_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = data_dir {
            self.storage.data_dir = dir;
        }
        if let Some(dir) = backup_dir {
            self.storage.backup_dir = dir;
        }
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage.data_dir must not be empty".into()));
        }

        if self.storage.backup_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.backup_dir must not be empty".into(),
            ));
        }

        if self.storage.data_dir == self.storage.backup_dir {
            return Err(ConfigError::Invalid(
                "storage.backup_dir must differ from storage.data_dir".into(),
            ));
        }

        if self.display.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "display.currency_symbol must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Store layout for these settings.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.storage.data_dir).backup_dir(&self.storage.backup_dir)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("pe", "peru-delivery", "factura")
            .map(|dirs| dirs.config_dir().join("factura.toml"))
    }

    /// Formats an amount for terminal output.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "S/. 12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{} {}", self.display.currency_symbol, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.data_dir, PathBuf::from("cache"));
        assert_eq!(config.storage.backup_dir, PathBuf::from("backups"));
        assert_eq!(config.display.currency_symbol, "S/.");
        assert!(config.display.show_file_sizes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [storage]
            data_dir = "/srv/facturas"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.data_dir, PathBuf::from("/srv/facturas"));
        assert_eq!(config.storage.backup_dir, PathBuf::from("backups"));
        assert_eq!(config.display, DisplaySettings::default());
    }

    #[test]
    fn test_from_file_records_source() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("factura.toml");
        std::fs::write(&path, "[display]\nshow_file_sizes = false\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert!(!config.display.show_file_sizes);
        assert_eq!(config.source, Some(path));
    }

    #[test]
    fn test_from_file_errors() {
        let tmp = tempfile::tempdir().unwrap();

        let missing = tmp.path().join("missing.toml");
        assert!(matches!(
            AppConfig::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = tmp.path().join("broken.toml");
        std::fs::write(&broken, "[storage\ndata_dir = ").unwrap();
        assert!(matches!(
            AppConfig::from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_DATA_DIR, "/env/cache")].into_iter().collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.data_dir, PathBuf::from("/env/cache"));
        assert_eq!(config.storage.backup_dir, PathBuf::from("backups"));
    }

    #[test]
    fn test_flags_override_everything() {
        let config = AppConfig::default()
            .with_overrides(Some(PathBuf::from("/flag/cache")), None);
        assert_eq!(config.storage.data_dir, PathBuf::from("/flag/cache"));
        assert_eq!(config.store_config().invoice_dir, PathBuf::from("/flag/cache"));
        assert_eq!(config.store_config().backup_dir, PathBuf::from("backups"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.storage.data_dir = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.storage.backup_dir = PathBuf::from("cache");
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.display.currency_symbol = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_leaves_validation_to_after_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("factura.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"same\"\nbackup_dir = \"same\"\n").unwrap();

        // Invalid on its own, but a flag can still repair it
        let config = AppConfig::load(Some(&path)).unwrap();
        assert!(config.validate().is_err());

        let config = config.with_overrides(None, Some(PathBuf::from("elsewhere")));
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.backup_dir, PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_format_currency() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "S/. 12.34");
        assert_eq!(config.format_currency(Money::zero()), "S/. 0.00");
    }
}
