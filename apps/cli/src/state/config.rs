//! # Configuration State
//!
//! Stores application configuration resolved at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--catalog`, `--export-dir`, `--log`)
//! 2. Environment variables (`TRIMLINE_CATALOG`, `TRIMLINE_EXPORT_DIR`, `TRIMLINE_LOG`)
//! 3. Config file (`--config <path>`, else the platform config dir)
//! 4. Defaults (this file)
//!
//! ## Config File
//! ```toml
//! # ~/.config/trimline/config.toml
//! catalog = "/srv/trimline/catalog"
//! export_dir = "~/quotes"
//! log = "info,trimline=trace"
//! currency_suffix = "원"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after startup, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use trimline_core::money::CURRENCY_SUFFIX;
use trimline_core::Money;

pub const ENV_CATALOG: &str = "TRIMLINE_CATALOG";
pub const ENV_EXPORT_DIR: &str = "TRIMLINE_EXPORT_DIR";
pub const ENV_LOG: &str = "TRIMLINE_LOG";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Values read from `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub catalog: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub log: Option<String>,
    pub currency_suffix: Option<String>,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads a config file. A missing file at the default location is not
    /// an error; pass `required` for a path the user named.
    pub fn read(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(FileConfig::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// `…/trimline/config.toml` in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "trimline", "trimline").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub log: Option<String>,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Catalog file or directory. `None` uses the bundled seed catalog.
    pub catalog: Option<PathBuf>,

    /// Where exported quotes are written.
    /// Default: current directory
    pub export_dir: PathBuf,

    /// Log filter directive. `RUST_LOG` still takes precedence.
    pub log: Option<String>,

    /// Suffix for displayed prices.
    /// Default: "원"
    pub currency_suffix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            catalog: None,
            export_dir: PathBuf::from("."),
            log: None,
            currency_suffix: CURRENCY_SUFFIX.to_string(),
        }
    }
}

impl AppConfig {
    /// Resolves configuration from flags, the process environment and the
    /// config file.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let file = match &overrides.config {
            Some(path) => FileConfig::read(path, true)?,
            None => match FileConfig::default_path() {
                Some(path) => FileConfig::read(&path, false)?,
                None => FileConfig::default(),
            },
        };

        Ok(Self::resolve(overrides, |key| std::env::var(key).ok(), file))
    }

    /// Merges the sources in priority order.
    pub fn resolve(
        overrides: &ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
        file: FileConfig,
    ) -> Self {
        let defaults = AppConfig::default();
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        AppConfig {
            catalog: overrides
                .catalog
                .clone()
                .or_else(|| env(ENV_CATALOG).map(PathBuf::from))
                .or(file.catalog),
            export_dir: overrides
                .export_dir
                .clone()
                .or_else(|| env(ENV_EXPORT_DIR).map(PathBuf::from))
                .or(file.export_dir)
                .unwrap_or(defaults.export_dir),
            log: overrides.log.clone().or_else(|| env(ENV_LOG)).or(file.log),
            currency_suffix: file.currency_suffix.unwrap_or(defaults.currency_suffix),
        }
    }

    /// Formats an amount with the configured suffix.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_won(Money::from_won(1_234_000)), "1,234,000원");
    /// ```
    pub fn format_won(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, amount.grouped(), self.currency_suffix)
    }
}
