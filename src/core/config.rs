//! Configuration file management.
//!
//! Reads the optional `kvsync.toml` and merges it with command-line
//! overrides into [`Settings`].
//!
//! Lookup order when no explicit path is given:
//! 1. `./kvsync.toml`
//! 2. `<user config dir>/kvsync/config.toml`
//!
//! A missing file is not an error; every field has a default or can be
//! supplied on the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::codec::Codec;
use crate::core::constants;
use crate::core::vault::VaultLocator;
use crate::error::{ConfigError, Result};

/// Contents of `kvsync.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Target vault
    #[serde(default)]
    pub vault: VaultConfig,
    /// CSV file settings
    #[serde(default)]
    pub csv: CsvConfig,
}

/// `[vault]` section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Vault URI (`https://<name>.vault.azure.net/`) or bare vault name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// `[csv]` section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Field delimiter, a single character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    /// Export destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<PathBuf>,
    /// Import source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// With `explicit`, that file must exist. Otherwise the first existing
    /// file from [`Config::search_paths`] is used, or defaults if none.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if a file
    /// exists but cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            vault = config.vault.uri.is_some(),
            delimiter = ?config.csv.delimiter,
            "config loaded"
        );
        Ok(config)
    }

    /// Candidate config files, most specific first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(constants::CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(
                dir.join(constants::CONFIG_DIR)
                    .join(constants::GLOBAL_CONFIG_FILE),
            );
        }
        paths
    }
}

/// Values given on the command line (or through the environment).
///
/// Each one takes precedence over the matching config field.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub vault: Option<String>,
    pub delimiter: Option<String>,
    pub export: Option<PathBuf>,
    pub import: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub vault: VaultLocator,
    pub codec: Codec,
    pub export_path: PathBuf,
    pub import_path: PathBuf,
}

impl Settings {
    /// Merge `config` and `overrides`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVault` if neither source names a vault,
    /// `ConfigError::InvalidVault` or `ConfigError::InvalidDelimiter` for
    /// malformed values.
    pub fn resolve(config: Config, overrides: Overrides) -> Result<Self> {
        let vault = overrides
            .vault
            .or(config.vault.uri)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVault)?;
        let vault = VaultLocator::parse(&vault)?;

        let codec = match overrides.delimiter.or(config.csv.delimiter) {
            Some(delimiter) => Codec::parse(&delimiter)?,
            None => Codec::default(),
        };

        let default_path = || PathBuf::from(constants::DEFAULT_CSV_PATH);

        Ok(Self {
            vault,
            codec,
            export_path: overrides
                .export
                .or(config.csv.export)
                .unwrap_or_else(default_path),
            import_path: overrides
                .import
                .or(config.csv.import)
                .unwrap_or_else(default_path),
        })
    }
}
