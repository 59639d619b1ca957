//! Settings for the `folio` command-line tool.
//!
//! Settings live in a TOML file. The default location is
//! `~/.folio/config.toml`, overridable with `FOLIO_CONFIG_FILE`. Individual
//! data file paths can also be overridden with `FOLIO_HOLDINGS_FILE` and
//! `FOLIO_MARKET_DATA_FILE`.

use crate::types::ProjectionParams;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "FOLIO_CONFIG_FILE";
const HOLDINGS_ENV: &str = "FOLIO_HOLDINGS_FILE";
const MARKET_DATA_ENV: &str = "FOLIO_MARKET_DATA_FILE";

/// Resolve a path under `~/.folio`, falling back to the working directory.
fn data_path(file_name: &str) -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".folio").join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

/// Tool settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// JSON file with the list of holdings
    pub holdings_file: PathBuf,
    /// JSON file with the latest market data snapshot
    pub market_data_file: PathBuf,
    /// Defaults for the `project` command
    pub projection: ProjectionParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            holdings_file: data_path("holdings.json"),
            market_data_file: data_path("market_data.json"),
            projection: ProjectionParams::default(),
        }
    }
}

impl Settings {
    /// Get the settings file path.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        data_path("config.toml")
    }

    /// Load settings from the default path and apply env overrides.
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from_path(&Self::default_path())?;
        settings.apply_env();
        Ok(settings)
    }

    /// Load settings from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(path) = env::var(HOLDINGS_ENV) {
            self.holdings_file = PathBuf::from(path);
        }
        if let Ok(path) = env::var(MARKET_DATA_ENV) {
            self.market_data_file = PathBuf::from(path);
        }
    }
}
