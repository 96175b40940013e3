//! User configuration, read from `$XDG_CONFIG_HOME/keycalc/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::calculator::EngineOptions;

const APP_DIR: &str = "keycalc";
const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// How long an error notification stays visible, in milliseconds.
    pub error_display_ms: u64,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Print engine states as JSON instead of plain text.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_display_ms: 3000,
            log_level: "warn".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Default location of the config file, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location.
    ///
    /// A missing default file yields defaults. A missing explicit file is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            error_display: Duration::from_millis(self.error_display_ms),
        }
    }
}
