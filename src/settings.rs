//! Runtime settings
//!
//! Stored as JSON under the platform config directory. Every field has a
//! default, so a partial file only overrides what it names.

use crate::constants::settings::{APP_DIR, DEFAULT_LOG_FILTER, FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Count hits, misses and cooks in the cooker cache
    pub track_statistics: bool,
    /// Check triangle indices of every cooked geometry
    pub validate_output: bool,
    /// Drop the whole cache after every parameter edit
    pub conservative_invalidation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            track_statistics: true,
            validate_output: true,
            conservative_invalidation: true,
        }
    }
}

impl Settings {
    /// `<config_dir>/sopgraph/settings.json`, `None` if the platform has no
    /// config directory
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Load from the default location. A missing file gives the defaults.
    pub fn load() -> Result<Self, SettingsError> {
        match Self::path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|source| SettingsError::Io { path: path.clone(), source })?;
                let settings = Self::from_json(&content)?;
                log::debug!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
