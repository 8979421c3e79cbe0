// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Kindred's Application Settings
//!
//! Settings live in `config.toml` inside the platform configuration directory (for example
//! `~/.config/kindred/config.toml` on Linux).  Every field is optional; whatever is missing takes
//! its default.  A missing or unreadable file is not an error for [`AppConfig::load`]: it logs and
//! carries on with defaults, so the application always starts.
//!
//! Two environment variables override the file:
//!
//! - `KINDRED_API_URL` replaces `api_base_url`
//! - `KINDRED_TOKEN` supplies the bearer token, which is never written back to disk

use std::path::{Path, PathBuf};

use layout::{Direction, LayoutConfig};
use serde::{Deserialize, Serialize};

pub const API_URL_VAR: &str = "KINDRED_API_URL";
pub const TOKEN_VAR: &str = "KINDRED_TOKEN";

const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the family tree API, without a trailing slash.
    pub api_base_url: String,
    /// Bearer token for the API.  Only ever read from the environment or the file, never saved.
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub tree: TreeSettings,
    pub layout: LayoutSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: None,
            tree: TreeSettings::default(),
            layout: LayoutSettings::default(),
        }
    }
}

/// Depth limits for the pedigree and descendant views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    pub ancestor_depth: usize,
    pub descendant_depth: usize,
    /// Opening angle of the fan chart in degrees.
    pub fan_sweep_degrees: f64,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            ancestor_depth: 5,
            descendant_depth: 5,
            fan_sweep_degrees: 240.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub direction: Direction,
    pub node_width: f64,
    pub node_height: f64,
    pub node_separation: f64,
    pub rank_separation: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            direction: Direction::TopToBottom,
            node_width: 180.0,
            node_height: 80.0,
            node_separation: 50.0,
            rank_separation: 80.0,
        }
    }
}

impl AppConfig {
    /// Path of the settings file, if the platform has a configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "kindred", "kindred")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads settings from the default location and applies environment overrides.
    ///
    /// Falls back to defaults, with a log message, when the file is missing or malformed.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => match Self::load_from_path(&path) {
                Ok(config) => {
                    log::info!("Loaded settings from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring settings file: {}", err);
                    Self::default()
                }
            },
            Some(path) => {
                log::debug!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            None => {
                log::warn!("No configuration directory available, using default settings");
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(text)?;
        config.normalize();
        Ok(config)
    }

    /// Writes the settings to `path`, creating parent directories as needed.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `KINDRED_API_URL` and `KINDRED_TOKEN` as looked up by `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_VAR).filter(|value| !value.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(token) = lookup(TOKEN_VAR).filter(|value| !value.trim().is_empty()) {
            self.access_token = Some(token);
        }
        self.normalize();
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::new(self.layout.direction)
            .with_separation(self.layout.node_separation, self.layout.rank_separation)
    }

    fn normalize(&mut self) {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        if trimmed.len() != self.api_base_url.len() {
            self.api_base_url = trimmed.to_string();
        }
    }
}


// End of File
