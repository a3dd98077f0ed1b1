//! Configuration loading
//!
//! Reads `config.toml` from the platform config directory (or an explicit
//! path) and validates the site URL.

mod types;

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::ConfigError;

pub use types::{
    AutocompleteConfig, Config, DEFAULT_BLUR_GRACE_MS, DEFAULT_DELAY_MS,
    DEFAULT_REQUEST_TIMEOUT_MS, SiteConfig,
};

const APP_DIR: &str = "search-suggest";
const CONFIG_FILE: &str = "config.toml";

/// `<config dir>/search-suggest/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load configuration
///
/// An explicit `path` must exist. Without one, the default location is
/// tried and a missing file yields the default configuration.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Config::default())
            }
        },
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

impl Config {
    /// Validated site root
    ///
    /// The returned URL always ends with `/` so relative API paths and hrefs
    /// join below it rather than replacing its last segment.
    pub fn site_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .site
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUrl)?;

        let mut url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
            url: raw.to_string(),
            message: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: raw.to_string(),
                message: format!("unsupported scheme {:?}", url.scheme()),
            });
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
