use std::time::Duration;

use thiserror::Error;

/// Failure of a single suggestion request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    /// The endpoint answered with `success: false`
    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Problems loading or validating configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid site URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("No site URL configured. Pass --url or set [site] url in the config file.")]
    MissingUrl,
}

/// A required attachment point was not found when the controller attached
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("input does not exist: {0}")]
    MissingInput(String),

    #[error("suggestion box does not exist: {0}")]
    MissingDropdown(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
