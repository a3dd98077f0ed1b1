// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_DELAY_MS: u64 = 400;
pub const DEFAULT_BLUR_GRACE_MS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_blur_grace_ms() -> u64 {
    DEFAULT_BLUR_GRACE_MS
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

/// Portal the suggestions are fetched from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Site root, e.g. `https://demo.ckan.org`
    #[serde(default)]
    pub url: Option<String>,
}

/// Suggestion controller settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AutocompleteConfig {
    /// Keystroke debounce delay
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// How long a blur waits before deciding to hide the dropdown
    #[serde(default = "default_blur_grace_ms")]
    pub blur_grace_ms: u64,
    /// Upper bound on a single suggestion request
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Filter query forwarded verbatim to the backend
    #[serde(default)]
    pub fq: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        AutocompleteConfig {
            delay_ms: DEFAULT_DELAY_MS,
            blur_grace_ms: DEFAULT_BLUR_GRACE_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            fq: None,
            locale: None,
        }
    }
}

impl AutocompleteConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.site.url.is_none());
        assert_eq!(config.autocomplete, AutocompleteConfig::default());
        assert_eq!(config.autocomplete.delay(), Duration::from_millis(400));
        assert_eq!(config.autocomplete.blur_grace(), Duration::from_millis(600));
        assert_eq!(config.autocomplete.request_timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn test_full_config_parses() {
        let config: Config = toml::from_str(
            r#"
[site]
url = "https://demo.ckan.org"

[autocomplete]
delay_ms = 250
blur_grace_ms = 300
request_timeout_ms = 2000
fq = "organization:nasa"
locale = "de"
"#,
        )
        .unwrap();

        assert_eq!(config.site.url.as_deref(), Some("https://demo.ckan.org"));
        assert_eq!(config.autocomplete.delay_ms, 250);
        assert_eq!(config.autocomplete.blur_grace_ms, 300);
        assert_eq!(config.autocomplete.request_timeout_ms, 2000);
        assert_eq!(config.autocomplete.fq.as_deref(), Some("organization:nasa"));
        assert_eq!(config.autocomplete.locale.as_deref(), Some("de"));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[autocomplete]\ndelay_ms = \"fast\"\n");
        assert!(result.is_err());
    }

    // Any subset of timing fields parses, and absent ones fall back to defaults
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_missing_fields_use_defaults(
            delay in prop::option::of(1u64..5000),
            grace in prop::option::of(1u64..5000),
        ) {
            let mut toml_content = String::from("[autocomplete]\n");
            if let Some(delay) = delay {
                toml_content.push_str(&format!("delay_ms = {}\n", delay));
            }
            if let Some(grace) = grace {
                toml_content.push_str(&format!("blur_grace_ms = {}\n", grace));
            }

            let config: Config = toml::from_str(&toml_content).unwrap();
            prop_assert_eq!(config.autocomplete.delay_ms, delay.unwrap_or(DEFAULT_DELAY_MS));
            prop_assert_eq!(config.autocomplete.blur_grace_ms, grace.unwrap_or(DEFAULT_BLUR_GRACE_MS));
            prop_assert_eq!(config.autocomplete.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
        }
    }
}
