use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Interactive search suggestions for CKAN portals
#[derive(Debug, Parser)]
#[command(name = "search-suggest", version, about, long_about = None)]
pub struct Cli {
    /// Portal root URL, e.g. https://demo.ckan.org
    #[arg(short, long)]
    pub url: Option<String>,

    /// Filter query forwarded with every suggestion request
    #[arg(long)]
    pub fq: Option<String>,

    /// Locale forwarded with every suggestion request
    #[arg(long)]
    pub locale: Option<String>,

    /// Keystroke debounce delay in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Delay before hiding the dropdown after focus leaves, in milliseconds
    #[arg(long, value_name = "MS")]
    pub blur_grace_ms: Option<u64>,

    /// Suggestion request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file (defaults to the user cache directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Override file settings with the ones given on the command line
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.site.url = Some(url.clone());
        }
        if let Some(fq) = &self.fq {
            config.autocomplete.fq = Some(fq.clone());
        }
        if let Some(locale) = &self.locale {
            config.autocomplete.locale = Some(locale.clone());
        }
        if let Some(delay_ms) = self.delay_ms {
            config.autocomplete.delay_ms = delay_ms;
        }
        if let Some(blur_grace_ms) = self.blur_grace_ms {
            config.autocomplete.blur_grace_ms = blur_grace_ms;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.autocomplete.request_timeout_ms = timeout_ms;
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
