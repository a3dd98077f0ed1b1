//! Suggestion transport
//!
//! The controller only knows [`SuggestionFetcher`]; [`CkanClient`] is the
//! HTTP implementation against a CKAN portal.

mod ckan;

use futures::future::BoxFuture;
use reqwest::Url;
use serde::Serialize;

use crate::error::FetchError;
use crate::suggestion::SuggestionSet;

pub use ckan::{ACTION_PATH, CkanClient, parse_action_response};

/// Parameters of one suggestion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRequest {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

pub trait SuggestionFetcher: Send + Sync {
    /// Start a request; the future resolves once with the sectioned result or an error
    fn fetch(&self, request: SuggestionRequest) -> BoxFuture<'static, Result<SuggestionSet, FetchError>>;
}

/// Resolve a suggestion href against the portal root
///
/// Absolute hrefs are returned as-is; anything unparsable is passed through.
pub fn resolve_href(site: &Url, href: &str) -> String {
    site.join(href)
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod fetch_tests;
