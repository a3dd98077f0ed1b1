//! CKAN action API client
//!
//! Calls the `search_autocomplete` action and unwraps the standard action
//! envelope `{"success": ..., "result": ..., "error": ...}`.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Url;
use serde::Deserialize;

use super::{SuggestionFetcher, SuggestionRequest};
use crate::error::{ConfigError, FetchError};
use crate::suggestion::SuggestionSet;

/// Action endpoint, relative to the site root
pub const ACTION_PATH: &str = "api/3/action/search_autocomplete";

/// Longest body excerpt kept in a status error
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Deserialize)]
struct ActionResponse {
    #[serde(default)]
    success: bool,
    result: Option<SuggestionSet>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct CkanClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl CkanClient {
    /// Client for the portal rooted at `site`
    pub fn new(site: &Url) -> Result<Self, ConfigError> {
        let endpoint = site.join(ACTION_PATH).map_err(|e| ConfigError::InvalidUrl {
            url: site.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SuggestionFetcher for CkanClient {
    fn fetch(&self, request: SuggestionRequest) -> BoxFuture<'static, Result<SuggestionSet, FetchError>> {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();

        async move {
            log::debug!("POST {} q={:?}", endpoint, request.q);
            let response = http
                .post(endpoint)
                .json(&request)
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            parse_action_response(status, &body)
        }
        .boxed()
    }
}

/// Interpret an action API response
///
/// CKAN reports failures with a JSON envelope even on 4xx/5xx, so the body is
/// inspected before the status code.
pub fn parse_action_response(status: u16, body: &str) -> Result<SuggestionSet, FetchError> {
    let envelope = serde_json::from_str::<ActionResponse>(body);
    let ok_status = (200..300).contains(&status);

    match envelope {
        Ok(ActionResponse { success: false, error, .. }) => Err(FetchError::Api(describe_error(error))),
        Ok(ActionResponse { result: Some(result), .. }) if ok_status => Ok(result),
        Ok(_) if ok_status => Err(FetchError::Parse("missing result".to_string())),
        Err(e) if ok_status => Err(FetchError::Parse(e.to_string())),
        _ => Err(FetchError::Status {
            code: status,
            message: excerpt(body),
        }),
    }
}

fn describe_error(error: Option<serde_json::Value>) -> String {
    let Some(error) = error else {
        return "request failed".to_string();
    };

    let message = error.get("message").and_then(|m| m.as_str());
    let kind = error.get("__type").and_then(|t| t.as_str());
    match (kind, message) {
        (Some(kind), Some(message)) => format!("{}: {}", kind, message),
        (None, Some(message)) => message.to_string(),
        (Some(kind), None) => kind.to_string(),
        (None, None) => error.to_string(),
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
#[path = "ckan_tests.rs"]
mod ckan_tests;
