//! Tests for request encoding and href resolution

use super::*;

#[test]
fn test_request_body_omits_unset_params() {
    let request = SuggestionRequest {
        q: "clim".to_string(),
        fq: None,
        locale: None,
    };
    assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"q":"clim"}"#);
}

#[test]
fn test_request_body_carries_filters_and_locale() {
    let request = SuggestionRequest {
        q: "clim".to_string(),
        fq: Some("organization:nasa".to_string()),
        locale: Some("de".to_string()),
    };
    let body: serde_json::Value = serde_json::to_value(&request).unwrap();
    assert_eq!(body["fq"], "organization:nasa");
    assert_eq!(body["locale"], "de");
}

#[test]
fn test_resolve_relative_href() {
    let site = Url::parse("https://data.example.org/").unwrap();
    assert_eq!(
        resolve_href(&site, "/dataset/climate"),
        "https://data.example.org/dataset/climate"
    );
    assert_eq!(
        resolve_href(&site, "dataset/?tags=Climate"),
        "https://data.example.org/dataset/?tags=Climate"
    );
}

#[test]
fn test_resolve_absolute_href_is_unchanged() {
    let site = Url::parse("https://data.example.org/").unwrap();
    assert_eq!(
        resolve_href(&site, "https://other.example.org/x"),
        "https://other.example.org/x"
    );
}
