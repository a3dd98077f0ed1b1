//! Suggestion label formatting
//!
//! Turns a raw suggestion into a structured, markup-free label. Highlighting
//! is expressed as styled spans, never as concatenated HTML, so a label can
//! be rendered to a terminal or to escaped HTML without ever interpreting
//! the backend's text as markup.

use regex::{Regex, RegexBuilder};
use scraper::Html;

use crate::suggestion::{SectionKind, Suggestion};

/// Visual treatment of a label fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    /// Query term match
    Emphasis,
    /// De-emphasized annotation such as the category type
    Muted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpan {
    pub text: String,
    pub style: SpanStyle,
}

/// Renderable label made of styled text spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    spans: Vec<LabelSpan>,
}

impl Label {
    pub fn plain(text: impl Into<String>) -> Self {
        let mut label = Self::default();
        label.push(text, SpanStyle::Plain);
        label
    }

    /// Append a span, merging it into the previous one when the style matches
    pub fn push(&mut self, text: impl Into<String>, style: SpanStyle) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(&text),
            _ => self.spans.push(LabelSpan { text, style }),
        }
    }

    pub fn spans(&self) -> &[LabelSpan] {
        &self.spans
    }

    /// Label text with styling dropped
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Escaped HTML rendering: `<strong>` for matches, `<span class="muted">` for annotations
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for span in &self.spans {
            let text = escape_html(&span.text);
            match span.style {
                SpanStyle::Plain => html.push_str(&text),
                SpanStyle::Emphasis => {
                    html.push_str("<strong>");
                    html.push_str(&text);
                    html.push_str("</strong>");
                }
                SpanStyle::Muted => {
                    html.push_str("<span class=\"muted\">");
                    html.push_str(&text);
                    html.push_str("</span>");
                }
            }
        }
        html
    }
}

/// Format a suggestion for display in the given section
pub fn format_label(section: &SectionKind, query: &str, suggestion: &Suggestion) -> Label {
    match section {
        SectionKind::Datasets => highlight_terms(&strip_markup(&suggestion.label), query),
        SectionKind::Categories => {
            let text = strip_markup(&suggestion.label);
            match suggestion.kind.as_deref().filter(|k| !k.is_empty()) {
                Some(kind) => {
                    let mut label = Label::plain(format!("{} ", text));
                    label.push(format!("({})", kind), SpanStyle::Muted);
                    label
                }
                None => Label::plain(text),
            }
        }
        SectionKind::Other(_) => Label::plain(suggestion.label.clone()),
    }
}

/// Wrap every case-insensitive occurrence of a query term in an emphasis span
pub fn highlight_terms(text: &str, query: &str) -> Label {
    let Some(pattern) = term_pattern(query) else {
        return Label::plain(text);
    };

    let mut label = Label::default();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        label.push(&text[cursor..found.start()], SpanStyle::Plain);
        label.push(found.as_str(), SpanStyle::Emphasis);
        cursor = found.end();
    }
    label.push(&text[cursor..], SpanStyle::Plain);
    label
}

/// Alternation of the query's whitespace-separated terms, or None when there are no terms
fn term_pattern(query: &str) -> Option<Regex> {
    let terms: Vec<String> = query.split_whitespace().map(regex::escape).collect();
    if terms.is_empty() {
        return None;
    }

    match RegexBuilder::new(&terms.join("|"))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            log::warn!("Skipping highlight for query {:?}: {}", query, e);
            None
        }
    }
}

/// Reduce a markup-bearing label to its display text
///
/// Parses the label as an HTML fragment and keeps its text nodes, so tags go
/// away, character references are decoded and a bare `<` stays text.
pub fn strip_markup(raw: &str) -> String {
    Html::parse_fragment(raw)
        .root_element()
        .text()
        .collect::<String>()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
#[path = "label_tests.rs"]
mod label_tests;
