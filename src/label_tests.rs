//! Tests for label formatting

use super::*;
use insta::assert_snapshot;
use proptest::prelude::*;

fn dataset(label: &str) -> Suggestion {
    Suggestion::new(label, "/dataset/x")
}

#[test]
fn test_dataset_label_emphasizes_query_case_insensitively() {
    let label = format_label(&SectionKind::Datasets, "clim", &dataset("Climate data"));
    assert_eq!(
        label.spans(),
        &[
            LabelSpan {
                text: "Clim".to_string(),
                style: SpanStyle::Emphasis
            },
            LabelSpan {
                text: "ate data".to_string(),
                style: SpanStyle::Plain
            },
        ]
    );
    assert_eq!(label.plain_text(), "Climate data");
}

#[test]
fn test_dataset_label_multiple_terms_anywhere() {
    let label = format_label(
        &SectionKind::Datasets,
        "  data   CLIM ",
        &dataset("Climate data and more data"),
    );
    assert_snapshot!(
        label.to_html(),
        @"<strong>Clim</strong>ate <strong>data</strong> and more <strong>data</strong>"
    );
}

#[test]
fn test_dataset_label_without_terms_has_no_emphasis() {
    for query in ["", "   ", "\t\n"] {
        let label = format_label(&SectionKind::Datasets, query, &dataset("Climate data"));
        assert_eq!(label, Label::plain("Climate data"));
    }
}

#[test]
fn test_dataset_label_escapes_regex_metacharacters() {
    let label = format_label(&SectionKind::Datasets, "c++ (x", &dataset("C++ tools (x86)"));
    assert_snapshot!(label.to_html(), @"<strong>C++</strong> tools <strong>(x</strong>86)");
}

#[test]
fn test_dataset_label_strips_markup() {
    let label = format_label(
        &SectionKind::Datasets,
        "rain",
        &dataset("<em>Rain</em>fall &amp; <script>alert(1)</script>"),
    );
    assert_eq!(label.plain_text(), "Rainfall & alert(1)");
    assert_snapshot!(label.to_html(), @"<strong>Rain</strong>fall &amp; alert(1)");
}

#[test]
fn test_category_label_appends_muted_type() {
    let suggestion = Suggestion::new("Climate", "/c1").with_kind("tag");
    let label = format_label(&SectionKind::Categories, "clim", &suggestion);
    assert_eq!(label.plain_text(), "Climate (tag)");
    assert_eq!(label.spans()[1].style, SpanStyle::Muted);
    assert_snapshot!(label.to_html(), @r#"Climate <span class="muted">(tag)</span>"#);
}

#[test]
fn test_category_label_without_type() {
    let suggestion = Suggestion::new("Climate", "/c1");
    let label = format_label(&SectionKind::Categories, "clim", &suggestion);
    assert_eq!(label, Label::plain("Climate"));
}

#[test]
fn test_other_section_passes_label_through() {
    let suggestion = Suggestion::new("<b>Group</b>", "/g");
    let label = format_label(&SectionKind::Other("groups".into()), "group", &suggestion);
    assert_eq!(label.plain_text(), "<b>Group</b>");
    assert_snapshot!(label.to_html(), @"&lt;b&gt;Group&lt;/b&gt;");
}

#[test]
fn test_strip_markup_decodes_numeric_references() {
    assert_eq!(strip_markup("caf&#233; &#x41;"), "café A");
    assert_eq!(strip_markup("a & b"), "a & b");
    assert_eq!(strip_markup("&unknown; &lt;"), "&unknown; <");
}

#[test]
fn test_strip_markup_decodes_named_references() {
    assert_eq!(strip_markup("Ni&ntilde;o &mdash; &copy;2020"), "Niño — ©2020");
    assert_eq!(strip_markup("&quot;Air&quot; &amp; water"), "\"Air\" & water");
    assert_eq!(strip_markup("a&nbsp;b"), "a\u{a0}b");
}

#[test]
fn test_strip_markup_keeps_bare_angle_brackets() {
    assert_eq!(strip_markup("CO2 < 400 ppm"), "CO2 < 400 ppm");
    assert_eq!(strip_markup("Depth < 5m and > 2m"), "Depth < 5m and > 2m");
    assert_eq!(strip_markup("<b>Depth</b> < 5m"), "Depth < 5m");
}

#[test]
fn test_dataset_label_with_comparison_keeps_text() {
    let label = format_label(&SectionKind::Datasets, "ppm", &dataset("CO2 < 400 ppm readings"));
    assert_eq!(label.plain_text(), "CO2 < 400 ppm readings");
    assert_snapshot!(label.to_html(), @"CO2 &lt; 400 <strong>ppm</strong> readings");
}

#[test]
fn test_category_label_with_comparison_keeps_text() {
    let suggestion = Suggestion::new("Depth < 5m and > 2m", "/c2").with_kind("tag");
    let label = format_label(&SectionKind::Categories, "", &suggestion);
    assert_eq!(label.plain_text(), "Depth < 5m and > 2m (tag)");
}

#[test]
fn test_push_merges_adjacent_styles() {
    let mut label = Label::default();
    label.push("a", SpanStyle::Plain);
    label.push("b", SpanStyle::Plain);
    label.push("", SpanStyle::Emphasis);
    label.push("c", SpanStyle::Emphasis);
    assert_eq!(label.spans().len(), 2);
    assert_eq!(label.plain_text(), "abc");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Highlighting only adds structure, the visible text is untouched
    #[test]
    fn prop_highlight_preserves_text(
        text in "[a-zA-Z0-9 <>&;#\"'/().*+?|]{0,40}",
        query in "[a-zA-Z0-9 <>&;#\"'/().*+?|]{0,12}",
    ) {
        let label = highlight_terms(&text, &query);
        prop_assert_eq!(label.plain_text(), text);
    }

    #[test]
    fn prop_emphasized_spans_match_a_term(
        text in "[a-zA-Z0-9 <>&;#\"'/()]{0,40}",
        query in "[a-zA-Z0-9 <>&;#\"'/()]{0,12}",
    ) {
        let terms: Vec<String> = query.split_whitespace().map(|t| t.to_lowercase()).collect();
        let label = highlight_terms(&text, &query);
        for span in label.spans().iter().filter(|s| s.style == SpanStyle::Emphasis) {
            let lowered = span.text.to_lowercase();
            prop_assert!(
                terms.iter().any(|t| lowered.contains(t.as_str())),
                "span {:?} matches none of {:?}", span.text, terms
            );
        }
    }
}
