//! Suggestion data model
//!
//! Sectioned suggestion results as returned by the autocomplete endpoint,
//! plus the flattened list that keyboard navigation indexes into.

use std::fmt;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

/// Wire key of the free-text section
pub const DATASETS_KEY: &str = "datasets";
/// Wire key of the categorical section
pub const CATEGORIES_KEY: &str = "categories";

/// A single suggestion row
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    /// Raw label, possibly carrying markup
    #[serde(default)]
    pub label: String,
    /// Navigation target
    #[serde(default)]
    pub href: String,
    /// Subtype label, only meaningful for categorical suggestions
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Suggestion {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// Named group of suggestions rendered in its own dropdown region
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Free-text matches (dataset titles)
    Datasets,
    /// Categorical matches (tags, organisations, formats)
    Categories,
    /// Any other section the backend chooses to return
    Other(String),
}

impl SectionKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            DATASETS_KEY => SectionKind::Datasets,
            CATEGORIES_KEY => SectionKind::Categories,
            other => SectionKind::Other(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            SectionKind::Datasets => DATASETS_KEY,
            SectionKind::Categories => CATEGORIES_KEY,
            SectionKind::Other(key) => key,
        }
    }

    /// Human readable region title
    pub fn title(&self) -> &str {
        match self {
            SectionKind::Datasets => "Datasets",
            SectionKind::Categories => "Categories",
            SectionKind::Other(key) => key,
        }
    }

    /// Position in declaration order; unknown sections keep response order after the known ones
    pub(crate) fn rank(&self) -> u8 {
        match self {
            SectionKind::Datasets => 0,
            SectionKind::Categories => 1,
            SectionKind::Other(_) => 2,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One section of a result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub items: Vec<Suggestion>,
}

/// Sectioned suggestions from one successful fetch
///
/// Sections are kept in declaration order: datasets, categories, then any
/// other section in the order the response listed it. The two known
/// sections are always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSet {
    sections: Vec<Section>,
}

impl Default for SuggestionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionSet {
    /// Empty set with both known sections present
    pub fn new() -> Self {
        Self {
            sections: vec![
                Section {
                    kind: SectionKind::Datasets,
                    items: Vec::new(),
                },
                Section {
                    kind: SectionKind::Categories,
                    items: Vec::new(),
                },
            ],
        }
    }

    /// Build a set from `(section, items)` pairs
    ///
    /// A section listed twice keeps the later items.
    pub fn from_sections<I>(sections: I) -> Self
    where
        I: IntoIterator<Item = (SectionKind, Vec<Suggestion>)>,
    {
        let mut set = Self::new();
        for (kind, items) in sections {
            set.insert(kind, items);
        }
        // Stable sort keeps response order among unknown sections
        set.sections.sort_by_key(|section| section.kind.rank());
        set
    }

    fn insert(&mut self, kind: SectionKind, items: Vec<Suggestion>) {
        match self.sections.iter_mut().find(|s| s.kind == kind) {
            Some(section) => section.items = items,
            None => self.sections.push(Section { kind, items }),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn get(&self, kind: &SectionKind) -> Option<&[Suggestion]> {
        self.sections
            .iter()
            .find(|s| &s.kind == kind)
            .map(|s| s.items.as_slice())
    }

    /// Total number of suggestions across all sections
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate all sections in declaration order
    pub fn flatten(&self) -> Vec<Suggestion> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter().cloned())
            .collect()
    }
}

impl<'de> Deserialize<'de> for SuggestionSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = SuggestionSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of section name to suggestion list")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut sections = Vec::new();
                while let Some((key, items)) = map.next_entry::<String, Option<Vec<Suggestion>>>()? {
                    sections.push((SectionKind::from_key(&key), items.unwrap_or_default()));
                }
                Ok(SuggestionSet::from_sections(sections))
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}

#[cfg(test)]
#[path = "suggestion_tests.rs"]
mod suggestion_tests;
