//! Dropdown view boundary
//!
//! The controller never touches widgets directly. It drives a
//! [`DropdownView`], which owns the rows, the selection marker, visibility,
//! focus and the navigation side effect. [`DropdownModel`] is the in-memory
//! implementation the terminal UI renders from.

use crate::error::SetupError;
use crate::label::Label;
use crate::suggestion::SectionKind;

/// One rendered dropdown row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: Label,
    pub href: String,
}

/// Rows rendered for one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub kind: SectionKind,
    pub rows: Vec<Row>,
}

/// Where keyboard focus currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    /// A dropdown row, by flat index
    Dropdown(usize),
    /// Anywhere outside the input and the dropdown
    Outside,
}

pub trait DropdownView {
    /// Report missing attachment points; checked once when the controller attaches
    fn attachment(&self) -> Result<(), SetupError> {
        Ok(())
    }

    /// A suggestion request is outstanding
    fn set_pending(&mut self, pending: bool);

    /// The dropdown has content and should be shown
    fn set_active(&mut self, active: bool);

    /// Replace the rows of one section
    fn render_section(&mut self, section: &SectionKind, rows: Vec<Row>);

    fn clear_rows(&mut self);

    /// Move the selection marker to a flat row index, or clear it
    fn mark_selected(&mut self, index: Option<usize>);

    fn focus_input(&mut self);

    /// Whether focus is on the input or anywhere inside the dropdown
    fn focus_within(&self) -> bool;

    /// Leave for the given target
    fn navigate(&mut self, href: &str);
}

/// In-memory dropdown state
#[derive(Debug, Clone, Default)]
pub struct DropdownModel {
    sections: Vec<RenderedSection>,
    selected: Option<usize>,
    active: bool,
    pending: bool,
    focus: Focus,
    navigation: Option<String>,
}

impl DropdownModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[RenderedSection] {
        &self.sections
    }

    /// All rows in section order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows().nth(index)
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_visible(&self) -> bool {
        self.active
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Move focus; the host calls this for Tab, clicks and the like
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = match focus {
            Focus::Dropdown(index) if index >= self.row_count() => Focus::Input,
            other => other,
        };
    }

    /// Navigation target requested by the controller, if any
    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }

    pub fn take_navigation(&mut self) -> Option<String> {
        self.navigation.take()
    }
}

impl DropdownView for DropdownModel {
    fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn render_section(&mut self, section: &SectionKind, rows: Vec<Row>) {
        if let Some(existing) = self.sections.iter_mut().find(|s| &s.kind == section) {
            existing.rows = rows;
        } else {
            // Keep regions in declaration order
            let at = self
                .sections
                .iter()
                .position(|s| s.kind.rank() > section.rank())
                .unwrap_or(self.sections.len());
            self.sections.insert(
                at,
                RenderedSection {
                    kind: section.clone(),
                    rows,
                },
            );
        }

        // A focused row that no longer exists hands focus back to the input
        if let Focus::Dropdown(index) = self.focus
            && index >= self.row_count()
        {
            self.focus = Focus::Input;
        }
    }

    fn clear_rows(&mut self) {
        for section in &mut self.sections {
            section.rows.clear();
        }
        // A focused row that disappears drops focus entirely
        if matches!(self.focus, Focus::Dropdown(_)) {
            self.focus = Focus::Outside;
        }
    }

    fn mark_selected(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    fn focus_within(&self) -> bool {
        self.focus != Focus::Outside
    }

    fn navigate(&mut self, href: &str) {
        self.navigation = Some(href.to_string());
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod view_tests;
