//! Suggestion list state
//!
//! Holds the last rendered result set, its flattened form and the keyboard
//! cursor. Position 0 means the input owns the selection; position `k`
//! selects the `k-1`th flat suggestion.

use crate::label::format_label;
use crate::suggestion::{Suggestion, SuggestionSet};
use crate::view::{DropdownView, Row};

#[derive(Debug, Default)]
pub struct SuggestionListState {
    set: SuggestionSet,
    flat: Vec<Suggestion>,
    position: usize,
}

impl SuggestionListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the result set and re-render every section it contains
    pub fn rebuild<V: DropdownView>(&mut self, set: SuggestionSet, query: &str, view: &mut V) {
        self.set_position(0, view);
        self.flat = set.flatten();
        view.set_active(!self.flat.is_empty());

        for section in set.sections() {
            let rows = section
                .items
                .iter()
                .map(|item| Row {
                    label: format_label(&section.kind, query, item),
                    href: item.href.clone(),
                })
                .collect();
            view.render_section(&section.kind, rows);
        }

        log::debug!("Rendered {} suggestions for {:?}", self.flat.len(), query);
        self.set = set;
    }

    /// Back to the initial empty state
    pub fn reset<V: DropdownView>(&mut self, view: &mut V) {
        self.set_position(0, view);
        self.set = SuggestionSet::new();
        self.flat.clear();
        view.clear_rows();
        view.set_active(false);
    }

    /// Move the cursor by `step`, wrapping over `0..=N`
    pub fn cycle<V: DropdownView>(&mut self, step: isize, view: &mut V) {
        let modulus = self.flat.len() as i64 + 1;
        let next = (self.position as i64 + step as i64).rem_euclid(modulus);
        self.set_position(next as usize, view);
    }

    fn set_position<V: DropdownView>(&mut self, position: usize, view: &mut V) {
        self.position = position;
        view.mark_selected(position.checked_sub(1));
    }

    /// Suggestion under the cursor, if any
    pub fn pick_active(&self) -> Option<&Suggestion> {
        if self.position == 0 {
            return None;
        }

        let index = self.position - 1;
        let suggestion = self.flat.get(index);
        if suggestion.is_none() {
            log::error!(
                "Index {} is out of bounds for {} suggestions",
                index,
                self.flat.len()
            );
        }
        suggestion
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.flat
    }

    pub fn set(&self) -> &SuggestionSet {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }
}

#[cfg(test)]
#[path = "list_state_tests.rs"]
mod list_state_tests;
