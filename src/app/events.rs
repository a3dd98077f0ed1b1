use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use super::state::App;
use crate::controller::{Key, KeyOutcome, UiEvent};
use crate::view::Focus;

/// Map a terminal key code onto the keys the controller distinguishes
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

/// Keys the single-line input edits with; everything else is left to the dropdown
fn edits_input(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End
    )
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}

impl App {
    /// Route one terminal event
    pub fn handle_terminal_event(&mut self, event: Event) {
        match event {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Paste(text) => self.handle_paste_event(text),
            Event::FocusLost => self.move_focus(Focus::Outside),
            Event::FocusGained => self.move_focus(Focus::Input),
            _ => {}
        }
        self.check_navigation();
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl+C: Exit application
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.focus() {
            Focus::Input => self.handle_input_key(key),
            Focus::Dropdown(index) => self.handle_dropdown_key(key, index),
            Focus::Outside => {
                // Any key brings focus back to the input
                self.move_focus(Focus::Input);
                self.handle_input_key(key);
            }
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            if self.controller.view().row_count() > 0 {
                self.move_focus(Focus::Dropdown(0));
            }
            return;
        }

        let mapped = map_key(key.code);
        let outcome = self.controller.handle(UiEvent::InputKeyDown { key: mapped });
        if outcome == KeyOutcome::Ignored && edits_input(key.code) {
            self.input.input(key);
        }

        let value = self.query().to_string();
        self.controller.handle(UiEvent::InputKeyUp { key: mapped, value });
    }

    fn handle_dropdown_key(&mut self, key: KeyEvent, index: usize) {
        let mapped = map_key(key.code);
        if self.controller.handle(UiEvent::DropdownKeyDown { key: mapped }) == KeyOutcome::Handled
        {
            // Escape hands focus back to the input
            if self.focus() == Focus::Input {
                self.controller.handle(UiEvent::InputFocus);
            }
            return;
        }

        let rows = self.controller.view().row_count();
        match key.code {
            KeyCode::Enter => self.controller.follow_row(index),
            KeyCode::Down if index + 1 < rows => self.move_focus(Focus::Dropdown(index + 1)),
            KeyCode::Up | KeyCode::BackTab if index == 0 => self.move_focus(Focus::Input),
            KeyCode::Up | KeyCode::BackTab => self.move_focus(Focus::Dropdown(index - 1)),
            KeyCode::Tab if index + 1 < rows => self.move_focus(Focus::Dropdown(index + 1)),
            KeyCode::Tab => self.move_focus(Focus::Input),
            code if edits_input(code) => {
                // Typing while on a row goes to the input
                self.move_focus(Focus::Input);
                self.handle_input_key(key);
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let row = self
            .row_areas
            .iter()
            .find(|(area, _)| contains(*area, mouse.column, mouse.row))
            .map(|(_, index)| *index);

        if let Some(index) = row {
            self.move_focus(Focus::Dropdown(index));
            self.controller.follow_row(index);
        } else if contains(self.input_area, mouse.column, mouse.row) {
            self.move_focus(Focus::Input);
        } else {
            self.move_focus(Focus::Outside);
        }
    }

    /// Insert pasted text as a single line
    pub fn handle_paste_event(&mut self, text: String) {
        if self.focus() != Focus::Input {
            self.move_focus(Focus::Input);
        }
        let line = text.replace(['\r', '\n'], " ");
        self.input.insert_str(line);

        let value = self.query().to_string();
        self.controller.handle(UiEvent::InputKeyUp {
            key: Key::Other,
            value,
        });
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
