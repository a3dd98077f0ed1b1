use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};
use reqwest::Url;
use tokio::sync::mpsc::UnboundedReceiver;
use tui_textarea::TextArea;

use crate::config::Config;
use crate::controller::{Controller, UiEvent, Wakeup};
use crate::fetch::{SuggestionFetcher, resolve_href};
use crate::view::{DropdownModel, Focus};

/// Application state
pub struct App {
    pub input: TextArea<'static>,
    pub controller: Controller<DropdownModel>,
    site: Url,
    should_quit: bool,
    /// Resolved URL the user chose, set when the controller navigates
    target: Option<String>,
    /// Input area from the last render, for mouse hit-testing
    pub(super) input_area: Rect,
    /// Screen line of each rendered dropdown row, by flat index
    pub(super) row_areas: Vec<(Rect, usize)>,
}

impl App {
    pub fn new(
        config: &Config,
        site: Url,
        fetcher: Arc<dyn SuggestionFetcher>,
    ) -> (Self, UnboundedReceiver<Wakeup>) {
        let mut input = TextArea::default();
        input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        // Remove default underline from cursor line
        input.set_cursor_line_style(Style::default());

        let (controller, wakeups) =
            Controller::attach(config.autocomplete.clone(), DropdownModel::new(), fetcher);

        let app = Self {
            input,
            controller,
            site,
            should_quit: false,
            target: None,
            input_area: Rect::default(),
            row_areas: Vec::new(),
        };
        (app, wakeups)
    }

    pub fn query(&self) -> &str {
        self.input.lines()[0].as_str()
    }

    pub fn site(&self) -> &Url {
        &self.site
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn take_target(&mut self) -> Option<String> {
        self.target.take()
    }

    pub fn focus(&self) -> Focus {
        self.controller.view().focus()
    }

    /// Move focus, emitting the blur/focus events a browser would
    pub(super) fn move_focus(&mut self, focus: Focus) {
        let previous = self.focus();
        if previous == focus {
            return;
        }

        self.controller.view_mut().set_focus(focus);
        let focus = self.focus();

        // Leaving the dropdown for elsewhere counts as a blur as well
        if previous == Focus::Input || focus == Focus::Outside {
            self.controller.handle(UiEvent::InputBlur);
        }
        match focus {
            Focus::Input => {
                self.controller.handle(UiEvent::InputFocus);
            }
            Focus::Dropdown(_) if !matches!(previous, Focus::Dropdown(_)) => {
                self.controller.handle(UiEvent::DropdownFocus);
            }
            _ => {}
        }
    }

    /// Deliver a timer firing or request completion
    pub fn on_wakeup(&mut self, wakeup: Wakeup) {
        self.controller.on_wakeup(wakeup);
        self.check_navigation();
    }

    /// Navigation leaves the session with the chosen URL
    pub(super) fn check_navigation(&mut self) {
        if let Some(href) = self.controller.view_mut().take_navigation() {
            let url = resolve_href(&self.site, &href);
            log::info!("Navigating to {}", url);
            self.target = Some(url);
            self.should_quit = true;
        }
    }
}
