use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::dropdown_render;
use super::state::App;
use crate::view::Focus;

const INPUT_HEIGHT: u16 = 3;

const HINTS: &[(&str, &str)] = &[
    ("↑/↓", "select"),
    ("Enter", "open"),
    ("Tab", "rows"),
    ("Esc", "dismiss"),
    ("Ctrl+C", "quit"),
];

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let [header_area, input_area, body_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header_area);
        self.render_input(frame, input_area);
        render_hints(frame, hints_area);

        self.input_area = input_area;
        self.row_areas = if self.controller.view().is_visible() {
            let bounds = input_area.union(body_area);
            dropdown_render::render_popup(self.controller.view(), frame, input_area, bounds)
        } else {
            Vec::new()
        };
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                " search-suggest ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.site().as_str(), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_input(&mut self, frame: &mut Frame, area: Rect) {
        let view = self.controller.view();
        let border_color = if view.focus() == Focus::Input {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let title = if view.is_pending() {
            " Search (fetching…) "
        } else {
            " Search "
        };

        self.input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_color)),
        );
        frame.render_widget(&self.input, area);
    }
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (key, action) in HINTS {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!("{}  ", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
