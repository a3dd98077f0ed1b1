//! Dropdown popup rendering
//!
//! Draws the rendered sections under the input: a title line per non-empty
//! section, then its rows. The selection marker gets the high-contrast
//! style and the row holding keyboard focus gets a softer one.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::label::{Label, SpanStyle};
use crate::view::{DropdownModel, Focus, Row};
use crate::widgets::popup;

const MAX_POPUP_HEIGHT: u16 = 20;
const POPUP_BORDER: u16 = 1;
const ROW_PREFIX_WIDTH: usize = 2;

/// Render the dropdown below the input
///
/// Returns the screen area of each visible row with its flat index.
pub fn render_popup(
    view: &DropdownModel,
    frame: &mut Frame,
    input_area: Rect,
    bounds: Rect,
) -> Vec<(Rect, usize)> {
    let selected = view.selected();
    let focused = match view.focus() {
        Focus::Dropdown(index) => Some(index),
        _ => None,
    };
    let label_width = (input_area.width.saturating_sub(POPUP_BORDER * 2) as usize)
        .saturating_sub(ROW_PREFIX_WIDTH);

    let mut lines = Vec::new();
    // (line offset, flat row index)
    let mut row_lines = Vec::new();
    let mut index = 0;
    for section in view.sections() {
        if section.rows.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(
            section.kind.title().to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )));
        for row in &section.rows {
            row_lines.push((lines.len(), index));
            lines.push(row_line(
                row,
                selected == Some(index),
                focused == Some(index),
                label_width,
            ));
            index += 1;
        }
    }
    if lines.is_empty() {
        return Vec::new();
    }

    let wanted = (lines.len() as u16).saturating_add(POPUP_BORDER * 2);
    let popup_area = popup::popup_below_anchor(
        input_area,
        bounds,
        wanted.min(MAX_POPUP_HEIGHT),
    );
    let visible = popup_area.height.saturating_sub(POPUP_BORDER * 2) as usize;
    if visible == 0 {
        return Vec::new();
    }

    // Keep the selected (or focused) row on screen
    let anchor_line = selected
        .or(focused)
        .and_then(|target| row_lines.iter().find(|(_, i)| *i == target))
        .map(|(line, _)| *line)
        .unwrap_or(0);
    let offset = (anchor_line + 1).saturating_sub(visible);

    popup::clear_area(frame, popup_area);
    let paragraph = Paragraph::new(lines.into_iter().skip(offset).take(visible).collect::<Vec<_>>())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Suggestions ")
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(paragraph, popup_area);

    row_lines
        .into_iter()
        .filter(|(line, _)| *line >= offset && *line < offset + visible)
        .map(|(line, index)| {
            let area = Rect {
                x: popup_area.x + POPUP_BORDER,
                y: popup_area.y + POPUP_BORDER + (line - offset) as u16,
                width: popup_area.width.saturating_sub(POPUP_BORDER * 2),
                height: 1,
            };
            (area, index)
        })
        .collect()
}

fn row_line(row: &Row, selected: bool, focused: bool, width: usize) -> Line<'static> {
    let (prefix, base) = if selected {
        (
            "► ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else if focused {
        ("▸ ", Style::default().fg(Color::White).bg(Color::DarkGray))
    } else {
        ("  ", Style::default().fg(Color::White))
    };

    let mut spans = vec![Span::styled(prefix, base)];
    spans.extend(label_spans(&row.label, base, selected, width));
    Line::from(spans)
}

/// Styled spans for a label, cut with an ellipsis when wider than `width`
pub(super) fn label_spans(
    label: &Label,
    base: Style,
    selected: bool,
    width: usize,
) -> Vec<Span<'static>> {
    let total: usize = label.spans().iter().map(|s| s.text.width()).sum();
    let overflow = total > width;
    let mut remaining = if overflow {
        width.saturating_sub(1)
    } else {
        width
    };

    let mut spans = Vec::new();
    for span in label.spans() {
        if remaining == 0 {
            break;
        }
        let text = take_width(&span.text, remaining);
        remaining -= text.width();
        spans.push(Span::styled(
            text.to_string(),
            base.patch(span_style(span.style, selected)),
        ));
    }
    if overflow && width > 0 {
        spans.push(Span::styled("…", base));
    }
    spans
}

fn span_style(style: SpanStyle, selected: bool) -> Style {
    match (style, selected) {
        (SpanStyle::Plain, _) => Style::default(),
        (SpanStyle::Emphasis, true) => Style::default().add_modifier(Modifier::UNDERLINED),
        (SpanStyle::Emphasis, false) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        (SpanStyle::Muted, true) => Style::default().add_modifier(Modifier::ITALIC),
        (SpanStyle::Muted, false) => Style::default().fg(Color::DarkGray),
    }
}

/// Longest prefix of `text` whose display width fits in `max_width`
pub(super) fn take_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (offset, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            return &text[..offset];
        }
        used += w;
    }
    text
}

#[cfg(test)]
#[path = "dropdown_render_tests.rs"]
mod dropdown_render_tests;
