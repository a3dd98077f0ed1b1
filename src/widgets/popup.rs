use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Area directly under `anchor`, clamped to the space left in `bounds`
pub fn popup_below_anchor(anchor: Rect, bounds: Rect, height: u16) -> Rect {
    let popup_y = anchor.y.saturating_add(anchor.height);
    let available = bounds.bottom().saturating_sub(popup_y);

    Rect {
        x: anchor.x,
        y: popup_y,
        width: anchor.width,
        height: height.min(available),
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
