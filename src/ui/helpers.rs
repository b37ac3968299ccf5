use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Footer key legend: each `(key, action)` pair becomes a highlighted key
/// followed by its description.
pub(crate) fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (idx, (key, action)) in hints.iter().enumerate() {
        spans.push(Span::styled(*key, key_style));
        if idx + 1 == hints.len() {
            spans.push(Span::raw(format!(" {action}")));
        } else {
            spans.push(Span::raw(format!(" {action}   ")));
        }
    }
    Line::from(spans)
}

/// Column `len` characters to the right of `origin`, pinned to the last
/// addressable column instead of wrapping.
pub(crate) fn cursor_column(origin: u16, len: usize) -> u16 {
    origin.saturating_add(u16::try_from(len).unwrap_or(u16::MAX))
}
