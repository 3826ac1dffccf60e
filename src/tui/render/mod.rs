pub mod add_form;
pub mod calendar_view;
pub mod confirm_popup;
pub mod help_overlay;
pub mod helpers;
pub mod list_view;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use crate::ops::filter::match_ranges;

use super::app::{App, Mode, View};

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::List => list_view::render_list_view(frame, app, chunks[1]),
        View::Calendar => calendar_view::render_calendar_view(frame, app, chunks[1]),
    }

    // Popups (rendered on top of content)
    match app.mode {
        Mode::Add => add_form::render_add_form(frame, app, frame.area()),
        Mode::Confirm => confirm_popup::render_confirm_popup(frame, app, frame.area()),
        _ => {}
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with search match highlighting. With no search or no
/// matches, pushes a single span with `base_style`.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search: &str,
) {
    let ranges = match_ranges(text, search);
    if ranges.is_empty() {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    }

    let mut last_end = 0;
    for m in ranges {
        if m.start > last_end {
            spans.push(Span::styled(text[last_end..m.start].to_string(), base_style));
        }
        spans.push(Span::styled(text[m.clone()].to_string(), highlight_style));
        last_end = m.end;
    }
    if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
