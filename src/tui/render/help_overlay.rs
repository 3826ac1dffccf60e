use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, View};

use super::helpers::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;

    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    // Context-sensitive help
    match app.view {
        View::List => {
            lines.push(Line::from(Span::styled(" List", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
            add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
            add_binding(&mut lines, " Space/x", "Toggle done", key_style, desc_style);
            add_binding(&mut lines, " d", "Delete", key_style, desc_style);
            add_binding(&mut lines, " m", "Move (Enter to drop)", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Clear search", key_style, desc_style);
        }
        View::Calendar => {
            lines.push(Line::from(Span::styled(" Calendar", header_style)));
            add_binding(&mut lines, " \u{2190}\u{2192}/hl", "Previous/next day", key_style, desc_style);
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Previous/next week", key_style, desc_style);
            add_binding(&mut lines, " [ ]", "Previous/next month", key_style, desc_style);
            add_binding(&mut lines, " t", "Today", key_style, desc_style);
            add_binding(&mut lines, " Tab", "Focus day agenda", key_style, desc_style);
            add_binding(&mut lines, " Space/x d", "Toggle / delete in agenda", key_style, desc_style);
        }
    }
    lines.push(Line::from(""));

    // Global keys
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " a", "Add todo", key_style, desc_style);
    add_binding(&mut lines, " /", "Search", key_style, desc_style);
    add_binding(&mut lines, " f", "Cycle filter", key_style, desc_style);
    add_binding(&mut lines, " 1/2/3", "All / active / completed", key_style, desc_style);
    add_binding(&mut lines, " v", "Switch list/calendar", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{app_with_todos, render_to_string};

    #[test]
    fn help_follows_view() {
        let mut app = app_with_todos(&[]);
        let out = render_to_string(100, 40, |frame, area| render_help_overlay(frame, &app, area));
        assert!(out.contains("Previous/next month"));
        assert!(!out.contains("Move (Enter to drop)"));

        app.view = View::List;
        let out = render_to_string(100, 40, |frame, area| render_help_overlay(frame, &app, area));
        assert!(out.contains("Move (Enter to drop)"));
        assert!(out.contains("Switch list/calendar"));
    }
}
