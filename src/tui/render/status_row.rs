use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, CalendarFocus, Mode, View};

use super::helpers::spans_width;

/// Key hints shown at the right of the status row
fn hints(app: &App) -> &'static str {
    match app.mode {
        Mode::Search => "Enter keep  Esc cancel",
        Mode::Move => "jk move  Enter drop  Esc cancel",
        Mode::Add => "Enter save  Esc cancel",
        Mode::Confirm => "y delete  n keep",
        Mode::Navigate => match (app.view, app.calendar_focus) {
            (View::List, _) => "a add  space toggle  d delete  m move  ? help",
            (View::Calendar, CalendarFocus::Grid) => "hjkl day  [ ] month  Tab agenda  ? help",
            (View::Calendar, CalendarFocus::Agenda) => "space toggle  d delete  Esc grid",
        },
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if app.mode == Mode::Search {
        // Search prompt: /pattern▌
        spans.push(Span::styled(
            format!("/{}", app.search),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    } else if app.mode == Mode::Move {
        spans.push(Span::styled(
            "MOVE",
            Style::default().fg(app.theme.yellow).bg(bg),
        ));
    } else if let Some(msg) = &app.status_message {
        let color = if app.status_is_error {
            app.theme.red
        } else {
            app.theme.green
        };
        spans.push(Span::styled(msg.clone(), Style::default().fg(color).bg(bg)));
    }

    if app.show_key_hints || app.mode != Mode::Navigate {
        let hint = hints(app);
        let content_width = spans_width(&spans);
        let hint_width = hint.chars().count();
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
