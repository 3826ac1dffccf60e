use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Todo;
use crate::ops::due::format_due;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::{check_symbol, spans_width};
use super::push_highlighted_spans;

/// Render the list view: the filtered todos in collection order
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let todos = app.visible_todos();

    if todos.is_empty() {
        let msg = if app.store.snapshot().is_empty() {
            " No todos yet. Press a to add one."
        } else {
            " Nothing matches"
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            msg,
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .style(Style::default().bg(bg));
        frame.render_widget(paragraph, area);
        return;
    }

    // Keep the cursor on screen
    let height = area.height as usize;
    if app.list_cursor < app.list_scroll {
        app.list_scroll = app.list_cursor;
    } else if height > 0 && app.list_cursor >= app.list_scroll + height {
        app.list_scroll = app.list_cursor + 1 - height;
    }

    let moving = app.mode == Mode::Move;
    let lines: Vec<Line> = todos
        .iter()
        .enumerate()
        .skip(app.list_scroll)
        .take(height)
        .map(|(i, todo)| render_todo_line(app, todo, i == app.list_cursor, moving, area.width))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn render_todo_line<'a>(
    app: &App,
    todo: &Todo,
    is_cursor: bool,
    moving: bool,
    width: u16,
) -> Line<'a> {
    let width = width as usize;
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let mut spans: Vec<Span> = Vec::new();

    // Cursor marker (↕ while moving)
    let marker = match (is_cursor, moving) {
        (true, true) => "\u{2195}",
        (true, false) => "\u{25B8}",
        _ => " ",
    };
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        marker,
        Style::default().fg(app.theme.highlight).bg(bg),
    ));
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        check_symbol(todo.completed),
        Style::default()
            .fg(if todo.completed { app.theme.green } else { app.theme.text })
            .bg(bg),
    ));
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    let due_text = todo.due.map(format_due);
    let due_width = due_text.as_deref().map_or(0, |d| unicode::display_width(d) + 2);
    let title_room = width.saturating_sub(spans_width(&spans) + due_width + 1);
    let title = unicode::truncate_to_width(&todo.title, title_room);

    let mut title_style = Style::default().fg(app.theme.todo_color(todo.completed)).bg(bg);
    if todo.completed {
        title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
    }
    if is_cursor && !todo.completed {
        title_style = title_style.fg(app.theme.text_bright);
    }
    let hl_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    push_highlighted_spans(&mut spans, &title, title_style, hl_style, &app.search);

    if let (Some(due), Some(text)) = (todo.due, due_text) {
        let overdue = due.date() < app.today;
        let pad = width.saturating_sub(spans_width(&spans) + unicode::display_width(&text) + 1);
        spans.push(Span::styled(" ".repeat(pad.max(2)), Style::default().bg(bg)));
        spans.push(Span::styled(
            text,
            Style::default()
                .fg(app.theme.due_color(todo.completed, overdue))
                .bg(bg),
        ));
    }

    // Pad to full width for cursor
    if is_cursor {
        let content_width = spans_width(&spans);
        if content_width < width {
            spans.push(Span::styled(
                " ".repeat(width - content_width),
                Style::default().bg(bg),
            ));
        }
    }

    Line::from(spans)
}
