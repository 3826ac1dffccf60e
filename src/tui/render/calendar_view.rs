use chrono::Datelike;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::calendar::{DayCell, WEEKDAY_LABELS};
use crate::tui::app::{App, CalendarFocus};
use crate::util::unicode;

use super::helpers::{check_symbol, spans_width};
use super::push_highlighted_spans;

/// Rows used by the month grid: header, weekday labels, six weeks of two rows
const GRID_ROWS: u16 = 2 + 6 * 2;

/// Render the calendar view: month grid on top, agenda of the selected day below
pub fn render_calendar_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(GRID_ROWS), Constraint::Min(0)])
        .split(area);

    render_grid(frame, app, chunks[0]);
    render_agenda(frame, app, chunks[1]);
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let grid = app.grid();
    let cell_w = (area.width as usize / 7).max(3);

    let mut lines: Vec<Line> = Vec::new();

    // Header: ◂ March 2024 ▸  (n due)
    let due = grid.due_in_month();
    lines.push(Line::from(vec![
        Span::styled(" \u{25C2} ", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(
            grid.month.label(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" \u{25B8}", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(
            if due > 0 { format!("  {} due", due) } else { String::new() },
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]));

    lines.push(Line::from(
        WEEKDAY_LABELS
            .iter()
            .map(|label| {
                Span::styled(
                    unicode::fit_to_width(&format!(" {}", label), cell_w),
                    Style::default().fg(app.theme.purple).bg(bg),
                )
            })
            .collect::<Vec<_>>(),
    ));

    for week in grid.weeks() {
        let mut top: Vec<Span> = Vec::new();
        let mut bottom: Vec<Span> = Vec::new();
        for cell in week {
            let (day, detail) = render_cell(app, cell, cell_w);
            top.push(day);
            bottom.push(detail);
        }
        lines.push(Line::from(top));
        lines.push(Line::from(bottom));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Day number on the first row, the first due title (or a count) on the second
fn render_cell<'a>(app: &App, cell: &DayCell, cell_w: usize) -> (Span<'a>, Span<'a>) {
    let is_selected = cell.date == app.selected_day;
    let is_today = cell.date == app.today;
    let bg = if is_selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let mut day_style = Style::default().bg(bg).fg(if cell.in_month {
        app.theme.text
    } else {
        app.theme.dim
    });
    if is_today {
        day_style = day_style
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD);
    }
    let day = Span::styled(
        unicode::fit_to_width(&format!(" {:>2}", cell.date.day()), cell_w),
        day_style,
    );

    let open = cell.todos.iter().filter(|t| !t.completed).count();
    let text = match cell.todos.as_slice() {
        [] => String::new(),
        [only] => format!(" {}", only.title),
        many => format!(" {} due", many.len()),
    };
    let detail_color = if open == 0 {
        app.theme.dim
    } else if cell.date < app.today {
        app.theme.red
    } else {
        app.theme.cyan
    };
    let detail = Span::styled(
        unicode::fit_to_width(&text, cell_w),
        Style::default().fg(detail_color).bg(bg),
    );
    (day, detail)
}

fn render_agenda(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let todos = app.agenda_todos();
    let focused = app.calendar_focus == CalendarFocus::Agenda;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(" {}", app.selected_day.format("%A, %B %-d")),
        Style::default()
            .fg(if focused { app.theme.text_bright } else { app.theme.text })
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));

    if todos.is_empty() {
        lines.push(Line::from(Span::styled(
            "   nothing due",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    // Keep the cursor on screen below the day heading
    let height = (area.height as usize).saturating_sub(1);
    if app.agenda_cursor < app.agenda_scroll {
        app.agenda_scroll = app.agenda_cursor;
    } else if height > 0 && app.agenda_cursor >= app.agenda_scroll + height {
        app.agenda_scroll = app.agenda_cursor + 1 - height;
    }

    let width = area.width as usize;
    for (i, todo) in todos.iter().enumerate().skip(app.agenda_scroll).take(height) {
        let is_cursor = focused && i == app.agenda_cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
        let overdue = todo.due.is_some_and(|d| d.date() < app.today);
        let time = todo
            .due
            .map(|d| d.format("%H:%M").to_string())
            .unwrap_or_default();

        let mut spans = vec![
            Span::styled(
                if is_cursor { " \u{25B8} " } else { "   " },
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ),
            Span::styled(
                format!("{} ", check_symbol(todo.completed)),
                Style::default().fg(app.theme.text).bg(row_bg),
            ),
            Span::styled(
                format!("{} ", time),
                Style::default()
                    .fg(app.theme.due_color(todo.completed, overdue))
                    .bg(row_bg),
            ),
        ];
        let title_style = Style::default()
            .fg(app.theme.todo_color(todo.completed))
            .bg(row_bg);
        let hl_style = Style::default()
            .fg(app.theme.search_match_fg)
            .bg(app.theme.search_match_bg);
        push_highlighted_spans(&mut spans, &todo.title, title_style, hl_style, &app.search);

        if is_cursor {
            let used = spans_width(&spans);
            if used < width {
                spans.push(Span::styled(
                    " ".repeat(width - used),
                    Style::default().bg(row_bg),
                ));
            }
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
