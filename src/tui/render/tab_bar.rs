use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::StatusFilter;
use crate::tui::app::{App, View};

use super::helpers::spans_width;

/// Render the tab bar: docket name + view tabs, with separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Split into tab row and separator row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    // Leading icon + docket name
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        "\u{25B6}",
        Style::default().fg(app.theme.purple).bg(bg),
    ));
    spans.push(Span::styled(
        format!(" {} ", app.docket_name),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    sep_cols.push(spans_width(&spans));
    spans.push(sep.clone());

    for (view, label) in [(View::List, "List"), (View::Calendar, "Calendar")] {
        spans.push(Span::styled(
            format!(" {} ", label),
            tab_style(app, app.view == view),
        ));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    let line = Line::from(spans);
    let tabs = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(tabs, area);
    sep_cols
}

/// Separator line with the filter counts (and any search) on the right
fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let bg = app.theme.background;
    let dim = app.theme.dim;

    let counts = app.counts();
    let mut indicator: Vec<Span> = Vec::new();
    if !app.search.is_empty() {
        indicator.push(Span::styled(
            format!("/{} ", app.search),
            Style::default().fg(app.theme.search_match_bg).bg(bg),
        ));
    }
    for (i, filter) in [StatusFilter::All, StatusFilter::Active, StatusFilter::Completed]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            indicator.push(Span::styled(" ", Style::default().bg(bg)));
        }
        let style = if app.filter == filter {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(dim).bg(bg)
        };
        indicator.push(Span::styled(
            format!("{} {}", filter, counts.get(filter)),
            style,
        ));
    }

    // +2: one space before indicator, one space after (right edge buffer)
    let indicator_width = spans_width(&indicator);
    let separator_end = if indicator_width + 2 < width {
        width - indicator_width - 2
    } else {
        indicator.clear();
        width
    };

    let sep_text: String = (0..separator_end)
        .map(|col| {
            if sep_cols.contains(&col) {
                '\u{2534}'
            } else {
                '\u{2500}'
            }
        })
        .collect();
    let mut spans = vec![Span::styled(sep_text, Style::default().fg(dim).bg(bg))];
    if !indicator.is_empty() {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        spans.extend(indicator);
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    let sep_widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
