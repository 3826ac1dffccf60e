use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{AddField, AddForm, App};

use super::helpers::centered_rect_fixed;

const LABEL_WIDTH: usize = 8;

/// Render the new-todo popup
pub fn render_add_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.add_form else {
        return;
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" New todo", header_style)));
    lines.push(Line::from(""));
    lines.push(field_line(app, form, AddField::Title, "Title", ""));
    lines.push(field_line(app, form, AddField::Due, "Due", "YYYY-MM-DD [HH:MM]"));
    lines.push(Line::from(""));

    match &form.error {
        Some(err) => lines.push(Line::from(Span::styled(
            format!("  {}", err),
            Style::default().fg(app.theme.red).bg(bg),
        ))),
        None => lines.push(Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("Enter", dim_style),
            Span::styled(" save  ", text_style),
            Span::styled("Tab", dim_style),
            Span::styled(" next field  ", text_style),
            Span::styled("Esc", dim_style),
            Span::styled(" cancel", text_style),
        ])),
    }

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

/// `  Title:  text▌more` with a block cursor on the focused field
fn field_line<'a>(
    app: &App,
    form: &AddForm,
    field: AddField,
    label: &str,
    placeholder: &'a str,
) -> Line<'a> {
    let bg = app.theme.background;
    let focused = form.field == field;
    let value = match field {
        AddField::Title => &form.title,
        AddField::Due => &form.due,
    };

    let label_style = if focused {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let value_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);

    let mut spans = vec![Span::styled(
        format!("  {:<width$}", format!("{}:", label), width = LABEL_WIDTH),
        label_style,
    )];
    if focused {
        let cursor = form.cursor.min(value.len());
        spans.push(Span::styled(value[..cursor].to_string(), value_style));
        spans.push(Span::styled("\u{258C}", cursor_style));
        spans.push(Span::styled(value[cursor..].to_string(), value_style));
    } else if value.is_empty() {
        spans.push(Span::styled(
            placeholder,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(value.clone(), value_style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::View;
    use crate::tui::render::test_helpers::{app_with_todos, render_to_string, TERM_H, TERM_W};

    #[test]
    fn popup_shows_fields_and_hint() {
        let mut app = app_with_todos(&[]);
        app.view = View::List;
        app.open_add_form();
        let form = app.add_form.as_mut().unwrap();
        form.title = "Buy milk".into();
        form.cursor = 3;
        let out = render_to_string(TERM_W, TERM_H, |frame, area| render_add_form(frame, &app, area));
        assert!(out.contains("New todo"));
        assert!(out.contains("Title:  Buy\u{258C} milk"));
        assert!(out.contains("Due:    YYYY-MM-DD [HH:MM]"));
        assert!(out.contains("Enter save  Tab next field  Esc cancel"));
    }

    #[test]
    fn popup_shows_error() {
        let mut app = app_with_todos(&[]);
        app.open_add_form();
        app.add_form.as_mut().unwrap().error = Some("title cannot be empty".into());
        let out = render_to_string(TERM_W, TERM_H, |frame, area| render_add_form(frame, &app, area));
        assert!(out.contains("title cannot be empty"));
        // calendar view prefills the selected day
        assert!(out.contains("Due:    2024-03-01"));
    }
}
