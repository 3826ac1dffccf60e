use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render the delete confirmation popup
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(pending) = &app.pending_removal else {
        return;
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    let title_room = (popup_w as usize).saturating_sub(14);
    let label = unicode::truncate_to_width(pending.label(), title_room);

    let lines = vec![
        Line::from(Span::styled(" Delete todo", header_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Delete ", text_style),
            Span::styled(
                format!("\"{}\"", label),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", text_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("y", dim_style),
            Span::styled(" delete  ", text_style),
            Span::styled("n", dim_style),
            Span::styled(" keep", text_style),
        ]),
    ];

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}
