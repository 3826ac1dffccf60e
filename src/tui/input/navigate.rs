use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::StatusFilter;
use crate::tui::app::{App, Mode, View};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts everything; ? or Esc closes it
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    clear_status(app);

    if is_quit(&key) {
        app.should_quit = true;
        return;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('?')) => app.show_help = true,
        (KeyModifiers::NONE, KeyCode::Char('v')) => switch_view(app),
        (KeyModifiers::NONE, KeyCode::Char('/')) => {
            app.search_before = app.search.clone();
            app.mode = Mode::Search;
        }
        (KeyModifiers::NONE, KeyCode::Char('f')) => set_filter(app, app.filter.next()),
        (KeyModifiers::NONE, KeyCode::Char('1')) => set_filter(app, StatusFilter::All),
        (KeyModifiers::NONE, KeyCode::Char('2')) => set_filter(app, StatusFilter::Active),
        (KeyModifiers::NONE, KeyCode::Char('3')) => set_filter(app, StatusFilter::Completed),
        (KeyModifiers::NONE, KeyCode::Char('a')) => app.open_add_form(),
        _ => match app.view {
            View::List => handle_list_key(app, key),
            View::Calendar => handle_calendar_key(app, key),
        },
    }
}

fn switch_view(app: &mut App) {
    app.view = match app.view {
        View::List => View::Calendar,
        View::Calendar => View::List,
    };
}

pub(super) fn set_filter(app: &mut App, filter: StatusFilter) {
    if app.filter != filter {
        app.filter = filter;
        app.list_cursor = 0;
        app.list_scroll = 0;
        app.clamp_cursors();
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    let len = app.visible_todos().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.list_cursor = step(app.list_cursor, 1, len),
        KeyCode::Char('k') | KeyCode::Up => app.list_cursor = step(app.list_cursor, -1, len),
        KeyCode::Char('g') | KeyCode::Home => app.list_cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.list_cursor = len.saturating_sub(1),
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(todo) = app.cursor_todo() {
                app.toggle_todo(&todo.id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(todo) = app.cursor_todo() {
                app.request_delete(&todo.id);
            }
        }
        KeyCode::Char('m') => app.enter_move_mode(),
        KeyCode::Esc => {
            if !app.search.is_empty() {
                app.search.clear();
                app.clamp_cursors();
            }
        }
        _ => {}
    }
}
