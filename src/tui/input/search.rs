use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

/// Search prompt. The query applies as it is typed; Esc restores the
/// previous query.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search = std::mem::take(&mut app.search_before);
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            app.search_before.clear();
            app.mode = Mode::Navigate;
        }
        _ => {
            let mut cursor = app.search.len();
            if !edit_line(&mut app.search, &mut cursor, &key) {
                return;
            }
            app.list_cursor = 0;
            app.list_scroll = 0;
        }
    }
    app.clamp_cursors();
}
