use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::*;

/// Move mode: j/k shift the previewed position, Enter commits one reorder
pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    let len = app.store.snapshot().len();
    let Some(ms) = app.move_state.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => ms.to = step(ms.to, 1, len),
        KeyCode::Char('k') | KeyCode::Up => ms.to = step(ms.to, -1, len),
        KeyCode::Char('g') | KeyCode::Home => ms.to = 0,
        KeyCode::Char('G') | KeyCode::End => ms.to = len.saturating_sub(1),
        KeyCode::Enter | KeyCode::Char('m') => {
            app.commit_move();
            return;
        }
        KeyCode::Esc => {
            app.cancel_move();
            return;
        }
        _ => return,
    }
    app.list_cursor = ms.to;
}
