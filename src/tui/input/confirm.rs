use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::store::Decision;
use crate::tui::app::App;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y or Enter
        (KeyModifiers::NONE, KeyCode::Char('y')) | (_, KeyCode::Enter) => {
            app.resolve_delete(Decision::Confirm);
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.resolve_delete(Decision::Cancel);
        }
        _ => {}
    }
}
