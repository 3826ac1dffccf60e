use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode;

/// Shifted letters arrive as lowercase + SHIFT on some terminals. Make them
/// uppercase so bindings like `G` match either way.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

/// Ctrl+C quits from any mode that does not take text input
pub(super) fn is_quit(key: &KeyEvent) -> bool {
    matches!(
        (key.modifiers, key.code),
        (KeyModifiers::NONE, KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c'))
    )
}

/// Shared single-line editing keys. Returns true if the key was consumed.
pub(super) fn edit_line(buffer: &mut String, cursor: &mut usize, key: &KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                *cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                *cursor = next;
            }
        }
        (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => *cursor = 0,
        (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => *cursor = buffer.len(),
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                buffer.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                buffer.replace_range(*cursor..next, "");
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            buffer.replace_range(..*cursor, "");
            *cursor = 0;
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        _ => return false,
    }
    true
}

/// Move a cursor by `delta`, clamped to `0..len`
pub(super) fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}

pub(super) fn clear_status(app: &mut App) {
    app.status_message = None;
    app.status_is_error = false;
}
