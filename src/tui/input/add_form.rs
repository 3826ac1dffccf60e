use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_add_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.add_form = None;
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => app.submit_add_form(Local::now().naive_local()),
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(form) = app.add_form.as_mut() {
                form.next_field();
            }
        }
        _ => {
            let Some(form) = app.add_form.as_mut() else {
                return;
            };
            let mut cursor = form.cursor;
            if edit_line(form.buffer_mut(), &mut cursor, &key) {
                form.cursor = cursor;
                form.error = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::AddField;
    use crate::tui::input::test_keys::{press, type_str};
    use crate::tui::render::test_helpers::app_with_todos;

    #[test]
    fn typing_fills_fields() {
        let mut app = app_with_todos(&[]);
        app.view = crate::tui::app::View::List;
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Add);
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2099-01-02");
        let form = app.add_form.as_ref().unwrap();
        assert_eq!(form.title, "Buy milk");
        assert_eq!(form.due, "2099-01-02");
        assert_eq!(form.field, AddField::Due);
        // a and q are text here
        assert!(!app.should_quit);
    }

    #[test]
    fn enter_with_blank_title_shows_error() {
        let mut app = app_with_todos(&[]);
        app.view = crate::tui::app::View::List;
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Add);
        assert_eq!(
            app.add_form.as_ref().unwrap().error.as_deref(),
            Some("title cannot be empty")
        );
        // editing clears the message
        type_str(&mut app, "x");
        assert!(app.add_form.as_ref().unwrap().error.is_none());
    }

    #[test]
    fn enter_adds_and_closes() {
        let mut app = app_with_todos(&[]);
        app.view = crate::tui::app::View::List;
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "  Call mom ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.todos()[0].title, "Call mom");
        assert_eq!(app.status_message.as_deref(), Some("added \"Call mom\""));
    }

    #[test]
    fn esc_discards() {
        let mut app = app_with_todos(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "draft");
        press(&mut app, KeyCode::Esc);
        assert!(app.add_form.is_none());
        assert!(app.store.todos().is_empty());
    }
}
