use chrono::{Days, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, CalendarFocus};

use super::*;

pub(super) fn handle_calendar_key(app: &mut App, key: KeyEvent) {
    match app.calendar_focus {
        CalendarFocus::Grid => handle_grid_key(app, key),
        CalendarFocus::Agenda => handle_agenda_key(app, key),
    }
}

fn shift_day(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    let days = Days::new(delta.unsigned_abs());
    if delta < 0 {
        date.checked_sub_days(days)
    } else {
        date.checked_add_days(days)
    }
}

fn move_day(app: &mut App, delta: i64) {
    if let Some(date) = shift_day(app.selected_day, delta) {
        app.select_day(date);
    }
}

fn handle_grid_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => move_day(app, -1),
        KeyCode::Char('l') | KeyCode::Right => move_day(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_day(app, -7),
        KeyCode::Char('j') | KeyCode::Down => move_day(app, 7),
        KeyCode::Char('[') => app.select_month(app.month.prev()),
        KeyCode::Char(']') => app.select_month(app.month.next()),
        KeyCode::Char('t') => app.select_day(app.today),
        KeyCode::Tab | KeyCode::Enter => {
            if app.agenda_todos().is_empty() {
                app.set_status("nothing due on this day");
            } else {
                app.calendar_focus = CalendarFocus::Agenda;
                app.agenda_cursor = 0;
            }
        }
        _ => {}
    }
}

fn handle_agenda_key(app: &mut App, key: KeyEvent) {
    let len = app.agenda_todos().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.agenda_cursor = step(app.agenda_cursor, 1, len),
        KeyCode::Char('k') | KeyCode::Up => app.agenda_cursor = step(app.agenda_cursor, -1, len),
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
        KeyCode::Tab | KeyCode::Esc => app.calendar_focus = CalendarFocus::Grid,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatusFilter;
    use crate::ops::calendar::Month;
    use crate::tui::app::Mode;
    use crate::tui::input::test_keys::press;
    use crate::tui::render::test_helpers::{app_with_todos, date};

    #[test]
    fn day_cursor_crosses_months() {
        let mut app = app_with_todos(&[]);
        // today is 2024-03-01
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.selected_day, date(2024, 2, 29));
        assert_eq!(app.month, Month::new(2024, 2).unwrap());
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_day, date(2024, 3, 7));
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.selected_day, date(2024, 3, 1));
    }

    #[test]
    fn month_keys_and_today() {
        let mut app = app_with_todos(&[]);
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.month, Month::new(2023, 12).unwrap());
        assert_eq!(app.selected_day, date(2023, 12, 1));
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.month, Month::new(2024, 1).unwrap());
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.selected_day, date(2024, 3, 1));
    }

    #[test]
    fn agenda_toggle_and_delete() {
        let mut app = app_with_todos(&[
            ("Buy milk", Some("2024-03-01 09:00"), false),
            ("Call mom", Some("2024-03-01 18:00"), false),
            ("Elsewhere", Some("2024-03-02 09:00"), false),
        ]);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.calendar_focus, CalendarFocus::Agenda);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.agenda_cursor, 1);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.todos()[1].completed);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::Confirm);
        assert_eq!(app.pending_removal.as_ref().unwrap().label(), "Call mom");
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store.todos().len(), 2);
        assert_eq!(app.agenda_cursor, 0);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.calendar_focus, CalendarFocus::Grid);
    }

    #[test]
    fn agenda_focus_needs_items() {
        let mut app = app_with_todos(&[("Buy milk", Some("2024-03-01 09:00"), true)]);
        app.filter = StatusFilter::Active;
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.calendar_focus, CalendarFocus::Grid);
        assert_eq!(app.status_message.as_deref(), Some("nothing due on this day"));
    }
}
