use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::{KeyValueStore, MemoryStore, TODOS_KEY};
use crate::model::{Collection, Todo, UiConfig};
use crate::ops::due::parse_due;
use crate::ops::store::{IdGenerator, SequentialIds, Store};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The fixed "today" every test app starts on
pub fn test_today() -> NaiveDate {
    date(2024, 3, 1)
}

/// Build an App named "Test" over an in-memory store seeded with
/// `(title, due, completed)` rows. Seeded ids are `t1`, `t2`, ...; new ones
/// are `n1`, `n2`, ...
pub fn app_with_todos(rows: &[(&str, Option<&str>, bool)]) -> App {
    let todos: Vec<Todo> = rows
        .iter()
        .enumerate()
        .map(|(i, (title, due, completed))| {
            let mut todo = Todo::new(
                format!("t{}", i + 1),
                *title,
                due.map(|d| parse_due(d).unwrap()),
            );
            todo.completed = *completed;
            todo
        })
        .collect();
    let json = serde_json::to_string(&Collection::from_todos(todos).unwrap()).unwrap();

    let storage: Box<dyn KeyValueStore> = Box::new(MemoryStore::with_entry(TODOS_KEY, &json));
    let ids: Box<dyn IdGenerator> = Box::new(SequentialIds::new("n"));
    let store = Store::open(storage, ids).unwrap();
    App::new("Test", &UiConfig::default(), store, test_today())
}
