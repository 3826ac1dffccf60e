use serde::Serialize;

use crate::model::todo::{Collection, StatusFilter, Todo};
use crate::ops::calendar::{CalendarGrid, WEEKDAY_LABELS};
use crate::ops::due::format_due;
use crate::ops::filter::FilterCounts;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoJson {
    /// 1-based position in the collection order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

#[derive(Serialize)]
pub struct CountsJson {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

#[derive(Serialize)]
pub struct ListJson {
    pub status: StatusFilter,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    pub counts: CountsJson,
    pub todos: Vec<TodoJson>,
}

#[derive(Serialize)]
pub struct DayJson {
    pub date: String,
    pub in_month: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub todos: Vec<TodoJson>,
}

#[derive(Serialize)]
pub struct CalendarJson {
    pub month: String,
    pub weeks: Vec<Vec<DayJson>>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn todo_to_json(todo: &Todo, position: Option<usize>) -> TodoJson {
    TodoJson {
        position,
        id: todo.id.clone(),
        title: todo.title.clone(),
        completed: todo.completed,
        due: todo.due.map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string()),
    }
}

pub fn counts_to_json(counts: &FilterCounts) -> CountsJson {
    CountsJson {
        all: counts.all,
        active: counts.active,
        completed: counts.completed,
    }
}

pub fn list_to_json(
    collection: &Collection,
    visible: &[Todo],
    status: StatusFilter,
    search: &str,
) -> ListJson {
    ListJson {
        status,
        search: search.to_string(),
        counts: counts_to_json(&FilterCounts::of(collection.todos())),
        todos: visible
            .iter()
            .map(|t| todo_to_json(t, collection.position(&t.id).map(|p| p + 1)))
            .collect(),
    }
}

pub fn calendar_to_json(grid: &CalendarGrid) -> CalendarJson {
    CalendarJson {
        month: grid.month.to_string(),
        weeks: grid
            .weeks()
            .map(|week| {
                week.iter()
                    .map(|cell| DayJson {
                        date: cell.date.format("%Y-%m-%d").to_string(),
                        in_month: cell.in_month,
                        todos: cell.todos.iter().map(|t| todo_to_json(t, None)).collect(),
                    })
                    .collect()
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn check_char(todo: &Todo) -> char {
    if todo.completed { 'x' } else { ' ' }
}

/// One-line summary: `[x] 1a2b3c4d Buy milk  (due 2024-03-10 09:00)`
pub fn format_todo_line(todo: &Todo) -> String {
    let due = todo
        .due
        .map(|d| format!("  (due {})", format_due(d)))
        .unwrap_or_default();
    format!("[{}] {} {}{}", check_char(todo), todo.short_id(), todo.title, due)
}

/// List lines prefixed with their 1-based collection position
pub fn format_todo_listing(collection: &Collection, visible: &[Todo]) -> Vec<String> {
    let width = collection.len().to_string().len();
    visible
        .iter()
        .map(|todo| {
            let pos = collection
                .position(&todo.id)
                .map(|p| (p + 1).to_string())
                .unwrap_or_default();
            format!("{:>width$}. {}", pos, format_todo_line(todo), width = width)
        })
        .collect()
}

pub fn format_todo_detail(todo: &Todo, position: usize) -> Vec<String> {
    let mut lines = vec![format!("[{}] {}", check_char(todo), todo.title)];
    lines.push(format!("id: {}", todo.id));
    lines.push(format!("position: {}", position + 1));
    lines.push(format!(
        "status: {}",
        if todo.completed { "completed" } else { "active" }
    ));
    if let Some(due) = todo.due {
        lines.push(format!("due: {}", format_due(due)));
    }
    lines
}

/// Summary line under a listing: `2 of 5 shown (3 active, 2 completed)`
pub fn format_counts(shown: usize, counts: &FilterCounts) -> String {
    format!(
        "{} of {} shown ({} active, {} completed)",
        shown, counts.all, counts.active, counts.completed
    )
}

const CELL_WIDTH: usize = 6;

fn format_cell(day: u32, due_count: usize) -> String {
    let marker = if due_count > 0 {
        format!("*{}", due_count)
    } else {
        String::new()
    };
    format!("{:>2}{:<width$}", day, marker, width = CELL_WIDTH - 2)
}

/// Month grid followed by an agenda of the month's due todos. Days outside
/// the month are left blank.
pub fn format_calendar(grid: &CalendarGrid) -> Vec<String> {
    use chrono::Datelike;

    let mut lines = vec![grid.month.label()];
    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|l| format!("{:<width$}", l, width = CELL_WIDTH))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );
    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| {
                if cell.in_month {
                    format_cell(cell.date.day(), cell.todos.len())
                } else {
                    " ".repeat(CELL_WIDTH)
                }
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    let agenda: Vec<_> = grid
        .cells
        .iter()
        .filter(|c| c.in_month && !c.todos.is_empty())
        .collect();
    if !agenda.is_empty() {
        lines.push(String::new());
        for cell in agenda {
            for todo in &cell.todos {
                let time = todo
                    .due
                    .map(|d| d.format("%H:%M").to_string())
                    .unwrap_or_default();
                lines.push(format!(
                    "{} {}  [{}] {} {}",
                    cell.date.format("%a %d"),
                    time,
                    check_char(todo),
                    todo.short_id(),
                    todo.title
                ));
            }
        }
    }
    lines
}
