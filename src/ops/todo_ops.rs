use chrono::NaiveDateTime;

use crate::model::todo::{Collection, Todo};

/// Error type for collection operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoError {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("due date {} is in the past", .due.format("%Y-%m-%d %H:%M"))]
    DueInPast {
        due: NaiveDateTime,
        now: NaiveDateTime,
    },
    #[error("could not parse due date '{0}' (expected YYYY-MM-DD HH:MM)")]
    InvalidDue(String),
    #[error("duplicate todo id: {0}")]
    DuplicateId(String),
    #[error("position {index} is out of range ({len} todos)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Input for `add`: what the creation form submits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub due: Option<NaiveDateTime>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, due: Option<NaiveDateTime>) -> Self {
        NewTodo {
            title: title.into(),
            due,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check a submission against the creation rules: the trimmed title must be
/// non-empty and the due date, if any, must not be before `now`.
pub fn validate(new: &NewTodo, now: NaiveDateTime) -> Result<(), TodoError> {
    if new.title.trim().is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    if let Some(due) = new.due
        && due < now
    {
        return Err(TodoError::DueInPast { due, now });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Snapshot transitions
// ---------------------------------------------------------------------------

/// Append a new record with `id` to the end of the order.
pub fn add(
    collection: &Collection,
    new: NewTodo,
    id: String,
    now: NaiveDateTime,
) -> Result<Collection, TodoError> {
    validate(&new, now)?;
    if collection.contains(&id) {
        return Err(TodoError::DuplicateId(id));
    }

    let mut todos = collection.todos().to_vec();
    todos.push(Todo::new(id, new.title.trim(), new.due));
    Ok(Collection::from_todos_unchecked(todos))
}

/// Flip `completed` on the record with `id`. Absent ids leave the snapshot as is.
pub fn toggle(collection: &Collection, id: &str) -> Collection {
    let todos = collection
        .iter()
        .map(|todo| {
            if todo.id == id {
                Todo {
                    completed: !todo.completed,
                    ..todo.clone()
                }
            } else {
                todo.clone()
            }
        })
        .collect();
    Collection::from_todos_unchecked(todos)
}

/// Drop the record with `id`. Absent ids leave the snapshot as is.
pub fn remove(collection: &Collection, id: &str) -> Collection {
    let todos = collection.iter().filter(|t| t.id != id).cloned().collect();
    Collection::from_todos_unchecked(todos)
}

/// Move the record at `old_index` to `new_index`, shifting the records in
/// between. Out-of-range indices are rejected rather than clamped.
pub fn reorder(
    collection: &Collection,
    old_index: usize,
    new_index: usize,
) -> Result<Collection, TodoError> {
    let len = collection.len();
    for index in [old_index, new_index] {
        if index >= len {
            return Err(TodoError::IndexOutOfRange { index, len });
        }
    }

    let mut todos = collection.todos().to_vec();
    if old_index != new_index {
        let todo = todos.remove(old_index);
        todos.insert(new_index, todo);
    }
    Ok(Collection::from_todos_unchecked(todos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        at(2024, 3, 1, 12, 0)
    }

    fn sample() -> Collection {
        Collection::from_todos(vec![
            Todo::new("a", "Buy milk", Some(at(2024, 3, 10, 9, 0))),
            Todo::new("b", "Write report", None),
            Todo::new("c", "Call plumber", Some(at(2024, 3, 2, 8, 0))),
            Todo::new("d", "Book flights", None),
        ])
        .unwrap()
    }

    fn ids(collection: &Collection) -> Vec<&str> {
        collection.iter().map(|t| t.id.as_str()).collect()
    }

    // --- add ---

    #[test]
    fn add_appends_active_record() {
        let before = sample();
        let after = add(
            &before,
            NewTodo::new("  Water plants ", Some(at(2024, 3, 5, 18, 0))),
            "e".into(),
            now(),
        )
        .unwrap();

        assert_eq!(after.len(), before.len() + 1);
        let added = after.todos().last().unwrap();
        assert_eq!(added.id, "e");
        assert_eq!(added.title, "Water plants");
        assert!(!added.completed);
        assert_eq!(added.due, Some(at(2024, 3, 5, 18, 0)));
        // snapshot semantics: the input is untouched
        assert_eq!(before, sample());
    }

    #[test]
    fn add_rejects_blank_title() {
        let before = sample();
        for title in ["", "   ", "\t\n"] {
            let err = add(&before, NewTodo::new(title, None), "e".into(), now()).unwrap_err();
            assert_eq!(err, TodoError::EmptyTitle);
        }
    }

    #[test]
    fn add_rejects_due_before_now() {
        let past = at(2024, 3, 1, 11, 59);
        let err = add(&sample(), NewTodo::new("Late", Some(past)), "e".into(), now()).unwrap_err();
        assert_eq!(err, TodoError::DueInPast { due: past, now: now() });
        assert_eq!(err.to_string(), "due date 2024-03-01 11:59 is in the past");
    }

    #[test]
    fn add_accepts_due_equal_to_now() {
        let after = add(&sample(), NewTodo::new("Now", Some(now())), "e".into(), now()).unwrap();
        assert_eq!(after.len(), 5);
    }

    #[test]
    fn add_rejects_existing_id() {
        let err = add(&sample(), NewTodo::new("Dup", None), "b".into(), now()).unwrap_err();
        assert_eq!(err, TodoError::DuplicateId("b".into()));
    }

    // --- toggle ---

    #[test]
    fn toggle_flips_only_target() {
        let after = toggle(&sample(), "b");
        assert!(after.get("b").unwrap().completed);
        assert!(after.iter().filter(|t| t.id != "b").all(|t| !t.completed));
    }

    #[test]
    fn toggle_twice_restores() {
        let before = sample();
        assert_eq!(toggle(&toggle(&before, "c"), "c"), before);
    }

    #[test]
    fn toggle_absent_is_noop() {
        assert_eq!(toggle(&sample(), "zzz"), sample());
    }

    // --- remove ---

    #[test]
    fn remove_drops_record_and_keeps_order() {
        let after = remove(&sample(), "b");
        assert_eq!(ids(&after), vec!["a", "c", "d"]);
    }

    #[test]
    fn remove_twice_is_noop_second_time() {
        let once = remove(&sample(), "a");
        let twice = remove(&once, "a");
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 3);
    }

    // --- reorder ---

    #[test]
    fn reorder_moves_down_and_up() {
        assert_eq!(ids(&reorder(&sample(), 0, 2).unwrap()), vec!["b", "c", "a", "d"]);
        assert_eq!(ids(&reorder(&sample(), 3, 1).unwrap()), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn reorder_then_inverse_restores() {
        let before = sample();
        for i in 0..before.len() {
            for j in 0..before.len() {
                let there = reorder(&before, i, j).unwrap();
                let back = reorder(&there, j, i).unwrap();
                assert_eq!(back, before, "reorder({i}, {j}) was not undone");
            }
        }
    }

    #[test]
    fn reorder_same_index_is_noop() {
        assert_eq!(reorder(&sample(), 2, 2).unwrap(), sample());
    }

    #[test]
    fn reorder_rejects_out_of_range() {
        assert_eq!(
            reorder(&sample(), 4, 0).unwrap_err(),
            TodoError::IndexOutOfRange { index: 4, len: 4 }
        );
        assert_eq!(
            reorder(&sample(), 0, 9).unwrap_err(),
            TodoError::IndexOutOfRange { index: 9, len: 4 }
        );
        assert!(reorder(&Collection::default(), 0, 0).is_err());
    }
}
