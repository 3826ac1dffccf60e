use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};

use crate::ops::todo_ops::TodoError;

/// A single to-do record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    /// Non-empty, trimmed title
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Local wall-clock due timestamp
    #[serde(
        rename = "dueDate",
        default,
        skip_serializing_if = "Option::is_none",
        with = "due_format"
    )]
    pub due: Option<NaiveDateTime>,
}

impl Todo {
    /// Create a new, not yet completed record
    pub fn new(id: impl Into<String>, title: impl Into<String>, due: Option<NaiveDateTime>) -> Self {
        Todo {
            id: id.into(),
            title: title.into(),
            completed: false,
            due,
        }
    }

    /// The calendar day this record is due on, if any
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due.map(|d| d.date())
    }

    /// First 8 characters of the id, for display
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((i, _)) => &self.id[..i],
            None => &self.id,
        }
    }
}

/// The ordered set of records. Values are snapshots: operations in
/// `ops::todo_ops` return a new `Collection` instead of mutating one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Todo>")]
pub struct Collection {
    todos: Vec<Todo>,
}

impl Collection {
    /// Build a collection, rejecting duplicate ids.
    pub fn from_todos(todos: Vec<Todo>) -> Result<Self, TodoError> {
        for (i, todo) in todos.iter().enumerate() {
            if todos[..i].iter().any(|t| t.id == todo.id) {
                return Err(TodoError::DuplicateId(todo.id.clone()));
            }
        }
        Ok(Collection { todos })
    }

    /// Callers must uphold id uniqueness.
    pub(crate) fn from_todos_unchecked(todos: Vec<Todo>) -> Self {
        Collection { todos }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Index of the record in collection order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.todos.iter().position(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }
}

impl TryFrom<Vec<Todo>> for Collection {
    type Error = TodoError;

    fn try_from(todos: Vec<Todo>) -> Result<Self, Self::Error> {
        Collection::from_todos(todos)
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.todos.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.todos.iter()
    }
}

/// Which records the list view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }

    /// Cycle all → active → completed → all
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            other => Err(format!(
                "unknown status '{}' (expected: all, active, completed)",
                other
            )),
        }
    }
}

/// `dueDate` is written as a local timestamp (`2024-03-10T09:00:00`).
/// Reading also accepts minute precision and RFC 3339 timestamps with an
/// offset, which are converted to local time.
mod due_format {
    use chrono::{DateTime, Local, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(
        due: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match due {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = match Option::<String>::deserialize(deserializer)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        parse(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid dueDate: {}", raw)))
    }

    fn parse(raw: &str) -> Option<NaiveDateTime> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
            return Some(dt);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Local).naive_local())
    }
}
