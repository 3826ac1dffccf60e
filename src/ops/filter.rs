use crate::model::todo::{StatusFilter, Todo};

/// The list view: records matching `status` and `search`, in collection order.
/// `search` is a literal, case-insensitive substring of the title; empty
/// matches everything.
pub fn filter_todos(todos: &[Todo], status: StatusFilter, search: &str) -> Vec<Todo> {
    let needle = search.to_lowercase();
    todos
        .iter()
        .filter(|todo| status.matches(todo))
        .filter(|todo| needle.is_empty() || todo.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Byte ranges of case-insensitive `search` matches in `text`, for highlighting.
/// Returns nothing when lowercasing would shift byte offsets.
pub fn match_ranges(text: &str, search: &str) -> Vec<std::ops::Range<usize>> {
    if search.is_empty() {
        return Vec::new();
    }
    let haystack = text.to_lowercase();
    let needle = search.to_lowercase();
    if haystack.len() != text.len() {
        return Vec::new();
    }
    haystack
        .match_indices(&needle)
        .map(|(start, m)| start..start + m.len())
        .collect()
}

/// Per-status totals, for tab labels and summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl FilterCounts {
    pub fn of(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|t| t.completed).count();
        FilterCounts {
            all: todos.len(),
            active: todos.len() - completed,
            completed,
        }
    }

    pub fn get(&self, status: StatusFilter) -> usize {
        match status {
            StatusFilter::All => self.all,
            StatusFilter::Active => self.active,
            StatusFilter::Completed => self.completed,
        }
    }
}
