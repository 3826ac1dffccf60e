use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::ops::todo_ops::TodoError;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse a user-typed due date. A bare date means the end of that day, so
/// "today" is still a valid due date.
pub fn parse_due(input: &str) -> Result<NaiveDateTime, TodoError> {
    let input = input.trim();
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
        return Ok(date.and_time(end_of_day));
    }
    Err(TodoError::InvalidDue(input.to_string()))
}

/// Parse an optional due field: blank input means no due date.
pub fn parse_optional_due(input: &str) -> Result<Option<NaiveDateTime>, TodoError> {
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_due(input).map(Some)
    }
}

/// Format a due timestamp the way it is typed: `2024-03-10 09:00`
pub fn format_due(due: NaiveDateTime) -> String {
    due.format("%Y-%m-%d %H:%M").to_string()
}
