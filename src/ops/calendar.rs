use std::fmt;

use chrono::{Datelike, Days, Local, Months, NaiveDate};

use crate::model::todo::Todo;

/// Six weeks of seven days
pub const GRID_DAYS: usize = 42;

/// Column headers, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A calendar month, used as the reference for a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// `month` is 1-based. Returns None for an invalid month, or one whose
    /// 42-day grid would run past either end of the supported date range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let lead = u64::from(first.weekday().num_days_from_sunday());
        first
            .checked_sub_days(Days::new(lead))?
            .checked_add_days(Days::new(GRID_DAYS as u64 - 1))?;
        Some(Month { year, month })
    }

    /// None at the outer edges of the date range, where no full grid fits
    pub fn containing(date: NaiveDate) -> Option<Self> {
        Month::new(date.year(), date.month())
    }

    /// The month containing `date`, pulled inward when `date` sits too close
    /// to either end of the date range
    pub fn nearest(date: NaiveDate) -> Self {
        let margin = Days::new(GRID_DAYS as u64);
        let lo = NaiveDate::MIN.checked_add_days(margin).unwrap_or(NaiveDate::MIN);
        let hi = NaiveDate::MAX.checked_sub_days(margin).unwrap_or(NaiveDate::MAX);
        let date = date.clamp(lo, hi);
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Month::nearest(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first)
    }

    pub fn day_count(&self) -> u32 {
        self.last_day().day()
    }

    pub fn prev(&self) -> Self {
        self.first_day()
            .checked_sub_months(Months::new(1))
            .and_then(Month::containing)
            .unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(Month::containing)
            .unwrap_or(*self)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Parse `YYYY-MM`
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        Month::new(year.parse().ok()?, month.parse().ok()?)
    }

    /// "March 2024"
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One day of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading and trailing days of adjacent months
    pub in_month: bool,
    /// Records due on this day, in collection order
    pub todos: Vec<Todo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub month: Month,
    pub cells: Vec<DayCell>,
}

impl CalendarGrid {
    /// Rows of seven cells, Sunday through Saturday
    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell> {
        self.cells.chunks(7)
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let start = self.cells.first()?.date;
        let offset = usize::try_from((date - start).num_days()).ok()?;
        (offset < self.cells.len()).then_some(offset)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.index_of(date).map(|i| &self.cells[i])
    }

    /// Total records due within the reference month
    pub fn due_in_month(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.in_month)
            .map(|c| c.todos.len())
            .sum()
    }
}

/// The Sunday on or before the first of `month`
pub fn grid_start(month: Month) -> NaiveDate {
    let first = month.first_day();
    let lead = u64::from(first.weekday().num_days_from_sunday());
    first.checked_sub_days(Days::new(lead)).unwrap_or(first)
}

/// Bucket `todos` by due day over the 42-day grid for `month`. Records
/// without a due date never appear.
pub fn month_grid(todos: &[Todo], month: Month) -> CalendarGrid {
    let cells = grid_start(month)
        .iter_days()
        .take(GRID_DAYS)
        .map(|date| DayCell {
            date,
            in_month: month.contains(date),
            todos: todos
                .iter()
                .filter(|t| t.due_date() == Some(date))
                .cloned()
                .collect(),
        })
        .collect();
    CalendarGrid { month, cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn due(id: &str, title: &str, y: i32, m: u32, d: u32, h: u32) -> Todo {
        Todo::new(id, title, Some(date(y, m, d).and_hms_opt(h, 0, 0).unwrap()))
    }

    #[test]
    fn month_navigation_rolls_over_years() {
        let jan = Month::new(2024, 1).unwrap();
        assert_eq!(jan.prev(), Month::new(2023, 12).unwrap());
        assert_eq!(Month::new(2023, 12).unwrap().next(), jan);
        assert_eq!(jan.next().next(), Month::new(2024, 3).unwrap());
        assert!(Month::new(2024, 13).is_none());
        assert!(Month::new(2024, 0).is_none());
    }

    #[test]
    fn day_counts() {
        assert_eq!(Month::new(2024, 2).unwrap().day_count(), 29);
        assert_eq!(Month::new(2023, 2).unwrap().day_count(), 28);
        assert_eq!(Month::new(1900, 2).unwrap().day_count(), 28);
        assert_eq!(Month::new(2000, 2).unwrap().day_count(), 29);
        assert_eq!(Month::new(2024, 4).unwrap().day_count(), 30);
        assert_eq!(Month::new(2024, 12).unwrap().day_count(), 31);
    }

    #[test]
    fn parse_and_display() {
        let m = Month::parse("2024-03").unwrap();
        assert_eq!(m, Month::new(2024, 3).unwrap());
        assert_eq!(m.to_string(), "2024-03");
        assert_eq!(m.label(), "March 2024");
        assert!(Month::parse("2024-3x").is_none());
        assert!(Month::parse("March").is_none());
    }

    #[test]
    fn grid_shape_over_many_months() {
        let mut month = Month::new(2019, 11).unwrap();
        for _ in 0..72 {
            let grid = month_grid(&[], month);
            assert_eq!(grid.cells.len(), GRID_DAYS);
            assert_eq!(grid.cells[0].date.weekday(), Weekday::Sun, "{month}");
            assert!(grid.cells[0].date <= month.first_day());
            let in_month = grid.cells.iter().filter(|c| c.in_month).count();
            assert_eq!(in_month as u32, month.day_count(), "{month}");
            assert_eq!(grid.weeks().count(), 6);
            assert!(grid.weeks().all(|w| w.len() == 7));
            month = month.next();
        }
    }

    #[test]
    fn months_at_the_ends_of_the_date_range() {
        // The last month whose six weeks still fit before the end
        assert!(Month::containing(NaiveDate::MAX).is_none());
        assert!(Month::parse(&format!("{}-12", NaiveDate::MAX.year())).is_none());
        let last = Month::nearest(NaiveDate::MAX);
        assert_eq!(last.next(), last);
        assert_eq!(last.prev().next(), last);

        // January of the first year would need days before the start
        assert!(Month::containing(NaiveDate::MIN).is_none());
        let first = Month::nearest(NaiveDate::MIN);
        assert_eq!(first.prev(), first);
        assert_eq!(first.next().prev(), first);

        for month in [first, first.next(), last.prev(), last] {
            let grid = month_grid(&[], month);
            assert_eq!(grid.cells.len(), GRID_DAYS, "{month}");
            assert_eq!(grid.cells[0].date.weekday(), Weekday::Sun, "{month}");
            assert!(grid.cells[0].date <= month.first_day());
        }
    }

    #[test]
    fn nearest_is_containing_away_from_the_edges() {
        let d = date(2024, 3, 17);
        assert_eq!(Month::nearest(d), Month::containing(d).unwrap());
    }

    #[test]
    fn first_cell_is_the_first_when_month_starts_on_sunday() {
        // September 2024 starts on a Sunday
        let grid = month_grid(&[], Month::new(2024, 9).unwrap());
        assert_eq!(grid.cells[0].date, date(2024, 9, 1));
        assert!(grid.cells[0].in_month);
    }

    #[test]
    fn buy_milk_lands_on_march_tenth() {
        // March 2024 starts on a Friday: five leading February days
        let todos = vec![
            due("A", "Buy milk", 2024, 3, 10, 9),
            Todo::new("B", "Someday", None),
        ];
        let grid = month_grid(&todos, Month::new(2024, 3).unwrap());

        assert_eq!(grid.cells[0].date, date(2024, 2, 25));
        assert_eq!(grid.index_of(date(2024, 3, 10)), Some(14));

        let cell = grid.cell(date(2024, 3, 10)).unwrap();
        assert_eq!(cell.todos.len(), 1);
        assert_eq!(cell.todos[0].id, "A");
        assert_eq!(grid.due_in_month(), 1);
        // undated records never show up
        assert!(grid.cells.iter().flat_map(|c| &c.todos).all(|t| t.id != "B"));
    }

    #[test]
    fn adjacent_month_days_carry_their_todos() {
        let todos = vec![
            due("a", "early", 2024, 2, 26, 8),
            due("b", "late", 2024, 4, 2, 8),
            due("c", "far", 2024, 6, 1, 8),
        ];
        let grid = month_grid(&todos, Month::new(2024, 3).unwrap());
        let feb = grid.cell(date(2024, 2, 26)).unwrap();
        assert!(!feb.in_month);
        assert_eq!(feb.todos[0].id, "a");
        assert_eq!(grid.cell(date(2024, 4, 2)).unwrap().todos[0].id, "b");
        assert!(grid.cell(date(2024, 6, 1)).is_none());
        assert_eq!(grid.due_in_month(), 0);
    }

    #[test]
    fn same_day_keeps_collection_order() {
        let todos = vec![
            due("x", "second by time", 2024, 3, 5, 18),
            due("y", "first by time", 2024, 3, 5, 7),
        ];
        let grid = month_grid(&todos, Month::new(2024, 3).unwrap());
        let ids: Vec<_> = grid
            .cell(date(2024, 3, 5))
            .unwrap()
            .todos
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["x", "y"]);
    }
}
