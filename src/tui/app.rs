use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::logging;
use crate::io::project_io::{find_docket, open_store};
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::model::{StatusFilter, Todo, UiConfig, ViewKind};
use crate::ops::calendar::{CalendarGrid, Month, month_grid};
use crate::ops::filter::{FilterCounts, filter_todos};
use crate::ops::store::{Decision, DynStore, PendingRemoval, StoreError};
use crate::ops::todo_ops;

use super::input;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Calendar,
}

impl From<ViewKind> for View {
    fn from(kind: ViewKind) -> Self {
        match kind {
            ViewKind::List => View::List,
            ViewKind::Calendar => View::Calendar,
        }
    }
}

impl From<View> for ViewKind {
    fn from(view: View) -> Self {
        match view {
            View::List => ViewKind::List,
            View::Calendar => ViewKind::Calendar,
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    Add,
    Move,
    Confirm,
}

/// Which part of the calendar view has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarFocus {
    Grid,
    Agenda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Title,
    Due,
}

/// The new-todo popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForm {
    pub title: String,
    pub due: String,
    pub field: AddField,
    /// Byte offset of the cursor in the focused field
    pub cursor: usize,
    /// Validation message from the last failed submit
    pub error: Option<String>,
}

impl AddForm {
    pub fn new(due: String) -> Self {
        AddForm {
            title: String::new(),
            due,
            field: AddField::Title,
            cursor: 0,
            error: None,
        }
    }

    pub fn buffer(&self) -> &str {
        match self.field {
            AddField::Title => &self.title,
            AddField::Due => &self.due,
        }
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        match self.field {
            AddField::Title => &mut self.title,
            AddField::Due => &mut self.due,
        }
    }

    /// Switch fields, putting the cursor at the end of the other one
    pub fn next_field(&mut self) {
        self.field = match self.field {
            AddField::Title => AddField::Due,
            AddField::Due => AddField::Title,
        };
        self.cursor = self.buffer().len();
    }
}

/// A pending reorder: the record at `from` is shown at `to` until committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveState {
    pub from: usize,
    pub to: usize,
}

/// Main application state
pub struct App {
    pub store: DynStore,
    pub docket_name: String,
    /// Where UI state is saved; None keeps it in memory only
    pub docket_dir: Option<PathBuf>,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub show_help: bool,
    pub filter: StatusFilter,
    /// Applied search text
    pub search: String,
    /// Search text before the current search prompt opened
    pub search_before: String,
    /// Cursor into the visible list
    pub list_cursor: usize,
    pub list_scroll: usize,
    pub today: NaiveDate,
    pub month: Month,
    pub selected_day: NaiveDate,
    pub calendar_focus: CalendarFocus,
    pub agenda_cursor: usize,
    pub agenda_scroll: usize,
    pub add_form: Option<AddForm>,
    pub move_state: Option<MoveState>,
    pub pending_removal: Option<PendingRemoval>,
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl App {
    pub fn new(docket_name: &str, ui: &UiConfig, store: DynStore, today: NaiveDate) -> Self {
        App {
            store,
            docket_name: docket_name.to_string(),
            docket_dir: None,
            view: ui.default_view.into(),
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            show_key_hints: ui.show_key_hints,
            show_help: false,
            filter: StatusFilter::All,
            search: String::new(),
            search_before: String::new(),
            list_cursor: 0,
            list_scroll: 0,
            today,
            month: Month::nearest(today),
            selected_day: today,
            calendar_focus: CalendarFocus::Grid,
            agenda_cursor: 0,
            agenda_scroll: 0,
            add_form: None,
            move_state: None,
            pending_removal: None,
            status_message: None,
            status_is_error: false,
        }
    }

    /// Records after status filter and search, in collection order
    pub fn filtered_todos(&self) -> Vec<Todo> {
        filter_todos(self.store.todos(), self.filter, &self.search)
    }

    /// What the list view shows: the filtered records, or the reorder preview
    /// while in move mode
    pub fn visible_todos(&self) -> Vec<Todo> {
        if let Some(ms) = self.move_state {
            match todo_ops::reorder(self.store.snapshot(), ms.from, ms.to) {
                Ok(preview) => return preview.todos().to_vec(),
                Err(e) => log::warn!("move preview failed: {}", e),
            }
        }
        self.filtered_todos()
    }

    pub fn counts(&self) -> FilterCounts {
        FilterCounts::of(self.store.todos())
    }

    pub fn grid(&self) -> CalendarGrid {
        month_grid(&self.filtered_todos(), self.month)
    }

    /// Filtered records due on the selected day
    pub fn agenda_todos(&self) -> Vec<Todo> {
        self.filtered_todos()
            .into_iter()
            .filter(|t| t.due_date() == Some(self.selected_day))
            .collect()
    }

    /// The record the active cursor points at, if any
    pub fn cursor_todo(&self) -> Option<Todo> {
        match self.view {
            View::List => self.visible_todos().get(self.list_cursor).cloned(),
            View::Calendar => match self.calendar_focus {
                CalendarFocus::Agenda => self.agenda_todos().get(self.agenda_cursor).cloned(),
                CalendarFocus::Grid => None,
            },
        }
    }

    pub fn clamp_cursors(&mut self) {
        let list_len = self.visible_todos().len();
        self.list_cursor = self.list_cursor.min(list_len.saturating_sub(1));
        let agenda_len = self.agenda_todos().len();
        self.agenda_cursor = self.agenda_cursor.min(agenda_len.saturating_sub(1));
        self.agenda_scroll = self.agenda_scroll.min(self.agenda_cursor);
        if agenda_len == 0 {
            self.calendar_focus = CalendarFocus::Grid;
        }
    }

    /// Put the list cursor on the record with `id`, if it is visible
    pub fn focus_todo(&mut self, id: &str) {
        if let Some(i) = self.visible_todos().iter().position(|t| t.id == id) {
            self.list_cursor = i;
        }
    }

    /// Select a calendar day, following it into its month
    pub fn select_day(&mut self, date: NaiveDate) {
        let Some(month) = Month::containing(date) else {
            return;
        };
        self.selected_day = date;
        self.month = month;
        self.agenda_cursor = 0;
        self.agenda_scroll = 0;
    }

    /// Move to the same day of another month, clamped to that month's length
    pub fn select_month(&mut self, month: Month) {
        let day = self.selected_day.day().min(month.day_count());
        let date = NaiveDate::from_ymd_opt(month.year(), month.month(), day)
            .unwrap_or_else(|| month.first_day());
        self.select_day(date);
    }

    /// Reordering needs canonical positions, so it is only offered unfiltered
    pub fn can_move(&self) -> bool {
        self.filter == StatusFilter::All && self.search.is_empty()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = true;
    }

    fn report(&mut self, result: Result<bool, StoreError>) -> bool {
        match result {
            Ok(changed) => changed,
            Err(e) => {
                self.set_error(e.to_string());
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Store actions
    // -----------------------------------------------------------------------

    pub fn toggle_todo(&mut self, id: &str) {
        let result = self.store.toggle(id);
        if self.report(result) {
            self.clamp_cursors();
        }
    }

    /// Open the confirmation popup for `id`
    pub fn request_delete(&mut self, id: &str) {
        if let Some(pending) = self.store.request_remove(id) {
            self.pending_removal = Some(pending);
            self.mode = Mode::Confirm;
        }
    }

    pub fn resolve_delete(&mut self, decision: Decision) {
        self.mode = Mode::Navigate;
        let Some(pending) = self.pending_removal.take() else {
            return;
        };
        let label = pending.label().to_string();
        let result = self.store.resolve_removal(pending, decision);
        if self.report(result) {
            self.set_status(format!("deleted \"{}\"", label));
            self.clamp_cursors();
        }
    }

    /// Open the add form. In the calendar the due field starts on the selected day.
    pub fn open_add_form(&mut self) {
        let due = match self.view {
            View::Calendar => self.selected_day.format("%Y-%m-%d").to_string(),
            View::List => String::new(),
        };
        self.add_form = Some(AddForm::new(due));
        self.mode = Mode::Add;
    }

    /// Validate and add. On failure the form stays open with the message.
    pub fn submit_add_form(&mut self, now: NaiveDateTime) {
        let Some(form) = self.add_form.as_mut() else {
            return;
        };
        let due = match crate::ops::due::parse_optional_due(&form.due) {
            Ok(due) => due,
            Err(e) => {
                form.error = Some(e.to_string());
                return;
            }
        };
        let title = form.title.clone();
        match self.store.add_at(&title, due, now) {
            Ok(id) => {
                self.add_form = None;
                self.mode = Mode::Navigate;
                self.set_status(format!("added \"{}\"", title.trim()));
                if let Some(date) = due.map(|d| d.date())
                    && self.view == View::Calendar
                {
                    self.select_day(date);
                }
                self.focus_todo(&id);
            }
            Err(StoreError::Todo(e)) => {
                if let Some(form) = self.add_form.as_mut() {
                    form.error = Some(e.to_string());
                }
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn enter_move_mode(&mut self) {
        if !self.can_move() {
            self.set_error("clear filter and search to reorder");
            return;
        }
        if self.list_cursor < self.store.snapshot().len() {
            self.move_state = Some(MoveState {
                from: self.list_cursor,
                to: self.list_cursor,
            });
            self.mode = Mode::Move;
        }
    }

    /// Commit the previewed position as a single reorder
    pub fn commit_move(&mut self) {
        self.mode = Mode::Navigate;
        let Some(ms) = self.move_state.take() else {
            return;
        };
        let result = self.store.reorder(ms.from, ms.to);
        if self.report(result) {
            self.list_cursor = ms.to;
        } else {
            self.list_cursor = ms.from;
        }
    }

    pub fn cancel_move(&mut self) {
        if let Some(ms) = self.move_state.take() {
            self.list_cursor = ms.from;
        }
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // UI state
    // -----------------------------------------------------------------------

    pub fn ui_state(&self) -> UiState {
        UiState {
            view: self.view.into(),
            filter: self.filter,
            search: self.search.clone(),
            month: Some(self.month.to_string()),
            cursor_id: self
                .filtered_todos()
                .get(self.list_cursor)
                .map(|t| t.id.clone()),
        }
    }

    pub fn apply_ui_state(&mut self, state: UiState) {
        self.view = state.view.into();
        self.filter = state.filter;
        self.search = state.search;
        if let Some(month) = state.month.as_deref().and_then(Month::parse) {
            if month.contains(self.today) {
                self.select_day(self.today);
            } else {
                self.select_day(month.first_day());
            }
        }
        if let Some(id) = state.cursor_id {
            self.focus_todo(&id);
        }
        self.clamp_cursors();
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    let Some(dir) = app.docket_dir.clone() else {
        return;
    };
    if let Some(state) = read_ui_state(&dir) {
        app.apply_ui_state(state);
    }
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    if let Some(dir) = &app.docket_dir
        && let Err(e) = write_ui_state(dir, &app.ui_state())
    {
        log::warn!("could not save UI state: {}", e);
    }
}

/// Run the TUI application
pub fn run(project_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let docket = find_docket(project_dir)?;
    logging::init_tui(&docket.dir);
    let store = open_store(&docket)?;

    let mut app = App::new(
        &docket.config.docket.name,
        &docket.config.ui,
        store,
        Local::now().date_naive(),
    );
    app.docket_dir = Some(docket.dir.clone());

    // Restore saved UI state
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Save UI state before exit
    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        // Overdue marks follow the clock past midnight
        app.today = Local::now().date_naive();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
