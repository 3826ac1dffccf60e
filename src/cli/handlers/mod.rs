mod init;
pub use init::cmd_init;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::project_io::{self, ProjectError};
use crate::model::todo::{Collection, StatusFilter};
use crate::ops::calendar::{Month, month_grid};
use crate::ops::due::parse_due;
use crate::ops::filter::{FilterCounts, filter_todos};
use crate::ops::store::{Decision, Dialog, DynStore};

/// Error type for command-line id resolution
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("todo not found: {0}")]
    NotFound(String),
    #[error("id prefix '{prefix}' is ambiguous ({count} matches)")]
    AmbiguousId { prefix: String, count: usize },
    #[error("position {position} is out of range (1..={len})")]
    BadPosition { position: usize, len: usize },
    #[error("invalid month '{0}' (expected YYYY-MM)")]
    BadMonth(String),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;

    match cli.command {
        None => Err("no command given (try `dk --help`)".into()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, project_dir),

            // Read commands
            Commands::List(args) => cmd_list(args, project_dir, json),
            Commands::Show(args) => cmd_show(args, project_dir, json),
            Commands::Calendar(args) => cmd_calendar(args, project_dir, json),

            // Write commands
            Commands::Add(args) => cmd_add(args, project_dir),
            Commands::Toggle(args) => cmd_toggle(args, project_dir),
            Commands::Rm(args) => cmd_rm(args, project_dir),
            Commands::Mv(args) => cmd_mv(args, project_dir),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Canonicalize the `-C` override, if any
pub fn resolve_project_dir(dir: Option<&str>) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    match dir {
        Some(dir) => {
            let abs = std::fs::canonicalize(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
            Ok(Some(abs))
        }
        None => Ok(None),
    }
}

fn open_store(project_dir: Option<PathBuf>) -> Result<DynStore, ProjectError> {
    let docket = project_io::find_docket(project_dir.as_deref())?;
    project_io::open_store(&docket)
}

/// Resolve a full id or a unique id prefix to the stored id.
pub fn resolve_id(collection: &Collection, query: &str) -> Result<String, CliError> {
    if let Some(todo) = collection.get(query) {
        return Ok(todo.id.clone());
    }
    let matches: Vec<_> = collection
        .iter()
        .filter(|t| !query.is_empty() && t.id.starts_with(query))
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.id.clone()),
        [] => Err(CliError::NotFound(query.to_string())),
        _ => Err(CliError::AmbiguousId {
            prefix: query.to_string(),
            count: matches.len(),
        }),
    }
}

/// Convert a 1-based position into an index
fn position_to_index(position: usize, len: usize) -> Result<usize, CliError> {
    if position == 0 || position > len {
        return Err(CliError::BadPosition { position, len });
    }
    Ok(position - 1)
}

/// Asks `delete "<title>"? [y/N]` on stderr and reads the answer from `input`.
pub struct PromptDialog<R: BufRead> {
    input: R,
}

impl<R: BufRead> PromptDialog<R> {
    pub fn new(input: R) -> Self {
        PromptDialog { input }
    }
}

impl<R: BufRead> Dialog for PromptDialog<R> {
    fn confirm(&mut self, title: Option<&str>) -> Decision {
        eprint!("delete \"{}\"? [y/N] ", title.unwrap_or("this item"));
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return Decision::Cancel;
        }
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Decision::Confirm,
            _ => Decision::Cancel,
        }
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    project_dir: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(project_dir)?;
    let status: StatusFilter = args.status.parse()?;
    let search = args.search.unwrap_or_default();
    let visible = filter_todos(store.todos(), status, &search);

    if json {
        let out = list_to_json(store.snapshot(), &visible, status, &search);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if visible.is_empty() {
        if store.snapshot().is_empty() {
            println!("no todos yet (add one with `dk add`)");
        } else {
            println!("no todos match");
        }
        return Ok(());
    }
    for line in format_todo_listing(store.snapshot(), &visible) {
        println!("{}", line);
    }
    println!();
    println!(
        "{}",
        format_counts(visible.len(), &FilterCounts::of(store.todos()))
    );
    Ok(())
}

fn cmd_show(
    args: ShowArgs,
    project_dir: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(project_dir)?;
    let id = resolve_id(store.snapshot(), &args.id)?;
    let (todo, position) = match (store.get(&id), store.position(&id)) {
        (Some(todo), Some(position)) => (todo, position),
        _ => return Err(CliError::NotFound(args.id).into()),
    };

    if json {
        let out = todo_to_json(todo, Some(position + 1));
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_todo_detail(todo, position) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_calendar(
    args: CalendarArgs,
    project_dir: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(project_dir)?;
    let month = match args.month {
        Some(m) => Month::parse(&m).ok_or(CliError::BadMonth(m))?,
        None => Month::current(),
    };
    let status: StatusFilter = args.status.parse()?;
    let search = args.search.unwrap_or_default();
    let visible = filter_todos(store.todos(), status, &search);
    let grid = month_grid(&visible, month);

    if json {
        println!("{}", serde_json::to_string_pretty(&calendar_to_json(&grid))?);
    } else {
        for line in format_calendar(&grid) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, project_dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(project_dir)?;
    let due = args.due.as_deref().map(parse_due).transpose()?;
    let id = store.add(&args.title, due)?;
    println!("{}", id);
    Ok(())
}

fn cmd_toggle(
    args: ToggleArgs,
    project_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(project_dir)?;
    let id = resolve_id(store.snapshot(), &args.id)?;
    store.toggle(&id)?;
    if let Some(todo) = store.get(&id) {
        println!("{}", format_todo_line(todo));
    }
    Ok(())
}

fn cmd_rm(args: RmArgs, project_dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(project_dir)?;
    let id = resolve_id(store.snapshot(), &args.id)?;
    let removed = if args.yes {
        store.remove_with(&id, &mut Decision::Confirm)?
    } else {
        let stdin = io::stdin();
        store.remove_with(&id, &mut PromptDialog::new(stdin.lock()))?
    };
    if removed {
        println!("deleted {}", id);
    } else {
        eprintln!("cancelled");
    }
    Ok(())
}

fn cmd_mv(args: MvArgs, project_dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(project_dir)?;
    let len = store.snapshot().len();
    let from = position_to_index(args.from, len)?;
    let to = position_to_index(args.to, len)?;
    store.reorder(from, to)?;
    if let Some(todo) = store.todos().get(to) {
        println!("{}. {}", to + 1, format_todo_line(todo));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::todo::Todo;

    fn collection() -> Collection {
        Collection::from_todos(vec![
            Todo::new("abc123", "one", None),
            Todo::new("abd456", "two", None),
            Todo::new("xyz789", "three", None),
        ])
        .unwrap()
    }

    #[test]
    fn resolve_full_and_prefix() {
        let c = collection();
        assert_eq!(resolve_id(&c, "xyz789").unwrap(), "xyz789");
        assert_eq!(resolve_id(&c, "abc").unwrap(), "abc123");
        assert_eq!(resolve_id(&c, "x").unwrap(), "xyz789");
    }

    #[test]
    fn resolve_ambiguous_and_missing() {
        let c = collection();
        assert!(matches!(
            resolve_id(&c, "ab"),
            Err(CliError::AmbiguousId { count: 2, .. })
        ));
        assert!(matches!(resolve_id(&c, "q"), Err(CliError::NotFound(_))));
        assert!(matches!(resolve_id(&c, ""), Err(CliError::NotFound(_))));
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(position_to_index(1, 3).unwrap(), 0);
        assert_eq!(position_to_index(3, 3).unwrap(), 2);
        assert!(position_to_index(0, 3).is_err());
        assert!(position_to_index(4, 3).is_err());
    }

    #[test]
    fn prompt_dialog_reads_answer() {
        let mut yes = PromptDialog::new("y\n".as_bytes());
        assert_eq!(yes.confirm(Some("Buy milk")), Decision::Confirm);
        let mut no = PromptDialog::new("\n".as_bytes());
        assert_eq!(no.confirm(None), Decision::Cancel);
        let mut eof = PromptDialog::new("".as_bytes());
        assert_eq!(eof.confirm(None), Decision::Cancel);
    }
}
