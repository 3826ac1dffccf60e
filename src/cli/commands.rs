use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dk", about = concat!("docket v", env!("CARGO_PKG_VERSION"), " - to-dos with a calendar"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different directory
    #[arg(short = 'C', long = "project-dir", global = true)]
    pub project_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new docket in the current directory
    Init(InitArgs),
    /// List todos
    List(ListArgs),
    /// Show one todo
    Show(ShowArgs),
    /// Add a todo at the end of the list
    Add(AddArgs),
    /// Toggle a todo between active and completed
    Toggle(ToggleArgs),
    /// Delete a todo (asks for confirmation)
    Rm(RmArgs),
    /// Move a todo to another position
    Mv(MvArgs),
    /// Show a month calendar of due todos
    Calendar(CalendarArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Docket name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Rewrite config.toml even if .docket/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (all, active, completed)
    #[arg(long, default_value = "all")]
    pub status: String,
    /// Only todos whose title contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Todo ID (any unique prefix)
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Title
    pub title: String,
    /// Due date: "YYYY-MM-DD HH:MM" or "YYYY-MM-DD" (end of day)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Todo ID (any unique prefix)
    pub id: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Todo ID (any unique prefix)
    pub id: String,
    /// Delete without asking
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct MvArgs {
    /// Current position (1-based)
    pub from: usize,
    /// New position (1-based)
    pub to: usize,
}

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show as YYYY-MM (default: current month)
    #[arg(long)]
    pub month: Option<String>,
    /// Filter by status (all, active, completed)
    #[arg(long, default_value = "all")]
    pub status: String,
    /// Only todos whose title contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
}
