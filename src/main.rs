use clap::Parser;
use docket::cli::commands::Cli;
use docket::cli::handlers;
use docket::io::logging;

fn main() {
    let cli = Cli::parse();

    if cli.command.is_none() {
        // No subcommand → launch TUI
        let project_dir = match handlers::resolve_project_dir(cli.project_dir.as_deref()) {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = docket::tui::run(project_dir.as_deref()) {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    logging::init_cli();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
