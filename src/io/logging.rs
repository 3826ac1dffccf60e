use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Environment variable holding the log filter (`warn` when unset)
pub const LOG_ENV: &str = "DOCKET_LOG";

/// Log file inside the docket directory, used while the TUI owns the terminal
pub const LOG_FILE: &str = "docket.log";

fn builder() -> Builder {
    Builder::from_env(Env::new().filter_or(LOG_ENV, "warn"))
}

/// CLI logging goes to stderr.
pub fn init_cli() {
    let _ = builder().try_init();
}

/// TUI logging is appended to `.docket/docket.log`. Falls back to no logging
/// when the file cannot be opened, since stderr would draw over the screen.
pub fn init_tui(docket_dir: &Path) {
    let path = docket_dir.join(LOG_FILE);
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let _ = builder()
                .target(Target::Pipe(Box::new(file)))
                .format_timestamp_secs()
                .try_init();
        }
        Err(_) => log::set_max_level(log::LevelFilter::Off),
    }
}
