use std::path::PathBuf;

use super::config::DocketConfig;

/// A discovered docket: the directory holding config, todos and UI state
#[derive(Debug, Clone)]
pub struct Docket {
    /// Directory containing `.docket/`
    pub root: PathBuf,
    /// Path to the `.docket/` directory itself
    pub dir: PathBuf,
    /// Parsed config.toml
    pub config: DocketConfig,
}
