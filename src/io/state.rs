use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::storage::atomic_write;
use crate::model::config::ViewKind;
use crate::model::todo::StatusFilter;

const STATE_FILE: &str = ".state.json";

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    /// Which view is showing
    pub view: ViewKind,
    #[serde(default)]
    pub filter: StatusFilter,
    #[serde(default)]
    pub search: String,
    /// Calendar month as `YYYY-MM`
    #[serde(default)]
    pub month: Option<String>,
    /// Id of the record under the list cursor
    #[serde(default)]
    pub cursor_id: Option<String>,
}

/// Read .state.json from the docket directory. Missing or unreadable state
/// is treated as absent.
pub fn read_ui_state(docket_dir: &Path) -> Option<UiState> {
    let path = docket_dir.join(STATE_FILE);
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(state) => Some(state),
        Err(e) => {
            log::warn!("ignoring unreadable {}: {}", STATE_FILE, e);
            None
        }
    }
}

/// Write .state.json to the docket directory
pub fn write_ui_state(docket_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = docket_dir.join(STATE_FILE);
    let content = serde_json::to_string_pretty(state)?;
    atomic_write(&path, content.as_bytes())
}
