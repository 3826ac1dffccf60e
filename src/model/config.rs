use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from .docket/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocketConfig {
    #[serde(default)]
    pub docket: DocketInfo,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocketInfo {
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for DocketInfo {
    fn default() -> Self {
        DocketInfo {
            name: default_name(),
        }
    }
}

fn default_name() -> String {
    "docket".to_string()
}

/// Which TUI view opens when there is no saved state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    List,
    #[default]
    Calendar,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub default_view: ViewKind,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            default_view: ViewKind::default(),
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
