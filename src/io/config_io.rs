use std::fs;
use std::path::Path;

use crate::io::project_io::{CONFIG_FILE, ProjectError};
use crate::model::config::DocketConfig;

/// Read and parse `config.toml` from the docket directory.
pub fn read_config(docket_dir: &Path) -> Result<DocketConfig, ProjectError> {
    let config_path = docket_dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| ProjectError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: DocketConfig = toml::from_str(&config_text)?;
    Ok(config)
}
