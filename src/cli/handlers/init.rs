use std::fs;
use std::path::PathBuf;

use crate::cli::commands::InitArgs;
use crate::io::project_io::{self, CONFIG_FILE, DOCKET_DIR};

const CONFIG_TOML_TEMPLATE: &str = r##"[docket]
name = "{name}"

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# default_view = "calendar"        # "calendar" or "list"
# show_key_hints = false
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# red = "#FF4444"
# yellow = "#FFD700"
# green = "#44FF88"
# cyan = "#44DDFF"
"##;

/// Infer a docket name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_config_toml(name: &str) -> String {
    CONFIG_TOML_TEMPLATE.replace("{name}", &name.replace('"', "'"))
}

pub fn cmd_init(
    args: InitArgs,
    project_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = match project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let docket_dir = root.join(DOCKET_DIR);
    let config_path = docket_dir.join(CONFIG_FILE);

    if config_path.exists() && !args.force {
        return Err(format!(
            "docket already exists in {} (use --force to rewrite config.toml)",
            docket_dir.display()
        )
        .into());
    }

    // Check for parent docket and warn
    if let Some(parent) = root.parent()
        && let Ok(parent_root) = project_io::discover_docket(parent)
    {
        eprintln!(
            "Note: parent docket found at {}/",
            parent_root.join(DOCKET_DIR).display()
        );
    }

    let name = args.name.unwrap_or_else(|| {
        root.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Untitled".to_string())
    });

    // Existing todos.json is left in place on --force
    fs::create_dir_all(&docket_dir)?;
    fs::write(&config_path, render_config_toml(&name))?;
    log::info!("initialized docket at {}", docket_dir.display());

    println!("Initialized docket: {}", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::{DocketConfig, ViewKind};

    #[test]
    fn test_infer_name() {
        assert_eq!(infer_name("weekend-chores"), "Weekend Chores");
        assert_eq!(infer_name("home"), "Home");
    }

    #[test]
    fn test_template_parses_with_defaults() {
        let config: DocketConfig = toml::from_str(&render_config_toml("My \"Docket\"")).unwrap();
        assert_eq!(config.docket.name, "My 'Docket'");
        assert_eq!(config.ui.default_view, ViewKind::Calendar);
        assert!(config.ui.show_key_hints);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn test_init_creates_config_and_refuses_rerun() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path().join("weekend-chores");
        fs::create_dir_all(&root).unwrap();

        let args = || InitArgs {
            name: None,
            force: false,
        };
        cmd_init(args(), Some(root.clone())).unwrap();
        let docket = project_io::load_docket(&root).unwrap();
        assert_eq!(docket.config.docket.name, "Weekend Chores");

        assert!(cmd_init(args(), Some(root.clone())).is_err());

        let forced = InitArgs {
            name: Some("Renamed".into()),
            force: true,
        };
        cmd_init(forced, Some(root.clone())).unwrap();
        let docket = project_io::load_docket(&root).unwrap();
        assert_eq!(docket.config.docket.name, "Renamed");
    }
}
