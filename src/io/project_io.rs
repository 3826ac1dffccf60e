use std::path::{Path, PathBuf};

use crate::io::config_io::read_config;
use crate::io::storage::{JsonDirStore, KeyValueStore};
use crate::model::docket::Docket;
use crate::ops::store::{DynStore, IdGenerator, Store, StoreError, UuidGenerator};

/// Name of the data directory
pub const DOCKET_DIR: &str = ".docket";
/// Config file inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Error type for docket discovery and loading
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("not a docket: no .docket/ directory found (run `dk init`)")]
    NotADocket,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Walk up from `start` looking for a `.docket/` directory with a config file.
/// Returns the directory containing it.
pub fn discover_docket(start: &Path) -> Result<PathBuf, ProjectError> {
    let mut current = start.to_path_buf();
    loop {
        let dir = current.join(DOCKET_DIR);
        if dir.is_dir() && dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ProjectError::NotADocket);
        }
    }
}

/// Load the docket rooted at `root`.
pub fn load_docket(root: &Path) -> Result<Docket, ProjectError> {
    let dir = root.join(DOCKET_DIR);
    if !dir.is_dir() {
        return Err(ProjectError::NotADocket);
    }
    let config = read_config(&dir)?;
    Ok(Docket {
        root: root.to_path_buf(),
        dir,
        config,
    })
}

/// Find and load the docket for an optional `-C` directory, defaulting to cwd.
pub fn find_docket(project_dir: Option<&Path>) -> Result<Docket, ProjectError> {
    let start = match project_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let root = discover_docket(&start)?;
    load_docket(&root)
}

/// Open the todo store backed by the docket directory.
pub fn open_store(docket: &Docket) -> Result<DynStore, ProjectError> {
    let storage: Box<dyn KeyValueStore> = Box::new(JsonDirStore::new(&docket.dir));
    let ids: Box<dyn IdGenerator> = Box::new(UuidGenerator);
    Ok(Store::open(storage, ids)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_docket(root: &Path, name: &str) -> Docket {
        let dir = root.join(DOCKET_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(CONFIG_FILE),
            format!("[docket]\nname = \"{}\"\n", name),
        )
        .unwrap();
        load_docket(root).unwrap()
    }

    #[test]
    fn discover_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        make_docket(tmp.path(), "home");
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let root = discover_docket(&nested).unwrap();
        assert_eq!(root, tmp.path());

        let docket = find_docket(Some(nested.as_path())).unwrap();
        assert_eq!(docket.config.docket.name, "home");
        assert_eq!(docket.dir, tmp.path().join(DOCKET_DIR));
    }

    #[test]
    fn discover_fails_without_docket() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_docket(tmp.path()),
            Err(ProjectError::NotADocket)
        ));
    }

    #[test]
    fn dir_without_config_is_not_a_docket() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(DOCKET_DIR)).unwrap();
        assert!(discover_docket(tmp.path()).is_err());
    }

    #[test]
    fn open_store_persists_into_docket_dir() {
        let tmp = TempDir::new().unwrap();
        let docket = make_docket(tmp.path(), "home");

        let mut store = open_store(&docket).unwrap();
        let id = store.add("Buy milk", None).unwrap();
        assert!(docket.dir.join("todos.json").exists());

        let reopened = open_store(&docket).unwrap();
        assert_eq!(reopened.get(&id).unwrap().title, "Buy milk");
    }

    #[test]
    fn corrupt_todos_fail_to_open() {
        let tmp = TempDir::new().unwrap();
        let docket = make_docket(tmp.path(), "home");
        fs::write(docket.dir.join("todos.json"), "not json").unwrap();
        assert!(matches!(open_store(&docket), Err(ProjectError::Store(_))));
    }
}
