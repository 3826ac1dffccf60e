use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::todo::Collection;

/// Key the collection is stored under
pub const TODOS_KEY: &str = "todos";

/// Error type for key-value persistence
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },
    #[error("could not serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// String key-value persistence. `get` returns None for a missing key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

// ---------------------------------------------------------------------------
// Directory-backed store
// ---------------------------------------------------------------------------

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonDirStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonDirStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        atomic_write(&path, value.as_bytes()).map_err(|source| StorageError::Write { path, source })
    }
}

/// Write a file via a temp file in the same directory, then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// In-memory store that counts writes. Set `fail_writes` to simulate a full disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = MemoryStore::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Number of successful `set` calls
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write {
                path: PathBuf::from(key),
                source: io::Error::other("write refused"),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Collection (de)serialization
// ---------------------------------------------------------------------------

/// Load the collection. A missing key is an empty collection; a present but
/// unreadable value is an error.
pub fn load_collection<S: KeyValueStore + ?Sized>(store: &S) -> Result<Collection, StorageError> {
    match store.get(TODOS_KEY)? {
        None => Ok(Collection::default()),
        Some(raw) if raw.trim().is_empty() => Ok(Collection::default()),
        Some(raw) => serde_json::from_str(&raw).map_err(|source| {
            log::error!("stored todos are corrupt: {}", source);
            StorageError::Corrupt {
                key: TODOS_KEY.to_string(),
                source,
            }
        }),
    }
}

/// Serialize the whole collection and write it under `TODOS_KEY`.
pub fn save_collection<S: KeyValueStore + ?Sized>(
    store: &mut S,
    collection: &Collection,
) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(collection)?;
    store.set(TODOS_KEY, &json)
}
