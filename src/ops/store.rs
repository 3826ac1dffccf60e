use chrono::{Local, NaiveDateTime};

use crate::io::storage::{self, KeyValueStore, StorageError};
use crate::model::todo::{Collection, Todo};
use crate::ops::todo_ops::{self, NewTodo, TodoError};

/// Source of fresh record identifiers
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

impl<T: IdGenerator + ?Sized> IdGenerator for Box<T> {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}

/// Random v4 uuids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic ids `<prefix>1`, `<prefix>2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// The answer a removal dialog produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirm,
    Cancel,
}

/// A synchronous confirmation dialog. `title` is the title of the record
/// about to be removed.
pub trait Dialog {
    fn confirm(&mut self, title: Option<&str>) -> Decision;
}

/// A pre-answered dialog
impl Dialog for Decision {
    fn confirm(&mut self, _title: Option<&str>) -> Decision {
        *self
    }
}

/// A removal waiting on the user's answer. Only the Store creates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemoval {
    id: String,
    title: Option<String>,
}

impl PendingRemoval {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// What the dialog shows for the record
    pub fn label(&self) -> &str {
        self.title().unwrap_or("this item")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Todo(#[from] TodoError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owns the current collection snapshot and writes every change through to
/// storage before it becomes current.
pub struct Store<S: KeyValueStore, G: IdGenerator> {
    storage: S,
    ids: G,
    collection: Collection,
    version: u64,
}

/// Store over boxed trait objects, as the binaries build it
pub type DynStore = Store<Box<dyn KeyValueStore>, Box<dyn IdGenerator>>;

impl<S: KeyValueStore, G: IdGenerator> Store<S, G> {
    /// Load the collection from `storage`. A missing key starts empty.
    pub fn open(storage: S, ids: G) -> Result<Self, StoreError> {
        let collection = storage::load_collection(&storage)?;
        log::debug!("loaded {} todos", collection.len());
        Ok(Store {
            storage,
            ids,
            collection,
            version: 0,
        })
    }

    pub fn snapshot(&self) -> &Collection {
        &self.collection
    }

    pub fn todos(&self) -> &[Todo] {
        self.collection.todos()
    }

    /// Bumped on every successful mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.collection.get(id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.collection.position(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Create a record against the local clock. Returns the new id.
    pub fn add(&mut self, title: &str, due: Option<NaiveDateTime>) -> Result<String, StoreError> {
        self.add_at(title, due, Local::now().naive_local())
    }

    pub fn add_at(
        &mut self,
        title: &str,
        due: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<String, StoreError> {
        let new = NewTodo::new(title, due);
        todo_ops::validate(&new, now)?;
        let id = self.ids.next_id();
        let next = todo_ops::add(&self.collection, new, id.clone(), now)?;
        self.commit(next, "add")?;
        Ok(id)
    }

    /// Flip completion. Returns false (and writes nothing) for an unknown id.
    pub fn toggle(&mut self, id: &str) -> Result<bool, StoreError> {
        if !self.collection.contains(id) {
            return Ok(false);
        }
        let next = todo_ops::toggle(&self.collection, id);
        self.commit(next, "toggle")?;
        Ok(true)
    }

    /// Move the record at `old_index` to `new_index`. Returns false for a
    /// same-index move.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) -> Result<bool, StoreError> {
        let next = todo_ops::reorder(&self.collection, old_index, new_index)?;
        if old_index == new_index {
            return Ok(false);
        }
        self.commit(next, "reorder")?;
        Ok(true)
    }

    /// Start a removal. None if the id is unknown.
    pub fn request_remove(&self, id: &str) -> Option<PendingRemoval> {
        self.collection.get(id).map(|todo| PendingRemoval {
            id: todo.id.clone(),
            title: Some(todo.title.clone()).filter(|t| !t.is_empty()),
        })
    }

    /// Finish a removal. Only `Decision::Confirm` removes anything.
    pub fn resolve_removal(
        &mut self,
        pending: PendingRemoval,
        decision: Decision,
    ) -> Result<bool, StoreError> {
        if decision == Decision::Cancel {
            log::debug!("removal of {} cancelled", pending.id);
            return Ok(false);
        }
        if !self.collection.contains(&pending.id) {
            return Ok(false);
        }
        let next = todo_ops::remove(&self.collection, &pending.id);
        self.commit(next, "remove")?;
        Ok(true)
    }

    /// Ask `dialog` and remove on confirmation
    pub fn remove_with<D: Dialog + ?Sized>(
        &mut self,
        id: &str,
        dialog: &mut D,
    ) -> Result<bool, StoreError> {
        let Some(pending) = self.request_remove(id) else {
            return Ok(false);
        };
        let decision = dialog.confirm(pending.title());
        self.resolve_removal(pending, decision)
    }

    fn commit(&mut self, next: Collection, action: &str) -> Result<(), StoreError> {
        if let Err(e) = storage::save_collection(&mut self.storage, &next) {
            log::warn!("{} not saved: {}", action, e);
            return Err(e.into());
        }
        self.collection = next;
        self.version += 1;
        log::debug!(
            "{}: {} todos, version {}",
            action,
            self.collection.len(),
            self.version
        );
        Ok(())
    }
}
