// Task store: owns the collection, delegates durability to a Storage backend

use crate::error::{Error, Result};
use crate::notify;
use crate::query::{self, SortKey, TaskFilter};
use crate::storage::Storage;
use crate::task::{Priority, Status, Task, parse_deadline};
use tracing::{debug, info};

/// The in-memory task collection plus its durable backing
///
/// The store is the sole owner of all `Task` instances. Every mutation is
/// persisted before it is committed to memory, so a failed save leaves the
/// in-memory collection unchanged and the durable record set always mirrors
/// what callers observe.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Box<dyn Storage>,
}

/// Partial update for [`TaskStore::update`]
///
/// Absent fields keep the task's prior values; blank title, description, or
/// deadline text counts as absent.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl TaskStore {
    /// Open a store over the given backend, loading every durable record
    pub fn open(storage: Box<dyn Storage>) -> Result<Self> {
        storage.ensure_exists()?;
        let tasks = storage.load()?;
        info!(count = tasks.len(), "opened task store");
        Ok(Self { tasks, storage })
    }

    /// Next free id: max of the ids currently present, plus one
    ///
    /// The live collection mirrors durable storage (every mutation persists
    /// before it lands in memory), so this is "max id on disk + 1" and
    /// survives a restart unchanged.
    fn next_id(&self) -> u32 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Validate, assign an id, persist, and append a new Pending task
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        deadline: &str,
        priority: Option<Priority>,
    ) -> Result<Task> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() {
            return Err(Error::Validation("title must not be empty".to_string()));
        }
        if description.is_empty() {
            return Err(Error::Validation("description must not be empty".to_string()));
        }
        if deadline.trim().is_empty() {
            return Err(Error::Validation("deadline must not be empty".to_string()));
        }
        let deadline = parse_deadline(deadline)?;

        let task = Task {
            id: self.next_id(),
            title: title.to_string(),
            description: description.to_string(),
            deadline,
            priority,
            status: Status::Pending,
        };

        self.storage.save(&task)?;
        debug!(id = task.id, "added task");
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub fn get(&self, id: u32) -> Result<&Task> {
        self.tasks.iter().find(|t| t.id == id).ok_or(Error::NotFound(id))
    }

    /// Overwrite the supplied fields of an existing task
    ///
    /// Validation runs before any mutation; an unparseable deadline leaves
    /// both memory and storage untouched.
    pub fn update(&mut self, id: u32, patch: TaskPatch) -> Result<Task> {
        let index = self.index_of(id)?;

        let mut updated = self.tasks[index].clone();
        if let Some(title) = nonblank(patch.title) {
            updated.title = title;
        }
        if let Some(description) = nonblank(patch.description) {
            updated.description = description;
        }
        if let Some(deadline) = nonblank(patch.deadline) {
            updated.deadline = parse_deadline(&deadline)?;
        }
        if let Some(priority) = patch.priority {
            updated.priority = Some(priority);
        }
        if let Some(status) = patch.status {
            updated.status = status;
        }

        self.storage.save(&updated)?;
        debug!(id, "updated task");
        self.tasks[index] = updated.clone();
        Ok(updated)
    }

    /// Remove a task from durable storage and memory
    ///
    /// Deleting an id that is not present fails with [`Error::NotFound`].
    pub fn delete(&mut self, id: u32) -> Result<()> {
        let index = self.index_of(id)?;
        self.storage.delete(id)?;
        self.tasks.remove(index);
        debug!(id, "deleted task");
        Ok(())
    }

    /// Set a task's status to Completed and persist it
    ///
    /// Completed is terminal under this operation; re-opening a task goes
    /// through [`TaskStore::update`] with an explicit status.
    pub fn mark_complete(&mut self, id: u32) -> Result<Task> {
        let index = self.index_of(id)?;

        let mut updated = self.tasks[index].clone();
        updated.status = Status::Completed;

        self.storage.save(&updated)?;
        debug!(id, "marked task complete");
        self.tasks[index] = updated.clone();
        Ok(updated)
    }

    /// Read-only snapshot in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Tasks matching every supplied criterion, in insertion order
    pub fn filter(&self, criteria: &TaskFilter) -> Vec<&Task> {
        query::filter(&self.tasks, criteria)
    }

    /// New ordering, ascending by `key`; stable for equal keys
    pub fn sort(&self, key: SortKey) -> Vec<Task> {
        query::sort(&self.tasks, key)
    }

    /// Overdue and near-due messages for pending tasks
    pub fn notify(&self) -> Vec<String> {
        notify::notify(&self.tasks)
    }

    /// Persist the whole collection in one pass
    pub fn save_all(&self) -> Result<()> {
        self.storage.save_all(&self.tasks)
    }

    /// Drop the in-memory collection and reconstruct it from storage
    pub fn reload(&mut self) -> Result<()> {
        self.tasks = self.storage.load()?;
        info!(count = self.tasks.len(), "reloaded task store");
        Ok(())
    }

    fn index_of(&self, id: u32) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))
    }
}

fn nonblank(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
