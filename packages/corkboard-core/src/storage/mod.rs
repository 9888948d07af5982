pub mod local;

pub use local::LocalStore;

use crate::types::{Task, TaskDraft, TaskPatch};

/// Abstract store trait for task table backends.
/// Implementations: LocalStore (JSON file on disk), future: sqlite, sync.
pub trait TaskStore: Send + Sync {
    /// Insert a new task. The store assigns the id and creation timestamp.
    fn add(&self, draft: TaskDraft) -> Result<Task, StoreError>;

    /// Apply a partial update to an existing task.
    fn update(&self, id: u64, patch: TaskPatch) -> Result<Task, StoreError>;

    /// Remove a task permanently. Its id is never handed out again.
    fn delete(&self, id: u64) -> Result<(), StoreError>;

    /// All tasks, in insertion order.
    fn list(&self) -> Vec<Task>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    TaskNotFound(u64),

    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
