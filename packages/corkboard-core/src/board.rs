/// Board controller: the single entry point UI surfaces talk to.
///
/// The store is the source of truth. The controller keeps a derived task
/// list cache that is invalidated on every write and re-read lazily, so a
/// view can call `tasks()` repeatedly between mutations without hitting the
/// store each time.

use std::sync::{Arc, RwLock};

use crate::csv;
use crate::search;
use crate::storage::{StoreError, TaskStore};
use crate::types::{Column, ColumnSummary, Task, TaskDraft, TaskPatch};

pub struct Board {
    store: Arc<dyn TaskStore>,
    cache: RwLock<Option<Vec<Task>>>,
}

impl Board {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    /// Create a task. New tasks land in the draft's column (backlog by
    /// default); a blank title is rejected by the store.
    pub fn create(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        let task = self.store.add(draft)?;
        self.invalidate();
        Ok(task)
    }

    /// Move a task to another column.
    pub fn move_task(&self, id: u64, column: Column) -> Result<Task, StoreError> {
        let task = self.store.update(id, TaskPatch::move_to(column))?;
        self.invalidate();
        Ok(task)
    }

    /// Apply an arbitrary field update.
    pub fn update(&self, id: u64, patch: TaskPatch) -> Result<Task, StoreError> {
        let task = self.store.update(id, patch)?;
        self.invalidate();
        Ok(task)
    }

    pub fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.store.delete(id)?;
        self.invalidate();
        Ok(())
    }

    /// All tasks in insertion order, served from the cache when warm.
    pub fn tasks(&self) -> Vec<Task> {
        if let Some(tasks) = self.cache.read().unwrap().as_ref() {
            return tasks.clone();
        }
        let tasks = self.store.list();
        *self.cache.write().unwrap() = Some(tasks.clone());
        tasks
    }

    /// Tasks in one column, soonest due date first; tasks without a due
    /// date sort last, ties keep insertion order.
    pub fn tasks_in(&self, column: Column) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks()
            .into_iter()
            .filter(|t| t.column == column)
            .collect();
        tasks.sort_by(|a, b| {
            let da = a.due_date.as_deref().and_then(search::parse_due_date);
            let db = b.due_date.as_deref().and_then(search::parse_due_date);
            match (da, db) {
                (Some(a_due), Some(b_due)) => a_due.cmp(&b_due).then(a.id.cmp(&b.id)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.id.cmp(&b.id),
            }
        });
        tasks
    }

    /// Case-insensitive substring filter over title and description.
    pub fn filter(&self, term: &str) -> Vec<Task> {
        let tasks = self.tasks();
        search::filter_tasks(&tasks, term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Task count per column, in board order.
    pub fn summaries(&self) -> Vec<ColumnSummary> {
        let tasks = self.tasks();
        Column::ALL
            .iter()
            .map(|&column| ColumnSummary {
                column,
                task_count: tasks.iter().filter(|t| t.column == column).count(),
            })
            .collect()
    }

    /// Export all tasks as CSV text, in insertion order.
    pub fn export_csv(&self) -> String {
        csv::encode(&self.tasks())
    }

    /// Import tasks from CSV text. Every record becomes a brand-new task
    /// with a fresh id; nothing is merged or de-duplicated. Rows are written
    /// one at a time, so a store failure mid-import leaves the rows already
    /// written in place and reports the error.
    pub fn import_csv(&self, text: &str) -> Result<usize, StoreError> {
        let drafts = csv::decode(text);
        let total = drafts.len();

        for draft in drafts {
            if let Err(err) = self.store.add(draft) {
                self.invalidate();
                return Err(err);
            }
        }

        self.invalidate();
        log::info!("[corkboard.board.import] Imported {} tasks", total);
        Ok(total)
    }

    fn invalidate(&self) {
        *self.cache.write().unwrap() = None;
    }
}
