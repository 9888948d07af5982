/// Local filesystem task store.
///
/// Persists the whole task table as one pretty-printed JSON file with:
/// - Auto-incrementing ids (high-water counter persisted, ids never reused)
/// - Atomic writes (write to .tmp, fsync, rename)
/// - Mutex-guarded read-modify-write so operations never interleave

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Task, TaskDraft, TaskPatch};
use super::{StoreError, TaskStore};

/// On-disk shape of the store file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    /// Next id to hand out. Monotonic across deletes and restarts.
    next_id: u64,
    tasks: Vec<Task>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            tasks: Vec::new(),
        }
    }
}

/// JSON-file-backed task store.
pub struct LocalStore {
    file_path: PathBuf,
    state: RwLock<StoreFile>,
    /// Serializes read-modify-write cycles across threads.
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Open a store file, creating an empty table if the file is missing.
    /// A file that exists but fails to parse is an error, not a reset.
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file_path = file_path.into();
        let state = if file_path.exists() {
            let content = fs::read_to_string(&file_path)?;
            serde_json::from_str(&content)?
        } else {
            log::info!(
                "[corkboard.store] No store file at {:?}, starting empty",
                file_path
            );
            StoreFile::default()
        };

        Ok(Self {
            file_path,
            state: RwLock::new(state),
            write_lock: Mutex::new(()),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Persist `state` to disk, then make it the in-memory state. On write
    /// failure the in-memory state is left untouched.
    fn commit(&self, state: StoreFile) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&state)?;
        Self::atomic_write(&self.file_path, &json)?;
        *self.state.write().unwrap() = state;
        Ok(())
    }

    /// Atomic write with fsync: write to .tmp, fsync, rename, fsync directory.
    fn atomic_write(path: &Path, content: &str) -> Result<(), std::io::Error> {
        let tmp_path = path.with_extension("corkboard.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;

        // fsync directory for rename durability
        if let Some(dir) = path.parent() {
            if let Ok(d) = fs::File::open(dir) {
                let _ = d.sync_all();
            }
        }
        Ok(())
    }
}

impl TaskStore for LocalStore {
    fn add(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        if draft.title.trim().is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let _guard = self.write_lock.lock().unwrap();
        let mut state = self.state.read().unwrap().clone();

        let task = Task {
            id: state.next_id,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            column: draft.column,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        state.next_id += 1;
        state.tasks.push(task.clone());

        self.commit(state)?;
        Ok(task)
    }

    fn update(&self, id: u64, patch: TaskPatch) -> Result<Task, StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut state = self.state.read().unwrap().clone();

        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        patch.apply(task);
        let updated = task.clone();

        self.commit(state)?;
        Ok(updated)
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut state = self.state.read().unwrap().clone();

        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(StoreError::TaskNotFound(id));
        }

        self.commit(state)
    }

    fn list(&self) -> Vec<Task> {
        self.state.read().unwrap().tasks.clone()
    }
}
