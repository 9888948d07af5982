/// Corkboard core: a local three-column kanban task board.
///
/// - `types` — task record, column enum, drafts and patches
/// - `storage` — the durable task table (`TaskStore` trait + `LocalStore`)
/// - `board` — the controller UI surfaces talk to
/// - `csv` — bulk import/export codec
/// - `search` — substring filter and due-date helpers

pub mod board;
pub mod csv;
pub mod search;
pub mod storage;
pub mod types;

pub use board::Board;
pub use storage::{LocalStore, StoreError, TaskStore};
pub use types::{Column, ColumnSummary, Task, TaskDraft, TaskPatch};
