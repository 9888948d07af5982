use serde::{Deserialize, Serialize};

/// The three fixed workflow stages of the board.
///
/// Kept as a closed enum so a task can never sit in a column the board does
/// not render. Unknown strings from external input decode to `Backlog`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    #[default]
    Backlog,
    InProgress,
    Done,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Backlog, Column::InProgress, Column::Done];

    /// Wire name, as written in the CSV `column` field and the store file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Backlog => "backlog",
            Column::InProgress => "inprogress",
            Column::Done => "done",
        }
    }

    /// Human-readable column title for display surfaces.
    pub fn title(&self) -> &'static str {
        match self {
            Column::Backlog => "Backlog",
            Column::InProgress => "In Progress",
            Column::Done => "Done",
        }
    }

    /// Decode a wire name. Anything unrecognized (including empty) falls
    /// back to `Backlog`, matching how imports of hand-edited CSV behave.
    pub fn decode(s: &str) -> Column {
        match s.trim() {
            "inprogress" => Column::InProgress,
            "done" => Column::Done,
            _ => Column::Backlog,
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single task on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique id assigned by the store. Monotonic, never reused.
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO-8601 timestamp string, kept verbatim as entered/imported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub column: Column,
    /// ISO-8601 timestamp assigned by the store at creation.
    #[serde(default)]
    pub created_at: String,
}

/// Fields for a task that does not exist yet. The store assigns `id` and
/// `created_at` on insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub column: Column,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Partial update for an existing task. `None` fields are left untouched;
/// `due_date` uses a nested Option so it can be explicitly cleared.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Option<String>>,
    pub column: Option<Column>,
}

impl TaskPatch {
    pub fn move_to(column: Column) -> Self {
        Self {
            column: Some(column),
            ..Default::default()
        }
    }

    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = &self.due_date {
            task.due_date = due_date.clone();
        }
        if let Some(column) = self.column {
            task.column = column;
        }
    }
}

/// Per-column task count, for list/summary surfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub column: Column,
    pub task_count: usize,
}
