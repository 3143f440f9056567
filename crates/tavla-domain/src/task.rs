use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tavla_core::{BoardError, BoardResult};

use crate::column::ColumnId;
use crate::field_update::FieldUpdate;

pub type TaskId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub column_id: ColumnId,
    pub title: String,
    pub description: Option<String>,
    /// Zero-based rank within the owning column. Dense per column: the set of
    /// positions in a column of n tasks is exactly {0, .., n-1}.
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        id: TaskId,
        column_id: ColumnId,
        title: String,
        description: Option<String>,
        position: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            column_id,
            title,
            description,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn move_to_column(&mut self, column_id: ColumnId, position: i32) {
        self.column_id = column_id;
        self.position = position;
        self.updated_at = Utc::now();
    }

    pub fn apply_update(&mut self, updates: TaskUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        updates.description.apply_to(&mut self.description);
        self.updated_at = Utc::now();
    }
}

/// Input for task creation. The store assigns the id; the engine assigns the
/// tail position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub column_id: ColumnId,
    pub title: String,
    pub description: Option<String>,
}

impl NewTask {
    /// Trims text fields and rejects an empty title. An all-whitespace
    /// description collapses to None.
    pub fn normalized(self) -> BoardResult<Self> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(BoardError::Validation(
                "Task title must not be empty".to_string(),
            ));
        }
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(Self {
            column_id: self.column_id,
            title,
            description,
        })
    }
}

/// Partial update for task text fields. Position and column are never touched
/// here; those belong to the repositioning engine.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && !self.description.is_change()
    }

    pub fn validate(&self) -> BoardResult<()> {
        if self.is_empty() {
            return Err(BoardError::Validation(
                "At least one field must be provided".to_string(),
            ));
        }
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(BoardError::Validation(
                    "Task title must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
