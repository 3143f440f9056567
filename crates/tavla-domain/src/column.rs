use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ColumnId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    /// Ordinal rank among columns: unique, dense, ascending from 0.
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    pub fn new(id: ColumnId, name: String, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            position,
            created_at: now,
            updated_at: now,
        }
    }
}
