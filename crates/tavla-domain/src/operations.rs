use async_trait::async_trait;
use tavla_core::BoardResult;

use crate::board::BoardView;
use crate::column::{Column, ColumnId};
use crate::task::{NewTask, Task, TaskId, TaskUpdate};

/// Request-facing contract every front end (CLI, future HTTP layer) programs
/// against. Adding a method here forces every implementation to add it.
#[async_trait]
pub trait BoardOperations: Send + Sync {
    /// Columns in rank order, each with its tasks in position order.
    async fn board(&self) -> BoardResult<BoardView>;

    /// Create a column at the tail of the rank order.
    async fn create_column(&self, name: String) -> BoardResult<Column>;

    async fn list_columns(&self) -> BoardResult<Vec<Column>>;

    /// Create a task at the tail of its column.
    async fn create_task(&self, new_task: NewTask) -> BoardResult<Task>;

    async fn get_task(&self, id: TaskId) -> BoardResult<Option<Task>>;

    /// Partial edit of title/description. At least one field is required.
    async fn update_task(&self, id: TaskId, updates: TaskUpdate) -> BoardResult<Task>;

    /// Delete a task and compact its column so positions stay dense.
    async fn delete_task(&self, id: TaskId) -> BoardResult<()>;

    /// Move a task to `column_id` at `index`, renumbering both affected
    /// columns. The index is clamped; out-of-range values land at the head or
    /// tail instead of failing.
    async fn reposition_task(
        &self,
        id: TaskId,
        column_id: ColumnId,
        index: i64,
    ) -> BoardResult<()>;
}
