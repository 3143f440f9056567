use async_trait::async_trait;
use tavla_core::BoardResult;
use tavla_domain::{Column, ColumnId, NewTask, Task, TaskId, TaskUpdate};

/// Data-access interface the repositioning engine runs against.
///
/// Implementations decide how transaction isolation is provided; the engine
/// relies on it to serialize concurrent moves that touch overlapping columns.
#[async_trait]
pub trait BoardStore: Send + Sync {
    async fn find_task(&self, id: TaskId) -> BoardResult<Option<Task>>;

    async fn find_column(&self, id: ColumnId) -> BoardResult<Option<Column>>;

    /// All columns in ascending rank order.
    async fn list_columns(&self) -> BoardResult<Vec<Column>>;

    /// Tasks of one column in ascending position order.
    async fn list_tasks_by_column(&self, column_id: ColumnId) -> BoardResult<Vec<Task>>;

    /// Open a transaction. Writes become visible only through
    /// [`StoreTransaction::commit`]; dropping the handle rolls back.
    async fn begin(&self) -> BoardResult<Box<dyn StoreTransaction>>;
}

/// Scoped transaction handle. Commit consumes the handle; every other exit
/// path (including a drop on an error return) rolls the transaction back, so
/// a failed multi-row renumbering leaves no partial state behind.
#[async_trait]
pub trait StoreTransaction: Send {
    async fn find_task(&mut self, id: TaskId) -> BoardResult<Option<Task>>;

    async fn find_column(&mut self, id: ColumnId) -> BoardResult<Option<Column>>;

    async fn list_columns(&mut self) -> BoardResult<Vec<Column>>;

    async fn list_tasks_by_column(&mut self, column_id: ColumnId) -> BoardResult<Vec<Task>>;

    async fn insert_column(&mut self, name: String, position: i32) -> BoardResult<Column>;

    /// Insert a task at the given position. The store assigns the id.
    async fn insert_task(&mut self, new_task: &NewTask, position: i32) -> BoardResult<Task>;

    /// Apply a partial title/description edit. Position and column are not
    /// touched here.
    async fn update_task_fields(&mut self, id: TaskId, updates: TaskUpdate) -> BoardResult<Task>;

    /// Rewrite one task's column reference and position.
    async fn set_task_placement(
        &mut self,
        id: TaskId,
        column_id: ColumnId,
        position: i32,
    ) -> BoardResult<()>;

    async fn delete_task(&mut self, id: TaskId) -> BoardResult<()>;

    async fn commit(self: Box<Self>) -> BoardResult<()>;
}
