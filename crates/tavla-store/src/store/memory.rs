//! In-memory store with copy-on-write transactions.
//!
//! A transaction clones the whole board state and works on the copy; commit
//! swaps the copy back under the lock. Dropping an uncommitted transaction
//! discards the copy, which gives the same all-or-nothing behavior as a real
//! database rollback. Concurrent transactions serialize on commit order.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tavla_core::{BoardError, BoardResult};
use tavla_domain::{Column, ColumnId, NewTask, Task, TaskId, TaskUpdate};

use crate::traits::{BoardStore, StoreTransaction};

#[derive(Debug, Clone)]
struct MemoryState {
    columns: Vec<Column>,
    tasks: Vec<Task>,
    next_column_id: ColumnId,
    next_task_id: TaskId,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            tasks: Vec::new(),
            next_column_id: 1,
            next_task_id: 1,
        }
    }
}

impl MemoryState {
    fn columns_ranked(&self) -> Vec<Column> {
        let mut columns = self.columns.clone();
        columns.sort_by_key(|c| c.position);
        columns
    }

    fn tasks_in_column(&self, column_id: ColumnId) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| t.column_id == column_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.position);
        tasks
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> BoardResult<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| BoardError::Internal("Memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BoardStore for MemoryStore {
    async fn find_task(&self, id: TaskId) -> BoardResult<Option<Task>> {
        Ok(self.locked()?.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn find_column(&self, id: ColumnId) -> BoardResult<Option<Column>> {
        Ok(self.locked()?.columns.iter().find(|c| c.id == id).cloned())
    }

    async fn list_columns(&self) -> BoardResult<Vec<Column>> {
        Ok(self.locked()?.columns_ranked())
    }

    async fn list_tasks_by_column(&self, column_id: ColumnId) -> BoardResult<Vec<Task>> {
        Ok(self.locked()?.tasks_in_column(column_id))
    }

    async fn begin(&self) -> BoardResult<Box<dyn StoreTransaction>> {
        let working = self.locked()?.clone();
        Ok(Box::new(MemoryTransaction {
            shared: Arc::clone(&self.state),
            working,
        }))
    }
}

struct MemoryTransaction {
    shared: Arc<Mutex<MemoryState>>,
    working: MemoryState,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn find_task(&mut self, id: TaskId) -> BoardResult<Option<Task>> {
        Ok(self.working.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn find_column(&mut self, id: ColumnId) -> BoardResult<Option<Column>> {
        Ok(self.working.columns.iter().find(|c| c.id == id).cloned())
    }

    async fn list_columns(&mut self) -> BoardResult<Vec<Column>> {
        Ok(self.working.columns_ranked())
    }

    async fn list_tasks_by_column(&mut self, column_id: ColumnId) -> BoardResult<Vec<Task>> {
        Ok(self.working.tasks_in_column(column_id))
    }

    async fn insert_column(&mut self, name: String, position: i32) -> BoardResult<Column> {
        let id = self.working.next_column_id;
        self.working.next_column_id += 1;
        let column = Column::new(id, name, position);
        self.working.columns.push(column.clone());
        Ok(column)
    }

    async fn insert_task(&mut self, new_task: &NewTask, position: i32) -> BoardResult<Task> {
        let id = self.working.next_task_id;
        self.working.next_task_id += 1;
        let task = Task::new(
            id,
            new_task.column_id,
            new_task.title.clone(),
            new_task.description.clone(),
            position,
        );
        self.working.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task_fields(&mut self, id: TaskId, updates: TaskUpdate) -> BoardResult<Task> {
        let task = self
            .working
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(BoardError::TaskNotFound(id))?;
        task.apply_update(updates);
        Ok(task.clone())
    }

    async fn set_task_placement(
        &mut self,
        id: TaskId,
        column_id: ColumnId,
        position: i32,
    ) -> BoardResult<()> {
        let task = self
            .working
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(BoardError::TaskNotFound(id))?;
        task.move_to_column(column_id, position);
        Ok(())
    }

    async fn delete_task(&mut self, id: TaskId) -> BoardResult<()> {
        let before = self.working.tasks.len();
        self.working.tasks.retain(|t| t.id != id);
        if self.working.tasks.len() == before {
            return Err(BoardError::TaskNotFound(id));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> BoardResult<()> {
        let mut shared = self
            .shared
            .lock()
            .map_err(|_| BoardError::Internal("Memory store lock poisoned".to_string()))?;
        *shared = self.working;
        Ok(())
    }
}
