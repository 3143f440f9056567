//! Transactional board operations over a [`BoardStore`].
//!
//! The repositioning engine lives here: validation and existence checks run
//! before any transaction opens, the pure planner computes the full set of
//! placement writes from snapshots read inside the transaction, and the
//! writes commit as one unit or not at all.

use async_trait::async_trait;
use tavla_core::{BoardError, BoardResult};
use tavla_domain::{
    reposition::plan_reposition, BoardColumn, BoardOperations, BoardView, Column, ColumnId,
    NewTask, Task, TaskId, TaskUpdate,
};

use crate::traits::{BoardStore, StoreTransaction};

pub struct BoardService<S: BoardStore> {
    store: S,
}

impl<S: BoardStore> BoardService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: BoardStore> BoardOperations for BoardService<S> {
    async fn board(&self) -> BoardResult<BoardView> {
        let columns = self.store.list_columns().await?;
        let mut board_columns = Vec::with_capacity(columns.len());
        for column in columns {
            let tasks = self.store.list_tasks_by_column(column.id).await?;
            board_columns.push(BoardColumn { column, tasks });
        }
        Ok(BoardView {
            columns: board_columns,
        })
    }

    async fn create_column(&self, name: String) -> BoardResult<Column> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(BoardError::Validation(
                "Column name must not be empty".to_string(),
            ));
        }

        let mut tx = self.store.begin().await?;
        let columns = tx.list_columns().await?;
        let position = columns.last().map(|c| c.position + 1).unwrap_or(0);
        let column = tx.insert_column(name, position).await?;
        tx.commit().await?;

        tracing::debug!(column_id = column.id, position, "created column");
        Ok(column)
    }

    async fn list_columns(&self) -> BoardResult<Vec<Column>> {
        self.store.list_columns().await
    }

    async fn create_task(&self, new_task: NewTask) -> BoardResult<Task> {
        let new_task = new_task.normalized()?;
        self.store
            .find_column(new_task.column_id)
            .await?
            .ok_or(BoardError::ColumnNotFound(new_task.column_id))?;

        let mut tx = self.store.begin().await?;
        let siblings = tx.list_tasks_by_column(new_task.column_id).await?;
        // Tail of the column: current max + 1, or 0 when empty.
        let position = siblings.last().map(|t| t.position + 1).unwrap_or(0);
        let task = tx.insert_task(&new_task, position).await?;
        tx.commit().await?;

        tracing::debug!(task_id = task.id, column_id = task.column_id, "created task");
        Ok(task)
    }

    async fn get_task(&self, id: TaskId) -> BoardResult<Option<Task>> {
        self.store.find_task(id).await
    }

    async fn update_task(&self, id: TaskId, updates: TaskUpdate) -> BoardResult<Task> {
        updates.validate()?;
        let updates = TaskUpdate {
            title: updates.title.map(|t| t.trim().to_string()),
            description: updates.description,
        };

        let mut tx = self.store.begin().await?;
        let task = tx.update_task_fields(id, updates).await?;
        tx.commit().await?;
        Ok(task)
    }

    async fn delete_task(&self, id: TaskId) -> BoardResult<()> {
        let mut tx = self.store.begin().await?;
        let task = tx
            .find_task(id)
            .await?
            .ok_or(BoardError::TaskNotFound(id))?;
        tx.delete_task(id).await?;

        // Compact the column so the remaining positions stay dense.
        let remaining = tx.list_tasks_by_column(task.column_id).await?;
        for (position, sibling) in remaining.iter().enumerate() {
            tx.set_task_placement(sibling.id, task.column_id, position as i32)
                .await?;
        }
        tx.commit().await?;

        tracing::debug!(task_id = id, column_id = task.column_id, "deleted task");
        Ok(())
    }

    async fn reposition_task(
        &self,
        id: TaskId,
        column_id: ColumnId,
        index: i64,
    ) -> BoardResult<()> {
        // Both lookups fail before anything is mutated.
        self.store
            .find_task(id)
            .await?
            .ok_or(BoardError::TaskNotFound(id))?;
        self.store
            .find_column(column_id)
            .await?
            .ok_or(BoardError::ColumnNotFound(column_id))?;

        let mut tx = self.store.begin().await?;

        // Re-read inside the transaction; the task may have moved or vanished
        // since the pre-check.
        let task = tx
            .find_task(id)
            .await?
            .ok_or(BoardError::TaskNotFound(id))?;

        let destination_tasks = tx.list_tasks_by_column(column_id).await?;
        let source_tasks = if task.column_id != column_id {
            tx.list_tasks_by_column(task.column_id).await?
        } else {
            Vec::new()
        };

        let plan = plan_reposition(&task, column_id, index, &destination_tasks, &source_tasks);
        for placement in &plan.placements {
            tx.set_task_placement(placement.task_id, placement.column_id, placement.position)
                .await?;
        }
        tx.commit().await?;

        tracing::debug!(
            task_id = id,
            destination_column_id = column_id,
            requested_index = index,
            writes = plan.placements.len(),
            "repositioned task"
        );
        Ok(())
    }
}
