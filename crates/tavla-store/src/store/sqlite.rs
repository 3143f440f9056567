//! SQLite-backed store.
//!
//! The schema is bootstrapped from an embedded SQL file on first use. The
//! pool is capped at a single connection, so transactions on one database
//! fully serialize: two racing reposition calls each see a consistent
//! snapshot and the later commit decides the final order.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite, Transaction};
use tavla_core::{BoardError, BoardResult};
use tavla_domain::{Column, ColumnId, NewTask, Task, TaskId, TaskUpdate};

use crate::traits::{BoardStore, StoreTransaction};

const SCHEMA: &str = include_str!("../schema.sql");

pub struct SqliteStore {
    path: PathBuf,
    pool: tokio::sync::OnceCell<Pool<Sqlite>>,
}

impl SqliteStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pool: tokio::sync::OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn get_pool(&self) -> BoardResult<&Pool<Sqlite>> {
        self.pool
            .get_or_try_init(|| async {
                let options = SqliteConnectOptions::from_str(&format!(
                    "sqlite://{}?mode=rwc",
                    self.path.display()
                ))
                .map_err(|e| BoardError::Database(e.to_string()))?
                .create_if_missing(true)
                .foreign_keys(true)
                .busy_timeout(std::time::Duration::from_secs(5));

                // One connection: writers to the same database serialize.
                let pool = SqlitePoolOptions::new()
                    .max_connections(1)
                    .connect_with(options)
                    .await
                    .map_err(|e| BoardError::Database(e.to_string()))?;

                sqlx::raw_sql(SCHEMA)
                    .execute(&pool)
                    .await
                    .map_err(|e| BoardError::Database(e.to_string()))?;

                Ok(pool)
            })
            .await
    }
}

fn row_to_column(row: &SqliteRow) -> Column {
    Column {
        id: row.get("id"),
        name: row.get("name"),
        position: row.get("position"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    }
}

fn row_to_task(row: &SqliteRow) -> Task {
    Task {
        id: row.get("id"),
        column_id: row.get("column_id"),
        title: row.get("title"),
        description: row.get("description"),
        position: row.get("position"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    }
}

const TASK_COLUMNS: &str = "id, column_id, title, description, position, created_at, updated_at";
const COLUMN_COLUMNS: &str = "id, name, position, created_at, updated_at";

#[async_trait]
impl BoardStore for SqliteStore {
    async fn find_task(&self, id: TaskId) -> BoardResult<Option<Task>> {
        let pool = self.get_pool().await?;
        let row = sqlx::query(&format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(row.as_ref().map(row_to_task))
    }

    async fn find_column(&self, id: ColumnId) -> BoardResult<Option<Column>> {
        let pool = self.get_pool().await?;
        let row = sqlx::query(&format!(
            "SELECT {} FROM columns WHERE id = ?",
            COLUMN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(row.as_ref().map(row_to_column))
    }

    async fn list_columns(&self) -> BoardResult<Vec<Column>> {
        let pool = self.get_pool().await?;
        let rows = sqlx::query(&format!(
            "SELECT {} FROM columns ORDER BY position ASC",
            COLUMN_COLUMNS
        ))
        .fetch_all(pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(rows.iter().map(row_to_column).collect())
    }

    async fn list_tasks_by_column(&self, column_id: ColumnId) -> BoardResult<Vec<Task>> {
        let pool = self.get_pool().await?;
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tasks WHERE column_id = ? ORDER BY position ASC",
            TASK_COLUMNS
        ))
        .bind(column_id)
        .fetch_all(pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(rows.iter().map(row_to_task).collect())
    }

    async fn begin(&self) -> BoardResult<Box<dyn StoreTransaction>> {
        let pool = self.get_pool().await?;
        let tx = pool
            .begin()
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(Box::new(SqliteTransaction { tx }))
    }
}

/// Wraps an sqlx transaction. sqlx rolls back on drop, which is exactly the
/// contract [`StoreTransaction`] requires.
struct SqliteTransaction {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl StoreTransaction for SqliteTransaction {
    async fn find_task(&mut self, id: TaskId) -> BoardResult<Option<Task>> {
        let row = sqlx::query(&format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(row.as_ref().map(row_to_task))
    }

    async fn find_column(&mut self, id: ColumnId) -> BoardResult<Option<Column>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM columns WHERE id = ?",
            COLUMN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(row.as_ref().map(row_to_column))
    }

    async fn list_columns(&mut self) -> BoardResult<Vec<Column>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM columns ORDER BY position ASC",
            COLUMN_COLUMNS
        ))
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(rows.iter().map(row_to_column).collect())
    }

    async fn list_tasks_by_column(&mut self, column_id: ColumnId) -> BoardResult<Vec<Task>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tasks WHERE column_id = ? ORDER BY position ASC",
            TASK_COLUMNS
        ))
        .bind(column_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(rows.iter().map(row_to_task).collect())
    }

    async fn insert_column(&mut self, name: String, position: i32) -> BoardResult<Column> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO columns (name, position, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&name)
        .bind(position)
        .bind(now)
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(Column {
            id: result.last_insert_rowid(),
            name,
            position,
            created_at: now,
            updated_at: now,
        })
    }

    async fn insert_task(&mut self, new_task: &NewTask, position: i32) -> BoardResult<Task> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO tasks (column_id, title, description, position, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(new_task.column_id)
        .bind(&new_task.title)
        .bind(&new_task.description)
        .bind(position)
        .bind(now)
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(Task {
            id: result.last_insert_rowid(),
            column_id: new_task.column_id,
            title: new_task.title.clone(),
            description: new_task.description.clone(),
            position,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_task_fields(&mut self, id: TaskId, updates: TaskUpdate) -> BoardResult<Task> {
        let mut task = self
            .find_task(id)
            .await?
            .ok_or(BoardError::TaskNotFound(id))?;
        task.apply_update(updates);

        sqlx::query("UPDATE tasks SET title = ?, description = ?, updated_at = ? WHERE id = ?")
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.updated_at)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(task)
    }

    async fn set_task_placement(
        &mut self,
        id: TaskId,
        column_id: ColumnId,
        position: i32,
    ) -> BoardResult<()> {
        let result = sqlx::query(
            "UPDATE tasks SET column_id = ?, position = ?, updated_at = ? WHERE id = ?",
        )
        .bind(column_id)
        .bind(position)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BoardError::TaskNotFound(id));
        }
        Ok(())
    }

    async fn delete_task(&mut self, id: TaskId) -> BoardResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BoardError::TaskNotFound(id));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> BoardResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| BoardError::Database(e.to_string()))
    }
}
