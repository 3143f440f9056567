//! All-or-nothing behavior of store transactions: an uncommitted or failed
//! transaction must leave every task row exactly as it was.

use tavla_core::BoardError;
use tavla_domain::{BoardOperations, NewTask, Task};
use tavla_store::{BoardService, BoardStore, MemoryStore, StoreTransaction};

async fn seeded_store() -> (MemoryStore, i64, Vec<i64>) {
    let store = MemoryStore::new();
    let service = BoardService::new(store.clone());
    let column = service.create_column("Todo".to_string()).await.unwrap();
    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        let task = service
            .create_task(NewTask {
                column_id: column.id,
                title: title.to_string(),
                description: None,
            })
            .await
            .unwrap();
        ids.push(task.id);
    }
    (store, column.id, ids)
}

fn snapshot(tasks: &[Task]) -> Vec<(i64, i64, i32)> {
    tasks.iter().map(|t| (t.id, t.column_id, t.position)).collect()
}

#[tokio::test]
async fn test_dropped_transaction_rolls_back() {
    let (store, column_id, ids) = seeded_store().await;
    let before = snapshot(&store.list_tasks_by_column(column_id).await.unwrap());

    {
        let mut tx = store.begin().await.unwrap();
        tx.set_task_placement(ids[0], column_id, 2).await.unwrap();
        tx.set_task_placement(ids[2], column_id, 0).await.unwrap();
        // Dropped without commit.
    }

    let after = snapshot(&store.list_tasks_by_column(column_id).await.unwrap());
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_failure_partway_leaves_no_partial_renumbering() {
    let (store, column_id, ids) = seeded_store().await;
    let before = snapshot(&store.list_tasks_by_column(column_id).await.unwrap());

    let result: Result<(), BoardError> = async {
        let mut tx = store.begin().await?;
        tx.set_task_placement(ids[0], column_id, 1).await?;
        tx.set_task_placement(ids[1], column_id, 0).await?;
        // A write against a missing row aborts the whole batch.
        tx.set_task_placement(9999, column_id, 2).await?;
        tx.commit().await
    }
    .await;

    assert!(matches!(result, Err(BoardError::TaskNotFound(9999))));
    let after = snapshot(&store.list_tasks_by_column(column_id).await.unwrap());
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_committed_transaction_is_visible() {
    let (store, column_id, ids) = seeded_store().await;

    let mut tx = store.begin().await.unwrap();
    tx.set_task_placement(ids[0], column_id, 2).await.unwrap();
    tx.set_task_placement(ids[1], column_id, 0).await.unwrap();
    tx.set_task_placement(ids[2], column_id, 1).await.unwrap();
    tx.commit().await.unwrap();

    let tasks = store.list_tasks_by_column(column_id).await.unwrap();
    assert_eq!(
        tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![ids[1], ids[2], ids[0]]
    );
}

#[tokio::test]
async fn test_reads_within_transaction_see_own_writes() {
    let (store, column_id, ids) = seeded_store().await;

    let mut tx = store.begin().await.unwrap();
    tx.set_task_placement(ids[0], column_id, 5).await.unwrap();
    let inside = tx.find_task(ids[0]).await.unwrap().unwrap();
    assert_eq!(inside.position, 5);

    // Not visible outside until commit.
    let outside = store.find_task(ids[0]).await.unwrap().unwrap();
    assert_eq!(outside.position, 0);
}
