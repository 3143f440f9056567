use tavla_domain::{BoardOperations, NewTask, Task};
use tavla_store::{BoardService, BoardStore, SqliteStore, StoreTransaction};

fn assert_dense(tasks: &[Task]) {
    for (expected, task) in tasks.iter().enumerate() {
        assert_eq!(task.position, expected as i32);
    }
}

#[tokio::test]
async fn test_sqlite_end_to_end_move() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("board.db"));
    let service = BoardService::new(store);

    let backlog = service.create_column("Backlog".to_string()).await.unwrap();
    let doing = service.create_column("Doing".to_string()).await.unwrap();
    assert_eq!(backlog.position, 0);
    assert_eq!(doing.position, 1);

    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        let task = service
            .create_task(NewTask {
                column_id: backlog.id,
                title: title.to_string(),
                description: Some(format!("about {}", title)),
            })
            .await
            .unwrap();
        ids.push(task.id);
    }

    service.reposition_task(ids[2], doing.id, 0).await.unwrap();

    let source = service.store().list_tasks_by_column(backlog.id).await.unwrap();
    assert_eq!(source.iter().map(|t| t.id).collect::<Vec<_>>(), ids[..2]);
    assert_dense(&source);

    let dest = service.store().list_tasks_by_column(doing.id).await.unwrap();
    assert_eq!(dest.iter().map(|t| t.id).collect::<Vec<_>>(), vec![ids[2]]);
    assert_dense(&dest);

    let moved = service.get_task(ids[2]).await.unwrap().unwrap();
    assert_eq!(moved.column_id, doing.id);
    assert_eq!(moved.title, "c");
    assert_eq!(moved.description.as_deref(), Some("about c"));
}

#[tokio::test]
async fn test_sqlite_dropped_transaction_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("board.db"));
    let service = BoardService::new(store);

    let column = service.create_column("Todo".to_string()).await.unwrap();
    let task = service
        .create_task(NewTask {
            column_id: column.id,
            title: "stay put".to_string(),
            description: None,
        })
        .await
        .unwrap();

    {
        let mut tx = service.store().begin().await.unwrap();
        tx.set_task_placement(task.id, column.id, 7).await.unwrap();
        // Dropped without commit.
    }

    let unchanged = service.get_task(task.id).await.unwrap().unwrap();
    assert_eq!(unchanged.position, 0);
}

#[tokio::test]
async fn test_sqlite_store_reopens_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");

    let column_id = {
        let service = BoardService::new(SqliteStore::new(&path));
        let column = service.create_column("Todo".to_string()).await.unwrap();
        column.id
    };

    let service = BoardService::new(SqliteStore::new(&path));
    let columns = service.list_columns().await.unwrap();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].id, column_id);
    assert_eq!(columns[0].name, "Todo");
}
