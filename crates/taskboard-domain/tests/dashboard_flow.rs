use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{
    Dashboard, DashboardOptions, DragSource, DropTarget, NewTask, Profile, ProfileRepository,
    Session, StatusView, Task, TaskDraft, TaskId, TaskPatch, TaskQuery, TaskRepository,
    TaskStatus, User,
};
use uuid::Uuid;

/// Shared in-memory table standing in for the remote provider.
#[derive(Default)]
struct MemoryTable {
    rows: Mutex<Vec<Task>>,
    next_id: Mutex<u64>,
}

#[async_trait]
impl TaskRepository for MemoryTable {
    async fn list(&self, session: &Session, query: &TaskQuery) -> TaskboardResult<Vec<Task>> {
        let mut rows: Vec<Task> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == session.user_id())
            .filter(|t| query.status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, _session: &Session, task: NewTask) -> TaskboardResult<Task> {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let row = Task {
            id: TaskId::new(next.to_string()),
            title: task.title,
            notes: task.notes,
            priority: task.priority,
            status: task.status,
            user_id: task.user_id,
            created_at: Utc::now() + chrono::Duration::milliseconds(*next as i64),
            updated_at: None,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        session: &Session,
        id: &TaskId,
        patch: TaskPatch,
    ) -> TaskboardResult<Task> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| &t.id == id && t.user_id == session.user_id())
            .ok_or_else(|| TaskboardError::NotFound(format!("task {}", id)))?;
        patch.apply_to(row);
        Ok(row.clone())
    }

    async fn delete(&self, session: &Session, id: &TaskId) -> TaskboardResult<()> {
        self.rows
            .lock()
            .unwrap()
            .retain(|t| !(&t.id == id && t.user_id == session.user_id()));
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryTable {
    async fn get_profile(&self, session: &Session) -> TaskboardResult<Option<Profile>> {
        Ok(Some(Profile::new(session.user_id(), "Asha Rao")))
    }

    async fn insert_profile(
        &self,
        _session: Option<&Session>,
        _profile: &Profile,
    ) -> TaskboardResult<()> {
        Ok(())
    }
}

fn session() -> Session {
    Session {
        access_token: "token".into(),
        refresh_token: "refresh".into(),
        expires_at: None,
        user: User {
            id: Uuid::from_u128(42),
            email: Some("asha@example.com".into()),
        },
    }
}

fn dashboard(table: Arc<MemoryTable>) -> Dashboard {
    Dashboard::new(session(), table.clone(), table, DashboardOptions::default())
}

#[tokio::test]
async fn test_create_then_drag_to_completed() {
    let table = Arc::new(MemoryTable::default());
    let mut board = dashboard(table);
    board.load().await.unwrap();
    assert_eq!(board.profile().unwrap().initials().as_deref(), Some("AR"));

    board
        .create_task(&TaskDraft::new("Walk dog", "evening", "medium"))
        .await
        .unwrap();
    board
        .create_task(&TaskDraft::new("Buy milk", "2%", "low"))
        .await
        .unwrap();

    let todo = &board.columns()[0];
    assert_eq!(todo.status, TaskStatus::Todo);
    assert_eq!(todo.tasks[0].title, "Buy milk");

    board
        .drop_task(
            DragSource {
                status: TaskStatus::Todo,
                index: 0,
            },
            Some(DropTarget {
                status: TaskStatus::Completed,
                index: 0,
            }),
        )
        .await
        .unwrap();

    board.refresh().await.unwrap();
    let columns = board.columns();
    assert_eq!(columns[0].tasks.len(), 1);
    assert_eq!(columns[2].tasks[0].title, "Buy milk");
    assert_eq!(columns[2].tasks[0].status, TaskStatus::Completed);
}

#[tokio::test]
async fn test_deleted_task_does_not_reappear() {
    let table = Arc::new(MemoryTable::default());
    let mut board = dashboard(table);
    let task = board
        .create_task(&TaskDraft::new("Buy milk", "2%", "low"))
        .await
        .unwrap();

    board.delete_task(&task.id).await.unwrap();
    board.refresh().await.unwrap();
    assert!(board.task(&task.id).is_none());
    assert!(board.tasks().is_empty());
}

#[tokio::test]
async fn test_search_narrows_columns() {
    let table = Arc::new(MemoryTable::default());
    let mut board = dashboard(table);
    for (title, notes) in [("Buy milk", "2%"), ("Walk dog", "park")] {
        board
            .create_task(&TaskDraft::new(title, notes, "high"))
            .await
            .unwrap();
    }

    board.filters.search = "MILK".into();
    let titles: Vec<_> = board
        .columns()
        .iter()
        .flat_map(|c| c.tasks.iter().map(|t| t.title.clone()))
        .collect();
    assert_eq!(titles, vec!["Buy milk".to_string()]);
}

#[tokio::test]
async fn test_status_view_refetches_subset() {
    let table = Arc::new(MemoryTable::default());
    let mut board = dashboard(table);
    let task = board
        .create_task(&TaskDraft::new("Buy milk", "2%", "low"))
        .await
        .unwrap();
    board
        .create_task(&TaskDraft::new("Walk dog", "park", "low"))
        .await
        .unwrap();
    board
        .set_status(&task.id, TaskStatus::InProgress)
        .await
        .unwrap();

    board
        .set_status_view(StatusView::Only(TaskStatus::InProgress))
        .await
        .unwrap();
    assert_eq!(board.tasks().len(), 1);
    assert_eq!(board.tasks()[0].id, task.id);
}
