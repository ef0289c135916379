//! Application state for a signed-in user.
//!
//! `Dashboard` owns the fetched tasks, the profile, the transient filter
//! state and the notice queue. Every remote call goes through the
//! repositories it was built with; every failure pushes an error notice
//! before the error is returned.

use crate::board::{group_into_columns, StatusColumn, StatusView};
use crate::drag::{resolve_drop, DragSource, DropOutcome, DropTarget};
use crate::filter::TaskFilters;
use crate::i18n::{Language, Text};
use crate::mutation::{MutationId, MutationKind, MutationLedger};
use crate::repository::{ensure_owned, ProfileRepository, TaskQuery, TaskRepository};
use crate::task::next_updated_at;
use crate::{NewTask, Profile, Session, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use taskboard_core::{AppConfig, Notice, Notices, TaskboardError, TaskboardResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    pub fetch_retries: u32,
    pub retry_backoff: Duration,
    pub notice_ttl: Duration,
    pub display_offset_minutes: i32,
}

impl DashboardOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            fetch_retries: config.fetch_retries,
            retry_backoff: config.retry_backoff(),
            notice_ttl: config.notice_ttl(),
            display_offset_minutes: config.display_utc_offset_minutes,
        }
    }
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// A move applied locally whose remote write has not been issued yet.
#[derive(Debug)]
#[must_use]
pub struct PendingMove {
    mutation: MutationId,
    id: TaskId,
    patch: TaskPatch,
}

impl PendingMove {
    pub fn task_id(&self) -> &TaskId {
        &self.id
    }
}

pub struct Dashboard {
    session: Session,
    tasks_repo: Arc<dyn TaskRepository>,
    profiles: Arc<dyn ProfileRepository>,
    tasks: Vec<Task>,
    profile: Option<Profile>,
    pub filters: TaskFilters,
    view: StatusView,
    detail: Option<TaskId>,
    notices: Notices,
    ledger: MutationLedger,
    language: Language,
    options: DashboardOptions,
    loaded: bool,
}

impl Dashboard {
    pub fn new(
        session: Session,
        tasks_repo: Arc<dyn TaskRepository>,
        profiles: Arc<dyn ProfileRepository>,
        options: DashboardOptions,
    ) -> Self {
        Self {
            session,
            tasks_repo,
            profiles,
            tasks: Vec::new(),
            profile: None,
            filters: TaskFilters::new(),
            view: StatusView::All,
            detail: None,
            notices: Notices::default(),
            ledger: MutationLedger::new(),
            language: Language::default(),
            options,
            loaded: false,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Swap in a refreshed session for the same user.
    pub fn replace_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn view(&self) -> StatusView {
        self.view
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn ledger(&self) -> &MutationLedger {
        &self.ledger
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    pub fn expire_notices(&mut self, now: DateTime<Utc>) {
        self.notices.expire(now, self.options.notice_ttl);
    }

    /// Filtered tasks, one column per status in the current view.
    pub fn columns(&self) -> Vec<StatusColumn<'_>> {
        group_into_columns(&self.tasks, &self.filters, self.view)
    }

    /// The task currently rendered at `source`, if any.
    pub fn task_at(&self, source: DragSource) -> Option<&Task> {
        self.columns()
            .into_iter()
            .find(|c| c.status == source.status)
            .and_then(|c| c.tasks.get(source.index).copied())
    }

    pub fn open_detail(&mut self, id: &TaskId) -> TaskboardResult<()> {
        if self.task(id).is_none() {
            return self.fail(TaskboardError::NotFound(format!("task {}", id)));
        }
        self.detail = Some(id.clone());
        Ok(())
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// The task open in the detail view. Always reads the merged local row.
    pub fn detail(&self) -> Option<&Task> {
        self.detail.as_ref().and_then(|id| self.task(id))
    }

    /// Fetch tasks and the profile.
    pub async fn load(&mut self) -> TaskboardResult<()> {
        self.refresh().await?;
        self.load_profile().await
    }

    pub async fn load_profile(&mut self) -> TaskboardResult<()> {
        match self.profiles.get_profile(&self.session).await {
            Ok(profile) => {
                self.profile = profile;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Refetch the task list for the current status view. Transient errors
    /// are retried; on final failure the previous list is kept.
    pub async fn refresh(&mut self) -> TaskboardResult<()> {
        let query = TaskQuery {
            status: self.view.status(),
        };
        let mut attempt = 0;
        let result = loop {
            match self.tasks_repo.list(&self.session, &query).await {
                Ok(rows) => break Ok(rows),
                Err(e) if e.is_transient() && attempt < self.options.fetch_retries => {
                    attempt += 1;
                    tracing::debug!("Task fetch failed (attempt {}): {}", attempt, e);
                    tokio::time::sleep(self.options.retry_backoff * attempt).await;
                }
                Err(e) => break Err(e),
            }
        };

        match result {
            Ok(rows) => {
                let user_id = self.session.user_id();
                let total = rows.len();
                self.tasks = rows.into_iter().filter(|t| t.is_owned_by(user_id)).collect();
                if self.tasks.len() != total {
                    tracing::warn!(
                        "Dropped {} task rows owned by another user",
                        total - self.tasks.len()
                    );
                }
                self.loaded = true;
                tracing::debug!("Loaded {} tasks for view {}", self.tasks.len(), self.view);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Switch the sidebar view and refetch for it.
    pub async fn set_status_view(&mut self, view: StatusView) -> TaskboardResult<()> {
        if self.view == view && self.loaded {
            return Ok(());
        }
        self.view = view;
        self.refresh().await
    }

    /// Validate, insert, and prepend the new row.
    pub async fn create_task(&mut self, draft: &TaskDraft) -> TaskboardResult<Task> {
        let fields = match draft.validate() {
            Ok(fields) => fields,
            Err(e) => return self.fail(e),
        };
        let new_task = NewTask::new(fields, self.session.user_id());
        let mutation = self.ledger.begin(None, MutationKind::Create);

        let result = self
            .tasks_repo
            .insert(&self.session, new_task)
            .await
            .and_then(|row| ensure_owned(&self.session, row));
        match result {
            Ok(row) => {
                self.ledger.commit(mutation);
                self.tasks.insert(0, row.clone());
                self.notify_success(Text::TaskCreated);
                tracing::info!("Created task {}", row.id);
                Ok(row)
            }
            Err(e) => {
                self.ledger.fail(mutation);
                self.fail(e)
            }
        }
    }

    pub async fn edit_task(&mut self, id: &TaskId, draft: &TaskDraft) -> TaskboardResult<Task> {
        let fields = match draft.validate() {
            Ok(fields) => fields,
            Err(e) => return self.fail(e),
        };
        let previous = match self.task(id) {
            Some(task) => task.updated_at,
            None => return self.fail(TaskboardError::NotFound(format!("task {}", id))),
        };
        let patch = TaskPatch::edit(fields, next_updated_at(previous, Utc::now()));
        self.write(id, patch, MutationKind::Edit, Text::TaskUpdated)
            .await
    }

    /// Non-optimistic status change, merged once the remote confirms.
    pub async fn set_status(&mut self, id: &TaskId, status: TaskStatus) -> TaskboardResult<Task> {
        let previous = match self.task(id) {
            Some(task) => task.updated_at,
            None => return self.fail(TaskboardError::NotFound(format!("task {}", id))),
        };
        let patch = TaskPatch::status(status, next_updated_at(previous, Utc::now()));
        self.write(id, patch, MutationKind::SetStatus(status), Text::StatusUpdated)
            .await
    }

    /// Resolve a drop and, unless it is a no-op, move the dragged task.
    pub async fn drop_task(
        &mut self,
        source: DragSource,
        target: Option<DropTarget>,
    ) -> TaskboardResult<Option<Task>> {
        match self.begin_drop(source, target)? {
            Some(pending) => self.finish_move(pending).await.map(Some),
            None => Ok(None),
        }
    }

    /// First half of `drop_task`: apply the move locally so it can be
    /// rendered before the remote write is awaited.
    pub fn begin_drop(
        &mut self,
        source: DragSource,
        target: Option<DropTarget>,
    ) -> TaskboardResult<Option<PendingMove>> {
        let status = match resolve_drop(source, target) {
            DropOutcome::Ignored => return Ok(None),
            DropOutcome::Move { status } => status,
        };
        let id = match self.task_at(source) {
            Some(task) => task.id.clone(),
            None => {
                return self.fail(TaskboardError::NotFound(format!(
                    "no task at {} #{}",
                    source.status, source.index
                )))
            }
        };
        self.begin_move(&id, status).map(Some)
    }

    /// Optimistic status change: applied locally first, rolled back if the
    /// remote write fails.
    pub async fn move_task(&mut self, id: &TaskId, status: TaskStatus) -> TaskboardResult<Task> {
        let pending = self.begin_move(id, status)?;
        self.finish_move(pending).await
    }

    pub fn begin_move(&mut self, id: &TaskId, status: TaskStatus) -> TaskboardResult<PendingMove> {
        let idx = match self.tasks.iter().position(|t| &t.id == id) {
            Some(idx) => idx,
            None => return self.fail(TaskboardError::NotFound(format!("task {}", id))),
        };
        let before = self.tasks[idx].clone();
        let patch = TaskPatch::status(status, next_updated_at(before.updated_at, Utc::now()));
        patch.apply_to(&mut self.tasks[idx]);
        let mutation = self
            .ledger
            .begin_optimistic(before, MutationKind::Move(status));
        Ok(PendingMove {
            mutation,
            id: id.clone(),
            patch,
        })
    }

    /// Persist a move started with `begin_move`.
    pub async fn finish_move(&mut self, pending: PendingMove) -> TaskboardResult<Task> {
        let result = self
            .tasks_repo
            .update(&self.session, &pending.id, pending.patch)
            .await
            .and_then(|row| ensure_owned(&self.session, row));
        match result {
            Ok(row) => {
                self.ledger.commit(pending.mutation);
                self.merge(row.clone());
                Ok(row)
            }
            Err(e) => {
                if let Some(snapshot) = self.ledger.fail(pending.mutation) {
                    tracing::debug!("Rolling back move of task {}", snapshot.id);
                    self.merge(snapshot);
                }
                self.fail(e)
            }
        }
    }

    /// Delete remotely, then locally.
    pub async fn delete_task(&mut self, id: &TaskId) -> TaskboardResult<()> {
        let mutation = self.ledger.begin(Some(id.clone()), MutationKind::Delete);
        match self.tasks_repo.delete(&self.session, id).await {
            Ok(()) => {
                self.ledger.commit(mutation);
                self.tasks.retain(|t| &t.id != id);
                if self.detail.as_ref() == Some(id) {
                    self.detail = None;
                }
                self.notify_success(Text::TaskDeleted);
                tracing::info!("Deleted task {}", id);
                Ok(())
            }
            Err(e) => {
                self.ledger.fail(mutation);
                self.fail(e)
            }
        }
    }

    async fn write(
        &mut self,
        id: &TaskId,
        patch: TaskPatch,
        kind: MutationKind,
        success: Text,
    ) -> TaskboardResult<Task> {
        let mutation = self.ledger.begin(Some(id.clone()), kind);
        let result = self
            .tasks_repo
            .update(&self.session, id, patch)
            .await
            .and_then(|row| ensure_owned(&self.session, row));
        match result {
            Ok(row) => {
                self.ledger.commit(mutation);
                self.merge(row.clone());
                self.notify_success(success);
                Ok(row)
            }
            Err(e) => {
                self.ledger.fail(mutation);
                self.fail(e)
            }
        }
    }

    fn merge(&mut self, row: Task) {
        match self.tasks.iter_mut().find(|t| t.id == row.id) {
            Some(existing) => *existing = row,
            None => self.tasks.insert(0, row),
        }
    }

    fn notify_success(&mut self, text: Text) {
        self.notices.push(Notice::success(self.language.t(text)));
    }

    fn fail<T>(&mut self, err: TaskboardError) -> TaskboardResult<T> {
        let message = match &err {
            TaskboardError::Validation(msg)
                if msg == Language::English.t(Text::AllFieldsRequired) =>
            {
                self.language.t(Text::AllFieldsRequired).to_string()
            }
            other => other.user_message(),
        };
        self.notices.push(Notice::error(message));
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTaskRepository;
    use crate::{Priority, User};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use taskboard_core::NoticeLevel;
    use uuid::Uuid;

    struct NoProfiles;

    #[async_trait]
    impl ProfileRepository for NoProfiles {
        async fn get_profile(&self, _session: &Session) -> TaskboardResult<Option<Profile>> {
            Ok(None)
        }

        async fn insert_profile(
            &self,
            _session: Option<&Session>,
            _profile: &Profile,
        ) -> TaskboardResult<()> {
            Ok(())
        }
    }

    fn user_id() -> Uuid {
        Uuid::from_u128(7)
    }

    fn session() -> Session {
        Session {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at: None,
            user: User {
                id: user_id(),
                email: Some("a@example.com".into()),
            },
        }
    }

    fn task(id: &str, title: &str, status: TaskStatus) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.into(),
            notes: "notes".into(),
            priority: Priority::Medium,
            status,
            user_id: user_id(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn options() -> DashboardOptions {
        DashboardOptions {
            fetch_retries: 2,
            retry_backoff: Duration::from_millis(1),
            notice_ttl: Duration::from_secs(1),
            display_offset_minutes: 330,
        }
    }

    fn dashboard(repo: MockTaskRepository) -> Dashboard {
        Dashboard::new(session(), Arc::new(repo), Arc::new(NoProfiles), options())
    }

    fn listing(rows: Vec<Task>) -> MockTaskRepository {
        let mut repo = MockTaskRepository::new();
        repo.expect_list().returning(move |_, _| Ok(rows.clone()));
        repo
    }

    #[tokio::test]
    async fn test_blank_field_rejected_before_network() {
        let mut repo = MockTaskRepository::new();
        repo.expect_insert().never();
        let mut board = dashboard(repo);

        let err = board
            .create_task(&TaskDraft::new("Buy milk", "   ", "low"))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskboardError::Validation(_)));
        assert!(board.tasks().is_empty());
        assert_eq!(board.notices().latest().unwrap().level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_create_prepends_new_row() {
        let mut repo = listing(vec![task("1", "Walk dog", TaskStatus::Todo)]);
        repo.expect_insert().times(1).returning(|_, new_task| {
            assert_eq!(new_task.status, TaskStatus::Todo);
            assert_eq!(new_task.title, "Buy milk");
            Ok(Task {
                id: TaskId::from("2"),
                title: new_task.title,
                notes: new_task.notes,
                priority: new_task.priority,
                status: new_task.status,
                user_id: new_task.user_id,
                created_at: Utc::now(),
                updated_at: None,
            })
        });
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();

        let created = board
            .create_task(&TaskDraft::new(" Buy milk ", "2%", "LOW"))
            .await
            .unwrap();
        assert_eq!(created.priority, Priority::Low);
        let columns = board.columns();
        assert_eq!(columns[0].status, TaskStatus::Todo);
        assert_eq!(columns[0].tasks[0].title, "Buy milk");
        assert_eq!(board.notices().latest().unwrap().level, NoticeLevel::Success);
    }

    #[tokio::test]
    async fn test_edit_with_blank_notes_leaves_task_unchanged() {
        let mut repo = listing(vec![task("1", "Walk dog", TaskStatus::Todo)]);
        repo.expect_update().never();
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();

        let result = board
            .edit_task(&TaskId::from("1"), &TaskDraft::new("Walk cat", "", "high"))
            .await;
        assert!(result.is_err());
        assert_eq!(board.tasks()[0].title, "Walk dog");
    }

    #[tokio::test]
    async fn test_edit_never_moves_updated_at_backwards() {
        let future = Utc::now() + chrono::Duration::hours(1);
        let mut row = task("1", "Walk dog", TaskStatus::Todo);
        row.updated_at = Some(future);
        let mut repo = listing(vec![row.clone()]);
        repo.expect_update().returning(move |_, _, patch| {
            let mut updated = row.clone();
            patch.apply_to(&mut updated);
            Ok(updated)
        });
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();
        board.open_detail(&TaskId::from("1")).unwrap();

        let edited = board
            .edit_task(&TaskId::from("1"), &TaskDraft::new("Walk cat", "park", "high"))
            .await
            .unwrap();
        assert!(edited.updated_at.unwrap() >= future);
        assert_eq!(board.detail().unwrap().title, "Walk cat");
    }

    #[tokio::test]
    async fn test_drop_in_place_makes_no_call() {
        let mut repo = listing(vec![task("1", "Walk dog", TaskStatus::Todo)]);
        repo.expect_update().never();
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();
        let before = board.tasks().to_vec();

        let source = DragSource {
            status: TaskStatus::Todo,
            index: 0,
        };
        let target = DropTarget {
            status: TaskStatus::Todo,
            index: 0,
        };
        assert_eq!(board.drop_task(source, Some(target)).await.unwrap(), None);
        assert_eq!(board.drop_task(source, None).await.unwrap(), None);
        assert_eq!(board.tasks(), before.as_slice());
        assert_eq!(board.ledger().pending_count(), 0);
    }

    #[tokio::test]
    async fn test_drop_into_completed_column() {
        let row = task("1", "Buy milk", TaskStatus::Todo);
        let mut repo = listing(vec![row.clone()]);
        repo.expect_update().times(1).returning(move |_, _, patch| {
            let mut updated = row.clone();
            patch.apply_to(&mut updated);
            Ok(updated)
        });
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();

        let moved = board
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
            .unwrap()
            .unwrap();
        assert_eq!(moved.status, TaskStatus::Completed);
        let columns = board.columns();
        assert!(columns[0].is_empty());
        assert_eq!(columns[2].tasks[0].id, TaskId::from("1"));
    }

    #[tokio::test]
    async fn test_failed_move_rolls_back() {
        let mut repo = listing(vec![task("1", "Buy milk", TaskStatus::Todo)]);
        repo.expect_update().returning(|_, _, _| {
            Err(TaskboardError::Remote {
                status: 400,
                message: "update rejected".into(),
            })
        });
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();

        let result = board
            .move_task(&TaskId::from("1"), TaskStatus::InProgress)
            .await;
        assert!(result.is_err());
        assert_eq!(board.tasks()[0].status, TaskStatus::Todo);
        assert_eq!(board.tasks()[0].updated_at, None);
        assert_eq!(
            board.notices().latest().unwrap().message,
            "update rejected"
        );
        let settled: Vec<_> = board.ledger().settled().collect();
        assert_eq!(
            settled[0].state,
            crate::MutationState::Failed { rolled_back: true }
        );
    }

    #[tokio::test]
    async fn test_move_is_visible_before_remote_write() {
        let row = task("1", "Buy milk", TaskStatus::Todo);
        let mut repo = listing(vec![row.clone()]);
        repo.expect_update().times(1).returning(move |_, _, patch| {
            let mut updated = row.clone();
            patch.apply_to(&mut updated);
            Ok(updated)
        });
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();

        let pending = board
            .begin_move(&TaskId::from("1"), TaskStatus::Completed)
            .unwrap();
        assert_eq!(board.tasks()[0].status, TaskStatus::Completed);
        assert!(board.ledger().is_pending(pending.task_id()));

        board.finish_move(pending).await.unwrap();
        assert_eq!(board.ledger().pending_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let mut repo = MockTaskRepository::new();
        let mut calls = 0;
        repo.expect_list().returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(vec![task("1", "Walk dog", TaskStatus::Todo)])
            } else {
                Err(TaskboardError::Connection("offline".into()))
            }
        });
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();

        let err = board.refresh().await.unwrap_err();
        assert!(matches!(err, TaskboardError::Connection(_)));
        assert_eq!(board.tasks().len(), 1);
        assert_eq!(board.notices().latest().unwrap().level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_transient_fetch_error_is_retried() {
        let mut repo = MockTaskRepository::new();
        let mut calls = 0;
        repo.expect_list().times(3).returning(move |_, _| {
            calls += 1;
            if calls < 3 {
                Err(TaskboardError::Remote {
                    status: 503,
                    message: "unavailable".into(),
                })
            } else {
                Ok(vec![task("1", "Walk dog", TaskStatus::Todo)])
            }
        });
        let mut board = dashboard(repo);

        board.refresh().await.unwrap();
        assert_eq!(board.tasks().len(), 1);
        assert!(board.notices().is_empty());
    }

    #[tokio::test]
    async fn test_foreign_rows_are_dropped() {
        let mut foreign = task("2", "Not mine", TaskStatus::Todo);
        foreign.user_id = Uuid::from_u128(99);
        let repo = listing(vec![task("1", "Mine", TaskStatus::Todo), foreign]);
        let mut board = dashboard(repo);

        board.refresh().await.unwrap();
        assert_eq!(board.tasks().len(), 1);
        assert_eq!(board.tasks()[0].title, "Mine");
    }

    #[tokio::test]
    async fn test_foreign_row_from_update_is_unauthorized() {
        let mut repo = listing(vec![task("1", "Mine", TaskStatus::Todo)]);
        repo.expect_update().returning(|_, _, _| {
            let mut row = task("1", "Mine", TaskStatus::Completed);
            row.user_id = Uuid::from_u128(99);
            Ok(row)
        });
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();

        let err = board
            .set_status(&TaskId::from("1"), TaskStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskboardError::Unauthorized(_)));
        assert_eq!(board.tasks()[0].status, TaskStatus::Todo);
    }

    #[tokio::test]
    async fn test_status_view_is_pushed_into_query() {
        let mut repo = MockTaskRepository::new();
        repo.expect_list()
            .withf(|_, query| query.status == Some(TaskStatus::Completed))
            .times(1)
            .returning(|_, _| Ok(vec![task("1", "Done", TaskStatus::Completed)]));
        let mut board = dashboard(repo);

        board
            .set_status_view(StatusView::Only(TaskStatus::Completed))
            .await
            .unwrap();
        let columns = board.columns();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_delete_removes_locally_after_remote() {
        let mut repo = listing(vec![
            task("1", "Walk dog", TaskStatus::Todo),
            task("2", "Buy milk", TaskStatus::Todo),
        ]);
        repo.expect_delete()
            .withf(|_, id| id.as_str() == "1")
            .times(1)
            .returning(|_, _| Ok(()));
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();
        board.open_detail(&TaskId::from("1")).unwrap();

        board.delete_task(&TaskId::from("1")).await.unwrap();
        assert_eq!(board.tasks().len(), 1);
        assert!(board.detail().is_none());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_task() {
        let mut repo = listing(vec![task("1", "Walk dog", TaskStatus::Todo)]);
        repo.expect_delete()
            .returning(|_, _| Err(TaskboardError::Connection("reset".into())));
        let mut board = dashboard(repo);
        board.refresh().await.unwrap();

        assert!(board.delete_task(&TaskId::from("1")).await.is_err());
        assert_eq!(board.tasks().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_notice_is_localized() {
        let repo = MockTaskRepository::new();
        let mut board = dashboard(repo).with_language(Language::Hindi);

        let _ = board.create_task(&TaskDraft::default()).await;
        assert_eq!(
            board.notices().latest().unwrap().message,
            "सभी फ़ील्ड आवश्यक हैं"
        );
    }
}
