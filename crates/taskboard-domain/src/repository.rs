use crate::{Credentials, NewTask, Profile, Session, Task, TaskId, TaskPatch, TaskStatus, User};
use async_trait::async_trait;
use taskboard_core::TaskboardResult;

/// Parameters for a task list fetch. The owner always comes from the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
}

impl TaskQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
        }
    }
}

/// Result of a sign-up call. `session` is absent when the provider
/// requires the address to be confirmed first.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpResponse {
    pub user: Option<User>,
    pub session: Option<Session>,
}

/// Rows of the `tasks` table, scoped to the session's user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Tasks owned by the session user, newest first.
    async fn list(&self, session: &Session, query: &TaskQuery) -> TaskboardResult<Vec<Task>>;

    async fn insert(&self, session: &Session, task: NewTask) -> TaskboardResult<Task>;

    /// Apply `patch` and return the updated row. `NotFound` if no owned row matched.
    async fn update(&self, session: &Session, id: &TaskId, patch: TaskPatch)
        -> TaskboardResult<Task>;

    async fn delete(&self, session: &Session, id: &TaskId) -> TaskboardResult<()>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get_profile(&self, session: &Session) -> TaskboardResult<Option<Profile>>;

    /// Written once at sign-up. The session may be absent when the
    /// provider has not confirmed the address yet.
    async fn insert_profile(
        &self,
        session: Option<&Session>,
        profile: &Profile,
    ) -> TaskboardResult<()>;
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, credentials: &Credentials) -> TaskboardResult<SignUpResponse>;

    async fn sign_in(&self, credentials: &Credentials) -> TaskboardResult<Session>;

    async fn sign_out(&self, session: &Session) -> TaskboardResult<()>;

    async fn current_user(&self, session: &Session) -> TaskboardResult<User>;

    async fn refresh(&self, refresh_token: &str) -> TaskboardResult<Session>;
}

/// Reject any row that does not belong to `session`.
pub fn ensure_owned(session: &Session, task: Task) -> TaskboardResult<Task> {
    if task.is_owned_by(session.user_id()) {
        Ok(task)
    } else {
        tracing::warn!("Rejected task {} owned by another user", task.id);
        Err(taskboard_core::TaskboardError::Unauthorized(format!(
            "task {} does not belong to the signed-in user",
            task.id
        )))
    }
}
