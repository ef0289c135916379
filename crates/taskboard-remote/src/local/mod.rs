//! File-backed provider for offline use and tests.
//!
//! Implements the same auth and table traits as the hosted client against a
//! single JSON document. Passwords are stored in clear text: this backend is
//! for development only.

use crate::store::AtomicWriter;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{
    AuthProvider, Credentials, NewTask, Profile, ProfileRepository, Session, SignUpResponse, Task,
    TaskId, TaskPatch, TaskQuery, TaskRepository, User, UserId,
};
use tokio::sync::Mutex;
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 6;
/// Live sign-ins kept per user; older tokens are dropped on issue.
const MAX_TOKENS_PER_USER: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocalUser {
    id: UserId,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocalToken {
    access_token: String,
    refresh_token: String,
    user_id: UserId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LocalData {
    #[serde(default)]
    users: Vec<LocalUser>,
    #[serde(default)]
    tokens: Vec<LocalToken>,
    #[serde(default)]
    profiles: Vec<Profile>,
    /// Insertion order; listing sorts newest first.
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    next_task_id: u64,
}

impl LocalData {
    fn user(&self, id: UserId) -> Option<&LocalUser> {
        self.users.iter().find(|u| u.id == id)
    }

    /// The user a session's access token belongs to.
    fn authorize(&self, session: &Session) -> TaskboardResult<UserId> {
        self.tokens
            .iter()
            .find(|t| t.access_token == session.access_token && t.user_id == session.user_id())
            .map(|t| t.user_id)
            .ok_or_else(TaskboardError::not_signed_in)
    }

    fn issue(&mut self, user: &LocalUser) -> Session {
        let token = LocalToken {
            access_token: format!("local-{}", Uuid::new_v4()),
            refresh_token: format!("local-refresh-{}", Uuid::new_v4()),
            user_id: user.id,
        };
        let session = Session {
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
            expires_at: None,
            user: User {
                id: user.id,
                email: Some(user.email.clone()),
            },
        };
        self.tokens.push(token);
        let issued = self.tokens.iter().filter(|t| t.user_id == user.id).count();
        let mut excess = issued.saturating_sub(MAX_TOKENS_PER_USER);
        self.tokens.retain(|t| {
            if excess > 0 && t.user_id == user.id {
                excess -= 1;
                false
            } else {
                true
            }
        });
        session
    }
}

pub struct LocalBackend {
    path: Option<PathBuf>,
    data: Mutex<LocalData>,
}

impl LocalBackend {
    /// Open (or start) the data file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> TaskboardResult<Self> {
        let path = path.as_ref().to_path_buf();
        let data = match AtomicWriter::read_optional(&path).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| TaskboardError::Serialization(e.to_string()))?,
            None => LocalData::default(),
        };
        tracing::info!("Opened local backend at {}", path.display());
        Ok(Self {
            path: Some(path),
            data: Mutex::new(data),
        })
    }

    /// Nothing is written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: Mutex::new(LocalData::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Apply `change` to a copy of the data and swap it in only once the
    /// copy is on disk.
    async fn commit<T, F>(&self, change: F) -> TaskboardResult<T>
    where
        F: FnOnce(&mut LocalData) -> TaskboardResult<T>,
    {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let value = change(&mut next)?;
        self.persist(&next).await?;
        *data = next;
        Ok(value)
    }

    async fn persist(&self, data: &LocalData) -> TaskboardResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        AtomicWriter::write_atomic(path, &bytes).await
    }
}

#[async_trait]
impl AuthProvider for LocalBackend {
    async fn sign_up(&self, credentials: &Credentials) -> TaskboardResult<SignUpResponse> {
        let credentials = credentials.normalized();
        credentials.validate()?;
        if credentials.password.len() < MIN_PASSWORD_LEN {
            return Err(TaskboardError::auth(format!(
                "Password should be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let session = self
            .commit(|data| {
                if data
                    .users
                    .iter()
                    .any(|u| u.email.eq_ignore_ascii_case(&credentials.email))
                {
                    return Err(TaskboardError::auth("User already registered"));
                }
                let user = LocalUser {
                    id: Uuid::new_v4(),
                    email: credentials.email.clone(),
                    password: credentials.password.clone(),
                };
                data.users.push(user.clone());
                Ok(data.issue(&user))
            })
            .await?;

        tracing::info!("Registered local user {}", session.user_id());
        Ok(SignUpResponse {
            user: Some(session.user.clone()),
            session: Some(session),
        })
    }

    async fn sign_in(&self, credentials: &Credentials) -> TaskboardResult<Session> {
        let credentials = credentials.normalized();
        self.commit(|data| {
            let user = data
                .users
                .iter()
                .find(|u| {
                    u.email.eq_ignore_ascii_case(&credentials.email)
                        && u.password == credentials.password
                })
                .cloned()
                .ok_or_else(|| TaskboardError::auth("Invalid login credentials"))?;
            Ok(data.issue(&user))
        })
        .await
    }

    async fn sign_out(&self, session: &Session) -> TaskboardResult<()> {
        self.commit(|data| {
            data.tokens
                .retain(|t| t.access_token != session.access_token);
            Ok(())
        })
        .await
    }

    async fn current_user(&self, session: &Session) -> TaskboardResult<User> {
        let data = self.data.lock().await;
        let user_id = data.authorize(session)?;
        let user = data.user(user_id).ok_or_else(TaskboardError::not_signed_in)?;
        Ok(User {
            id: user.id,
            email: Some(user.email.clone()),
        })
    }

    async fn refresh(&self, refresh_token: &str) -> TaskboardResult<Session> {
        self.commit(|data| {
            let idx = data
                .tokens
                .iter()
                .position(|t| t.refresh_token == refresh_token)
                .ok_or_else(|| {
                    TaskboardError::auth("Invalid Refresh Token: Refresh Token Not Found")
                })?;
            let old = data.tokens.remove(idx);
            let user = data
                .user(old.user_id)
                .cloned()
                .ok_or_else(TaskboardError::not_signed_in)?;
            Ok(data.issue(&user))
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for LocalBackend {
    async fn list(&self, session: &Session, query: &TaskQuery) -> TaskboardResult<Vec<Task>> {
        let data = self.data.lock().await;
        let user_id = data.authorize(session)?;
        let mut rows: Vec<Task> = data
            .tasks
            .iter()
            .rev()
            .filter(|t| t.is_owned_by(user_id))
            .filter(|t| query.status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();
        // Stable, so equal timestamps stay newest-inserted first.
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, session: &Session, task: NewTask) -> TaskboardResult<Task> {
        let row = self
            .commit(|data| {
                let user_id = data.authorize(session)?;
                if task.user_id != user_id {
                    return Err(TaskboardError::Unauthorized(
                        "new row violates row-level security policy for table \"tasks\""
                            .to_string(),
                    ));
                }
                data.next_task_id += 1;
                let row = Task {
                    id: TaskId::new(data.next_task_id.to_string()),
                    title: task.title,
                    notes: task.notes,
                    priority: task.priority,
                    status: task.status,
                    user_id,
                    created_at: Utc::now(),
                    updated_at: None,
                };
                data.tasks.push(row.clone());
                Ok(row)
            })
            .await?;
        tracing::debug!("Inserted local task {}", row.id);
        Ok(row)
    }

    async fn update(
        &self,
        session: &Session,
        id: &TaskId,
        patch: TaskPatch,
    ) -> TaskboardResult<Task> {
        self.commit(|data| {
            let user_id = data.authorize(session)?;
            let row = data
                .tasks
                .iter_mut()
                .find(|t| &t.id == id && t.is_owned_by(user_id))
                .ok_or_else(|| TaskboardError::NotFound(format!("task {}", id)))?;
            patch.apply_to(row);
            Ok(row.clone())
        })
        .await
    }

    async fn delete(&self, session: &Session, id: &TaskId) -> TaskboardResult<()> {
        self.commit(|data| {
            let user_id = data.authorize(session)?;
            let before = data.tasks.len();
            data.tasks.retain(|t| !(&t.id == id && t.is_owned_by(user_id)));
            if data.tasks.len() == before {
                return Err(TaskboardError::NotFound(format!("task {}", id)));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ProfileRepository for LocalBackend {
    async fn get_profile(&self, session: &Session) -> TaskboardResult<Option<Profile>> {
        let data = self.data.lock().await;
        let user_id = data.authorize(session)?;
        Ok(data.profiles.iter().find(|p| p.id == user_id).cloned())
    }

    async fn insert_profile(
        &self,
        session: Option<&Session>,
        profile: &Profile,
    ) -> TaskboardResult<()> {
        self.commit(|data| {
            if let Some(session) = session {
                if data.authorize(session)? != profile.id {
                    return Err(TaskboardError::Unauthorized(
                        "profile id does not match the signed-in user".to_string(),
                    ));
                }
            }
            if data.profiles.iter().any(|p| p.id == profile.id) {
                return Err(TaskboardError::Remote {
                    status: 409,
                    message: "duplicate key value violates unique constraint \"profiles_pkey\""
                        .to_string(),
                });
            }
            data.profiles.push(profile.clone());
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::AuthErrorKind;
    use taskboard_domain::{Priority, TaskDraft, TaskStatus};
    use tempfile::tempdir;

    async fn signed_up(backend: &LocalBackend, email: &str) -> Session {
        backend
            .sign_up(&Credentials::new(email, "secret1"))
            .await
            .unwrap()
            .session
            .unwrap()
    }

    fn new_task(session: &Session, title: &str) -> NewTask {
        let fields = TaskDraft::new(title, "notes", "low").validate().unwrap();
        NewTask::new(fields, session.user_id())
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_email_in_use() {
        let backend = LocalBackend::in_memory();
        signed_up(&backend, "a@example.com").await;

        let err = backend
            .sign_up(&Credentials::new("A@example.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TaskboardError::Auth {
                kind: AuthErrorKind::EmailInUse,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let backend = LocalBackend::in_memory();
        signed_up(&backend, "a@example.com").await;

        let err = backend
            .sign_in(&Credentials::new("a@example.com", "nope"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TaskboardError::Auth {
                kind: AuthErrorKind::InvalidCredentials,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_scoped() {
        let backend = LocalBackend::in_memory();
        let alice = signed_up(&backend, "alice@example.com").await;
        let bob = signed_up(&backend, "bob@example.com").await;

        backend.insert(&alice, new_task(&alice, "first")).await.unwrap();
        backend.insert(&alice, new_task(&alice, "second")).await.unwrap();
        backend.insert(&bob, new_task(&bob, "bob's")).await.unwrap();

        let rows = backend.list(&alice, &TaskQuery::all()).await.unwrap();
        let titles: Vec<_> = rows.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_cannot_touch_other_users_rows() {
        let backend = LocalBackend::in_memory();
        let alice = signed_up(&backend, "alice@example.com").await;
        let bob = signed_up(&backend, "bob@example.com").await;
        let row = backend.insert(&alice, new_task(&alice, "mine")).await.unwrap();

        let patch = TaskPatch::status(TaskStatus::Completed, Utc::now());
        assert!(matches!(
            backend.update(&bob, &row.id, patch).await,
            Err(TaskboardError::NotFound(_))
        ));
        assert!(backend.delete(&bob, &row.id).await.is_err());
        assert!(backend
            .insert(&bob, new_task(&alice, "forged"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_signed_out_token_is_rejected() {
        let backend = LocalBackend::in_memory();
        let session = signed_up(&backend, "a@example.com").await;
        backend.sign_out(&session).await.unwrap();

        let err = backend.list(&session, &TaskQuery::all()).await.unwrap_err();
        assert!(matches!(
            err,
            TaskboardError::Auth {
                kind: AuthErrorKind::NotSignedIn,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_refresh_rotates_tokens() {
        let backend = LocalBackend::in_memory();
        let session = signed_up(&backend, "a@example.com").await;

        let fresh = backend.refresh(&session.refresh_token).await.unwrap();
        assert_ne!(fresh.access_token, session.access_token);
        assert!(backend.refresh(&session.refresh_token).await.is_err());
        assert_eq!(
            backend.current_user(&fresh).await.unwrap().id,
            session.user_id()
        );
    }

    #[tokio::test]
    async fn test_failed_write_leaves_data_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local.json");
        let backend = LocalBackend::open(&path).await.unwrap();
        let session = signed_up(&backend, "a@example.com").await;

        // A non-empty directory in place of the data file makes the rename fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("blocker"), b"x").unwrap();

        assert!(backend
            .insert(&session, new_task(&session, "lost"))
            .await
            .is_err());
        assert!(backend
            .sign_up(&Credentials::new("b@example.com", "secret1"))
            .await
            .is_err());

        let rows = backend.list(&session, &TaskQuery::all()).await.unwrap();
        assert!(rows.is_empty());
        let data = backend.data.lock().await;
        assert_eq!(data.next_task_id, 0);
        assert_eq!(data.users.len(), 1);
    }

    #[tokio::test]
    async fn test_old_tokens_are_capped_per_user() {
        let backend = LocalBackend::in_memory();
        let first = signed_up(&backend, "a@example.com").await;
        let other = signed_up(&backend, "b@example.com").await;

        let mut latest = first.clone();
        for _ in 0..MAX_TOKENS_PER_USER + 3 {
            latest = backend
                .sign_in(&Credentials::new("a@example.com", "secret1"))
                .await
                .unwrap();
        }

        {
            let data = backend.data.lock().await;
            let mine = data
                .tokens
                .iter()
                .filter(|t| t.user_id == first.user_id())
                .count();
            assert_eq!(mine, MAX_TOKENS_PER_USER);
        }
        assert!(backend.current_user(&latest).await.is_ok());
        assert!(backend.current_user(&first).await.is_err());
        assert!(backend.current_user(&other).await.is_ok());
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local.json");

        let backend = LocalBackend::open(&path).await.unwrap();
        let session = signed_up(&backend, "a@example.com").await;
        let row = backend
            .insert(&session, new_task(&session, "persisted"))
            .await
            .unwrap();
        backend
            .insert_profile(Some(&session), &Profile::new(session.user_id(), "Asha Rao"))
            .await
            .unwrap();

        let reopened = LocalBackend::open(&path).await.unwrap();
        let rows = reopened.list(&session, &TaskQuery::all()).await.unwrap();
        assert_eq!(rows[0].id, row.id);
        assert_eq!(rows[0].priority, Priority::Low);
        let profile = reopened.get_profile(&session).await.unwrap().unwrap();
        assert_eq!(profile.display_name(), "Asha Rao");
    }
}
