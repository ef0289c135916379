use super::client::{Surface, SupabaseClient};
use async_trait::async_trait;
use reqwest::Method;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{
    NewTask, Profile, ProfileRepository, Session, Task, TaskId, TaskPatch, TaskQuery,
    TaskRepository,
};

const TASKS: &str = "/rest/v1/tasks";
const PROFILES: &str = "/rest/v1/profiles";
const RETURN_ROWS: (&str, &str) = ("Prefer", "return=representation");

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

#[async_trait]
impl TaskRepository for SupabaseClient {
    async fn list(&self, session: &Session, query: &TaskQuery) -> TaskboardResult<Vec<Task>> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("user_id", eq(session.user_id())),
        ];
        if let Some(status) = query.status {
            params.push(("status", eq(status)));
        }
        params.push(("order", "created_at.desc".to_string()));

        let request = self
            .request(Method::GET, TASKS, Some(&session.access_token))
            .query(&params);
        let rows: Vec<Task> = self.send_json(request, Surface::Rest).await?;
        tracing::debug!("Fetched {} tasks", rows.len());
        Ok(rows)
    }

    async fn insert(&self, session: &Session, task: NewTask) -> TaskboardResult<Task> {
        let request = self
            .request(Method::POST, TASKS, Some(&session.access_token))
            .header(RETURN_ROWS.0, RETURN_ROWS.1)
            .json(&[task]);
        let rows: Vec<Task> = self.send_json(request, Surface::Rest).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| TaskboardError::Internal("insert returned no row".to_string()))
    }

    async fn update(
        &self,
        session: &Session,
        id: &TaskId,
        patch: TaskPatch,
    ) -> TaskboardResult<Task> {
        let request = self
            .request(Method::PATCH, TASKS, Some(&session.access_token))
            .header(RETURN_ROWS.0, RETURN_ROWS.1)
            .query(&[("id", eq(id)), ("user_id", eq(session.user_id()))])
            .json(&patch);
        let rows: Vec<Task> = self.send_json(request, Surface::Rest).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| TaskboardError::NotFound(format!("task {}", id)))
    }

    async fn delete(&self, session: &Session, id: &TaskId) -> TaskboardResult<()> {
        let request = self
            .request(Method::DELETE, TASKS, Some(&session.access_token))
            .header(RETURN_ROWS.0, RETURN_ROWS.1)
            .query(&[("id", eq(id)), ("user_id", eq(session.user_id()))]);
        let rows: Vec<Task> = self.send_json(request, Surface::Rest).await?;
        if rows.is_empty() {
            return Err(TaskboardError::NotFound(format!("task {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for SupabaseClient {
    async fn get_profile(&self, session: &Session) -> TaskboardResult<Option<Profile>> {
        let request = self
            .request(Method::GET, PROFILES, Some(&session.access_token))
            .query(&[
                ("select", "id,full_name".to_string()),
                ("id", eq(session.user_id())),
            ]);
        let rows: Vec<Profile> = self.send_json(request, Surface::Rest).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_profile(
        &self,
        session: Option<&Session>,
        profile: &Profile,
    ) -> TaskboardResult<()> {
        let token = session.map(|s| s.access_token.as_str());
        let request = self
            .request(Method::POST, PROFILES, token)
            .header("Prefer", "return=minimal")
            .json(&[profile]);
        self.send(request, Surface::Rest).await?;
        Ok(())
    }
}
