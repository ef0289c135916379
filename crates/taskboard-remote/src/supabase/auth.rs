use super::client::{Surface, SupabaseClient};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{AuthProvider, Credentials, Session, SignUpResponse, User};
use uuid::Uuid;

/// GoTrue token grant response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Sign-up returns a session when the project auto-confirms, and the bare
/// user object when an email confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(TokenResponse),
    User { id: Uuid, email: Option<String> },
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn sign_up(&self, credentials: &Credentials) -> TaskboardResult<SignUpResponse> {
        let request = self
            .request(Method::POST, "/auth/v1/signup", None)
            .json(&credentials.normalized());
        let body: SignUpBody = self.send_json(request, Surface::Auth).await?;
        Ok(match body {
            SignUpBody::Session(token) => {
                let session = token.into_session(Utc::now());
                SignUpResponse {
                    user: Some(session.user.clone()),
                    session: Some(session),
                }
            }
            SignUpBody::User { id, email } => SignUpResponse {
                user: Some(User { id, email }),
                session: None,
            },
        })
    }

    async fn sign_in(&self, credentials: &Credentials) -> TaskboardResult<Session> {
        let request = self
            .request(Method::POST, "/auth/v1/token", None)
            .query(&[("grant_type", "password")])
            .json(&credentials.normalized());
        let token: TokenResponse = self.send_json(request, Surface::Auth).await?;
        tracing::debug!("Password grant succeeded for {}", token.user.id);
        Ok(token.into_session(Utc::now()))
    }

    async fn sign_out(&self, session: &Session) -> TaskboardResult<()> {
        let request = self.request(Method::POST, "/auth/v1/logout", Some(&session.access_token));
        self.send(request, Surface::Auth).await?;
        Ok(())
    }

    async fn current_user(&self, session: &Session) -> TaskboardResult<User> {
        let request = self.request(Method::GET, "/auth/v1/user", Some(&session.access_token));
        self.send_json(request, Surface::Auth).await
    }

    async fn refresh(&self, refresh_token: &str) -> TaskboardResult<Session> {
        if refresh_token.is_empty() {
            return Err(TaskboardError::not_signed_in());
        }
        let request = self
            .request(Method::POST, "/auth/v1/token", None)
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshRequest { refresh_token });
        let token: TokenResponse = self.send_json(request, Surface::Auth).await?;
        Ok(token.into_session(Utc::now()))
    }
}
