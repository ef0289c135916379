use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use taskboard_core::{AppConfig, AuthErrorKind, TaskboardError, TaskboardResult};

/// Which API produced an error; auth failures are classified differently
/// from table failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Surface {
    Auth,
    Rest,
}

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    http: Client,
}

impl SupabaseClient {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> TaskboardResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(TaskboardError::Config("Supabase URL is empty".to_string()));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TaskboardError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            base_url,
            anon_key: anon_key.into(),
            http,
        })
    }

    pub fn from_config(config: &AppConfig) -> TaskboardResult<Self> {
        let url = config.supabase_url.as_deref().ok_or_else(|| {
            TaskboardError::Config(
                "supabase_url is not set (config file, --supabase-url or TASKBOARD_SUPABASE_URL)"
                    .to_string(),
            )
        })?;
        let key = config.supabase_anon_key.as_deref().ok_or_else(|| {
            TaskboardError::Config(
                "supabase_anon_key is not set (config file, --supabase-key or TASKBOARD_SUPABASE_KEY)"
                    .to_string(),
            )
        })?;
        Self::new(url, key, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request with the project key, authorised as `access_token` when
    /// given and as the anonymous role otherwise.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        access_token: Option<&str>,
    ) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token.unwrap_or(&self.anon_key))
    }

    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        surface: Surface,
    ) -> TaskboardResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Request failed: {}", e);
            TaskboardError::Connection(e.to_string())
        })?;
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body, surface))
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        surface: Surface,
    ) -> TaskboardResult<T> {
        let response = self.send(request, surface).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| TaskboardError::Serialization(e.to_string()))
    }
}

/// Pull the human-readable message out of a GoTrue or PostgREST error body.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

pub(crate) fn error_from_response(status: StatusCode, body: &str, surface: Surface) -> TaskboardError {
    let message = error_message(body)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    tracing::debug!("Remote error {}: {}", status, message);

    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return TaskboardError::Remote {
            status: status.as_u16(),
            message,
        };
    }
    match (surface, status) {
        (Surface::Auth, _) => TaskboardError::auth(message),
        (Surface::Rest, StatusCode::UNAUTHORIZED) => TaskboardError::Auth {
            kind: match AuthErrorKind::classify(&message) {
                AuthErrorKind::Other => AuthErrorKind::NotSignedIn,
                kind => kind,
            },
            message,
        },
        (Surface::Rest, StatusCode::FORBIDDEN) => TaskboardError::Unauthorized(message),
        (Surface::Rest, _) => TaskboardError::Remote {
            status: status.as_u16(),
            message,
        },
    }
}
