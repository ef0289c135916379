use crate::store::atomic_writer::AtomicWriter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{Language, Session};

const FORMAT_VERSION: u32 = 1;

/// What the client remembers between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub language: Language,
    pub session: Option<Session>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StateEnvelope {
    version: u32,
    saved_at: DateTime<Utc>,
    /// Kept as the raw code so an unknown value degrades to English
    /// instead of failing the whole file.
    #[serde(default)]
    language: String,
    #[serde(default)]
    session: Option<Session>,
}

/// JSON file holding [`ClientState`], written atomically.
#[derive(Debug, Clone)]
pub struct ClientStateStore {
    path: PathBuf,
}

impl ClientStateStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file yields the default state.
    pub async fn load(&self) -> TaskboardResult<ClientState> {
        let Some(bytes) = AtomicWriter::read_optional(&self.path).await? else {
            return Ok(ClientState::default());
        };
        let envelope: StateEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        if envelope.version != FORMAT_VERSION {
            return Err(TaskboardError::Serialization(format!(
                "Unsupported client state version: {}",
                envelope.version
            )));
        }
        Ok(ClientState {
            language: Language::from_code(&envelope.language),
            session: envelope.session,
        })
    }

    /// Like `load`, but a broken file is logged and treated as empty.
    pub async fn load_or_default(&self) -> ClientState {
        match self.load().await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable client state at {}: {}",
                    self.path.display(),
                    e
                );
                ClientState::default()
            }
        }
    }

    pub async fn save(&self, state: &ClientState) -> TaskboardResult<()> {
        let envelope = StateEnvelope {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            language: state.language.code().to_string(),
            session: state.session.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        AtomicWriter::write_atomic(&self.path, &bytes).await?;
        tracing::info!("Saved client state to {}", self.path.display());
        Ok(())
    }

    pub async fn set_language(&self, language: Language) -> TaskboardResult<ClientState> {
        let mut state = self.load_or_default().await;
        state.language = language;
        self.save(&state).await?;
        Ok(state)
    }

    pub async fn set_session(&self, session: Option<Session>) -> TaskboardResult<ClientState> {
        let mut state = self.load_or_default().await;
        state.session = session;
        self.save(&state).await?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_domain::User;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn session() -> Session {
        Session {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at: None,
            user: User {
                id: Uuid::new_v4(),
                email: Some("a@example.com".into()),
            },
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let store = ClientStateStore::new(dir.path().join("state.json"));
        assert_eq!(store.load().await.unwrap(), ClientState::default());
    }

    #[tokio::test]
    async fn test_language_persists_across_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        ClientStateStore::new(&path)
            .set_language(Language::Hindi)
            .await
            .unwrap();

        let reopened = ClientStateStore::new(&path);
        assert_eq!(reopened.load().await.unwrap().language, Language::Hindi);
    }

    #[tokio::test]
    async fn test_session_round_trip_keeps_language() {
        let dir = tempdir().unwrap();
        let store = ClientStateStore::new(dir.path().join("state.json"));
        store.set_language(Language::Hindi).await.unwrap();

        let session = session();
        store.set_session(Some(session.clone())).await.unwrap();
        let state = store.load().await.unwrap();
        assert_eq!(state.session, Some(session));
        assert_eq!(state.language, Language::Hindi);

        store.set_session(None).await.unwrap();
        assert!(store.load().await.unwrap().session.is_none());
    }

    #[tokio::test]
    async fn test_unknown_language_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"version":1,"saved_at":"2024-03-05T10:00:00Z","language":"fr"}"#,
        )
        .unwrap();

        let state = ClientStateStore::new(&path).load().await.unwrap();
        assert_eq!(state.language, Language::English);
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let store = ClientStateStore::new(&path);
        assert!(store.load().await.is_err());
        assert_eq!(store.load_or_default().await, ClientState::default());
    }
}
