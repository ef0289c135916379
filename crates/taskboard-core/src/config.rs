use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which provider the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted Supabase project (auth + PostgREST tables).
    #[default]
    Supabase,
    /// JSON file on disk, for offline use and tests.
    Local,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "supabase" => Ok(Self::Supabase),
            "local" => Ok(Self::Local),
            other => Err(format!("unknown backend '{}' (expected supabase or local)", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendKind,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    /// Data file for the local backend.
    pub data_file: Option<PathBuf>,
    /// Where the language choice and session are persisted.
    pub state_file: Option<PathBuf>,
    /// Offset from UTC used when displaying timestamps.
    pub display_utc_offset_minutes: i32,
    pub fetch_retries: u32,
    pub retry_backoff_ms: u64,
    pub request_timeout_secs: u64,
    pub notice_ttl_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Supabase,
            supabase_url: None,
            supabase_anon_key: None,
            data_file: None,
            state_file: None,
            display_utc_offset_minutes: 330,
            fetch_retries: 2,
            retry_backoff_ms: 250,
            request_timeout_secs: 15,
            notice_ttl_ms: 2500,
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard"))
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir().map(|config| config.join("taskboard"))
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load from the platform config location, falling back to defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path. A missing or malformed file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring invalid config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Could not read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn effective_state_file(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("taskboard").join("state.json"))
                .unwrap_or_else(|| PathBuf::from("taskboard-state.json"))
        })
    }

    pub fn effective_data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("taskboard").join("local.json"))
                .unwrap_or_else(|| PathBuf::from("taskboard-local.json"))
        })
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
