use crate::cli::Cli;
use chrono::Utc;
use taskboard_core::{AppConfig, TaskboardError, TaskboardResult};
use taskboard_domain::{AuthFlow, Dashboard, DashboardOptions, Session, StatusView};
use taskboard_remote::{Backend, ClientState, ClientStateStore};

/// Resolve the effective config: file first, then flags and env on top.
pub fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(path) = &cli.data_file {
        config.data_file = Some(path.clone());
    }
    if let Some(path) = &cli.state_file {
        config.state_file = Some(path.clone());
    }
    if let Some(url) = &cli.supabase_url {
        config.supabase_url = Some(url.clone());
    }
    if let Some(key) = &cli.supabase_key {
        config.supabase_anon_key = Some(key.clone());
    }
    config
}

pub struct CliContext {
    pub config: AppConfig,
    pub backend: Backend,
    pub state: ClientState,
    store: ClientStateStore,
}

impl CliContext {
    pub async fn load(config: AppConfig) -> TaskboardResult<Self> {
        let backend = Backend::from_config(&config).await?;
        let store = ClientStateStore::new(config.effective_state_file());
        let state = store.load_or_default().await;
        Ok(Self {
            config,
            backend,
            state,
            store,
        })
    }

    pub fn options(&self) -> DashboardOptions {
        DashboardOptions::from_config(&self.config)
    }

    pub fn auth_flow(&self) -> AuthFlow {
        self.backend.auth_flow().with_language(self.state.language)
    }

    pub async fn remember(&mut self, session: Option<Session>) -> TaskboardResult<()> {
        self.state = self.store.set_session(session).await?;
        Ok(())
    }

    /// The stored session, refreshed and re-saved if it has expired.
    pub async fn session(&mut self) -> TaskboardResult<Session> {
        let stored = self
            .state
            .session
            .clone()
            .ok_or_else(TaskboardError::not_signed_in)?;
        let fresh = self.auth_flow().ensure_fresh(&stored, Utc::now()).await?;
        if fresh.access_token != stored.access_token {
            tracing::debug!("Stored session refreshed");
            self.remember(Some(fresh.clone())).await?;
        }
        Ok(fresh)
    }

    /// A dashboard for the signed-in user with `view` loaded.
    pub async fn dashboard(&mut self, view: StatusView) -> TaskboardResult<Dashboard> {
        let session = self.session().await?;
        let mut dashboard = self
            .backend
            .dashboard(session, self.options())
            .with_language(self.state.language);
        dashboard.set_status_view(view).await?;
        Ok(dashboard)
    }
}
