use crate::local::LocalBackend;
use crate::supabase::SupabaseClient;
use std::sync::Arc;
use taskboard_core::{AppConfig, BackendKind, TaskboardResult};
use taskboard_domain::{
    AuthFlow, AuthProvider, Dashboard, DashboardOptions, ProfileRepository, Session,
    TaskRepository,
};

/// The provider handles every front end needs, selected from config.
#[derive(Clone)]
pub struct Backend {
    kind: BackendKind,
    pub auth: Arc<dyn AuthProvider>,
    pub tasks: Arc<dyn TaskRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Backend {
    pub async fn from_config(config: &AppConfig) -> TaskboardResult<Self> {
        match config.backend {
            BackendKind::Supabase => {
                let client = SupabaseClient::from_config(config)?;
                tracing::info!("Using Supabase backend at {}", client.base_url());
                Ok(Self::from_provider(BackendKind::Supabase, Arc::new(client)))
            }
            BackendKind::Local => {
                let local = LocalBackend::open(config.effective_data_file()).await?;
                Ok(Self::from_provider(BackendKind::Local, Arc::new(local)))
            }
        }
    }

    /// Use one value for auth, tasks and profiles.
    pub fn from_provider<P>(kind: BackendKind, provider: Arc<P>) -> Self
    where
        P: AuthProvider + TaskRepository + ProfileRepository + 'static,
    {
        Self {
            kind,
            auth: provider.clone(),
            tasks: provider.clone(),
            profiles: provider,
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn auth_flow(&self) -> AuthFlow {
        AuthFlow::new(self.auth.clone(), self.profiles.clone())
    }

    pub fn dashboard(&self, session: Session, options: DashboardOptions) -> Dashboard {
        Dashboard::new(session, self.tasks.clone(), self.profiles.clone(), options)
    }
}
