//! Sign-up, sign-in and session upkeep on top of an `AuthProvider`.

use crate::i18n::{Language, Text};
use crate::repository::{AuthProvider, ProfileRepository};
use crate::route::Route;
use crate::{Credentials, Profile, Session, SignUpForm, User};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use taskboard_core::{AuthErrorKind, Notice, Notices, TaskboardError, TaskboardResult};

#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// Account created and usable right away.
    Registered { user: User },
    /// The provider sent a confirmation email; login works once it is confirmed.
    VerificationSent,
}

impl SignUpOutcome {
    /// Both outcomes continue at the login screen.
    pub fn next_route(&self) -> Route {
        Route::Login
    }
}

pub struct AuthFlow {
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileRepository>,
    notices: Notices,
    language: Language,
}

impl AuthFlow {
    pub fn new(auth: Arc<dyn AuthProvider>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            auth,
            profiles,
            notices: Notices::default(),
            language: Language::default(),
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub async fn sign_up(&mut self, form: &SignUpForm) -> TaskboardResult<SignUpOutcome> {
        if let Err(e) = form.validate() {
            self.error(self.language.t(Text::AllFieldsRequired).to_string());
            return Err(e);
        }

        let response = match self.auth.sign_up(&form.credentials()).await {
            Ok(response) => response,
            Err(e) => {
                let message = match &e {
                    TaskboardError::Auth {
                        kind: AuthErrorKind::EmailInUse,
                        ..
                    } => self.language.t(Text::EmailInUse).to_string(),
                    other => format!(
                        "{}: {}",
                        self.language.t(Text::SignupFailed),
                        other.user_message()
                    ),
                };
                self.error(message);
                return Err(e);
            }
        };

        let Some(user) = response.user else {
            self.notices
                .push(Notice::info(self.language.t(Text::VerificationSent)));
            return Ok(SignUpOutcome::VerificationSent);
        };

        let profile = Profile::new(user.id, form.full_name.trim());
        if let Err(e) = self
            .profiles
            .insert_profile(response.session.as_ref(), &profile)
            .await
        {
            tracing::warn!("Profile insert for {} failed: {}", user.id, e);
            self.error(format!(
                "{}: {}",
                self.language.t(Text::ProfileSaveFailed),
                e.user_message()
            ));
        }

        if response.session.is_none() {
            self.notices
                .push(Notice::info(self.language.t(Text::VerificationSent)));
            return Ok(SignUpOutcome::VerificationSent);
        }

        tracing::info!("Registered user {}", user.id);
        self.notices
            .push(Notice::success(self.language.t(Text::SignupSuccess)));
        Ok(SignUpOutcome::Registered { user })
    }

    pub async fn sign_in(&mut self, credentials: &Credentials) -> TaskboardResult<Session> {
        if let Err(e) = credentials.validate() {
            self.error(e.user_message());
            return Err(e);
        }
        match self.auth.sign_in(&credentials.normalized()).await {
            Ok(session) => {
                tracing::info!("Signed in as {}", session.user_id());
                self.notices
                    .push(Notice::success(self.language.t(Text::LoginSuccess)));
                Ok(session)
            }
            Err(e) => {
                let message = match &e {
                    TaskboardError::Auth {
                        kind: AuthErrorKind::InvalidCredentials,
                        ..
                    } => self.language.t(Text::InvalidCredentials).to_string(),
                    other => other.user_message(),
                };
                self.error(message);
                Err(e)
            }
        }
    }

    /// Best effort: the local session is dropped even if the provider
    /// call fails.
    pub async fn sign_out(&mut self, session: &Session) {
        if let Err(e) = self.auth.sign_out(session).await {
            tracing::warn!("Remote sign-out failed: {}", e);
        }
    }

    pub async fn current_user(&self, session: &Session) -> TaskboardResult<User> {
        self.auth.current_user(session).await
    }

    /// Return `session`, or a refreshed one if it is about to expire.
    pub async fn ensure_fresh(
        &self,
        session: &Session,
        now: DateTime<Utc>,
    ) -> TaskboardResult<Session> {
        if !session.is_expired(now) {
            return Ok(session.clone());
        }
        tracing::debug!("Refreshing session for {}", session.user_id());
        let refreshed = self.auth.refresh(&session.refresh_token).await?;
        if refreshed.user_id() != session.user_id() {
            return Err(TaskboardError::Unauthorized(
                "refreshed session belongs to a different user".to_string(),
            ));
        }
        Ok(refreshed)
    }

    fn error(&mut self, message: String) {
        self.notices.push(Notice::error(message));
    }
}
