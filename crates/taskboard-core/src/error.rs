use thiserror::Error;

/// Coarse classification of an authentication failure, derived from the
/// provider's message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    InvalidCredentials,
    EmailInUse,
    NotSignedIn,
    Other,
}

impl AuthErrorKind {
    /// The provider only gives us free text, so match on well-known fragments.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("invalid login credentials") || lower.contains("invalid credentials") {
            Self::InvalidCredentials
        } else if lower.contains("already") || lower.contains("exists") {
            Self::EmailInUse
        } else if lower.contains("not signed in") || lower.contains("jwt expired") {
            Self::NotSignedIn
        } else {
            Self::Other
        }
    }
}

#[derive(Error, Debug)]
pub enum TaskboardError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication failed: {message}")]
    Auth { kind: AuthErrorKind, message: String },

    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskboardError {
    pub fn auth(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Auth {
            kind: AuthErrorKind::classify(&message),
            message,
        }
    }

    pub fn not_signed_in() -> Self {
        Self::Auth {
            kind: AuthErrorKind::NotSignedIn,
            message: "not signed in".to_string(),
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Remote { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Message suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Unauthorized(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Auth { message, .. } | Self::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
