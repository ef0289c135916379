pub mod auth;
pub mod lang;
pub mod task;

use taskboard_core::{NoticeLevel, Notices, TaskboardError};

/// Prefer the localized notice an operation raised over the raw error.
pub fn surfaced(notices: &Notices, err: TaskboardError) -> anyhow::Error {
    match notices.latest() {
        Some(notice) if notice.level == NoticeLevel::Error => {
            anyhow::anyhow!(notice.message.clone())
        }
        _ => anyhow::Error::new(err),
    }
}
