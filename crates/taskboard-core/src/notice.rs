use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient, user-facing notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        now - self.raised_at >= ttl
    }
}

/// Bounded queue of notices, newest last.
#[derive(Debug, Clone)]
pub struct Notices {
    items: VecDeque<Notice>,
    capacity: usize,
}

impl Notices {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::warn!("notice: {}", notice.message),
            _ => tracing::debug!("notice: {}", notice.message),
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notice);
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every notice older than `ttl`.
    pub fn expire(&mut self, now: DateTime<Utc>, ttl: Duration) {
        self.items.retain(|n| !n.is_expired(now, ttl));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::with_capacity(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_drops_oldest() {
        let mut notices = Notices::with_capacity(2);
        notices.push(Notice::info("one"));
        notices.push(Notice::info("two"));
        notices.push(Notice::error("three"));

        let messages: Vec<_> = notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert_eq!(notices.latest().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_expire_removes_old_notices() {
        let mut notices = Notices::default();
        let mut old = Notice::success("saved");
        old.raised_at = Utc::now() - chrono::Duration::seconds(10);
        notices.push(old);
        notices.push(Notice::info("fresh"));

        notices.expire(Utc::now(), Duration::from_secs(3));
        assert_eq!(notices.len(), 1);
        assert_eq!(notices.latest().unwrap().message, "fresh");
    }
}
