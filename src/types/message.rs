use std::time::{Duration, Instant};

/// Whether a status message reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Transient user-visible status line ("Bookmark added successfully.").
///
/// Messages auto-expire: callers read them through
/// [`StatusMessage::is_expired`] with the TTL from `SyncSettings`, so a
/// stale toast never lingers past its interval.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    posted_at: Instant,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
            posted_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
            posted_at: Instant::now(),
        }
    }

    /// True once the message has outlived `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.posted_at.elapsed() >= ttl
    }
}
