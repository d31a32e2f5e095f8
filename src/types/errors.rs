use std::fmt;

// === SyncError ===

/// Errors produced by the bookmark synchronizer.
///
/// None of these are fatal: every failure path leaves the local view in
/// its last-known-good state. `Validation` and `Duplicate` are corrected
/// by the user and retried; `Store` and `Load` are transient backend
/// failures surfaced as an auto-expiring status message; `Auth` means the
/// session is gone and the caller should send the user back to sign-in.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncError {
    /// Malformed or missing input ("missing fields", "invalid url").
    Validation(String),
    /// A bookmark with the same normalized URL already exists in the view.
    Duplicate(String),
    /// No active session.
    Auth,
    /// The store rejected an insert or delete.
    Store(String),
    /// The store rejected a full fetch; the previous view is retained.
    Load(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            SyncError::Duplicate(url) => write!(f, "Duplicate bookmark URL: {}", url),
            SyncError::Auth => write!(f, "No active session"),
            SyncError::Store(msg) => write!(f, "Bookmark store error: {}", msg),
            SyncError::Load(msg) => write!(f, "Failed to load bookmarks: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

// === StoreError ===

/// Errors returned by a `BookmarkStore` implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backend failed (network, database, service outage).
    Backend(String),
    /// The change feed or connection was closed.
    Closed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "Store backend error: {}", msg),
            StoreError::Closed(msg) => write!(f, "Store connection closed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
