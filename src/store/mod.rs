//! Bookmark store abstraction.
//!
//! The synchronizer never talks to a backend directly; it goes through
//! [`BookmarkStore`], which covers the four operations the dashboard
//! needs: owner-scoped listing, insert, delete, and a live change feed.
//! [`memory::MemoryStore`] is the in-process reference implementation
//! used by the tests.

pub mod memory;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::StoreError;

pub use memory::MemoryStore;

/// Kind of change pushed on a live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A single change pushed to subscribers when the store's data moves.
///
/// `row` carries the affected bookmark: the inserted row, the new version
/// of an updated row, or the row as it was before deletion.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub row: Bookmark,
}

/// Trait defining durable bookmark persistence plus change notification.
///
/// All operations are async; implementations must be shareable across
/// tasks since the subscription reconciler runs in the background.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks owned by `user_id`, newest first.
    async fn list(&self, user_id: &str) -> Result<Vec<Bookmark>, StoreError>;

    /// Inserts a bookmark and returns the stored row, with the
    /// store-assigned `id` and `created_at`.
    async fn insert(&self, new: NewBookmark) -> Result<Bookmark, StoreError>;

    /// Deletes a bookmark by id. Deleting an id that does not exist is
    /// not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Opens a live change feed scoped to one owner. Dropping the
    /// receiver unsubscribes.
    fn subscribe(&self, user_id: &str) -> broadcast::Receiver<ChangeEvent>;
}
