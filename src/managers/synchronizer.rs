//! Bookmark Synchronizer for Smartmarks.
//!
//! Owns the client-local view of "all bookmarks owned by the current
//! user" and keeps it consistent with the [`BookmarkStore`]: full refetch
//! on demand and on every pushed change event, optimistic local edits
//! where the configured [`MergeStrategy`] allows them.

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::auth::AuthProvider;
use crate::services::urls;
use crate::store::BookmarkStore;
use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::SyncError;
use crate::types::message::StatusMessage;
use crate::types::settings::{MergeStrategy, SyncSettings};
use crate::types::user::User;

struct ViewState {
    bookmarks: Vec<Bookmark>,
    status: Option<StatusMessage>,
}

/// Client-side bookmark state machine.
///
/// The view lives behind a shared lock so the background reconciliation
/// task spawned by [`subscribe`](BookmarkSynchronizer::subscribe) can
/// refetch into it. No lock is held across a store call; concurrent
/// completions resolve last-write-wins.
pub struct BookmarkSynchronizer<A, S> {
    auth: Arc<A>,
    store: Arc<S>,
    user: User,
    settings: SyncSettings,
    state: Arc<RwLock<ViewState>>,
}

impl<A, S> Clone for BookmarkSynchronizer<A, S> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            store: Arc::clone(&self.store),
            user: self.user.clone(),
            settings: self.settings.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A, S> BookmarkSynchronizer<A, S>
where
    A: AuthProvider + 'static,
    S: BookmarkStore + 'static,
{
    /// Creates a synchronizer for an already-confirmed session. The view
    /// starts empty; call [`refresh`](Self::refresh) to populate it.
    pub fn new(auth: Arc<A>, store: Arc<S>, user: User, settings: SyncSettings) -> Self {
        Self {
            auth,
            store,
            user,
            settings,
            state: Arc::new(RwLock::new(ViewState {
                bookmarks: Vec::new(),
                status: None,
            })),
        }
    }

    /// Snapshot of the canonical view.
    pub async fn view(&self) -> Vec<Bookmark> {
        self.state.read().await.bookmarks.clone()
    }

    /// Current status message, if one is set and has not outlived its TTL.
    pub async fn status(&self) -> Option<StatusMessage> {
        self.state
            .read()
            .await
            .status
            .clone()
            .filter(|m| !m.is_expired(self.settings.status_ttl()))
    }

    async fn post(&self, message: StatusMessage) {
        self.state.write().await.status = Some(message);
    }

    /// Replaces the view with the store's current collection, newest
    /// first. On failure the previous view is retained untouched and an
    /// error status is posted.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        match self.store.list(&self.user.id).await {
            Ok(rows) => {
                debug!(count = rows.len(), "view refreshed from store");
                self.state.write().await.bookmarks = rows;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "refresh failed, keeping previous view");
                self.post(StatusMessage::error(
                    "Unable to load your bookmarks. Please refresh.",
                ))
                .await;
                Err(SyncError::Load(e.to_string()))
            }
        }
    }

    /// Validates, normalizes and submits a new bookmark.
    ///
    /// The duplicate check runs against the current local view only —
    /// the store does not enforce URL uniqueness. Whether the returned
    /// row is prepended locally depends on the configured merge strategy;
    /// under `RefetchOnPush` the live subscription picks it up instead.
    pub async fn add(&self, title: &str, raw_url: &str) -> Result<Bookmark, SyncError> {
        let title = title.trim();
        if title.is_empty() || raw_url.trim().is_empty() {
            self.post(StatusMessage::error(
                "Please provide both a title and a valid URL.",
            ))
            .await;
            return Err(SyncError::Validation("missing fields".to_string()));
        }

        let url = match urls::normalize(raw_url) {
            Ok(url) => url,
            Err(e) => {
                self.post(StatusMessage::error(
                    "Please enter a valid URL (example: https://google.com).",
                ))
                .await;
                return Err(e);
            }
        };

        let duplicate = {
            let state = self.state.read().await;
            state
                .bookmarks
                .iter()
                .any(|b| b.url.eq_ignore_ascii_case(&url))
        };
        if duplicate {
            self.post(StatusMessage::error(
                "This bookmark already exists in your collection.",
            ))
            .await;
            return Err(SyncError::Duplicate(url));
        }

        // The UI gates on login, but the session may have expired under us.
        let user = self.auth.current_user().await.ok_or(SyncError::Auth)?;

        match self
            .store
            .insert(NewBookmark {
                title: title.to_string(),
                url,
                user_id: user.id,
            })
            .await
        {
            Ok(bookmark) => {
                debug!(id = %bookmark.id, url = %bookmark.url, "bookmark added");
                let mut state = self.state.write().await;
                if self.settings.merge_strategy == MergeStrategy::OptimisticInsert {
                    state.bookmarks.insert(0, bookmark.clone());
                }
                state.status = Some(StatusMessage::success("Bookmark added successfully."));
                Ok(bookmark)
            }
            Err(e) => {
                warn!(error = %e, "insert failed");
                self.post(StatusMessage::error(
                    "Something went wrong while saving. Please try again.",
                ))
                .await;
                Err(SyncError::Store(e.to_string()))
            }
        }
    }

    /// Deletes a bookmark by id. Confirmation happens in the UI; the
    /// operation itself is idempotent — removing an entry a pushed delete
    /// already dropped from the view is a no-op.
    pub async fn remove(&self, id: &str) -> Result<(), SyncError> {
        if let Err(e) = self.store.delete(id).await {
            warn!(error = %e, id, "delete failed");
            self.post(StatusMessage::error(
                "Failed to delete bookmark. Please try again.",
            ))
            .await;
            return Err(SyncError::Store(e.to_string()));
        }

        debug!(id, "bookmark deleted");
        let mut state = self.state.write().await;
        state.bookmarks.retain(|b| b.id != id);
        state.status = Some(StatusMessage::success("Bookmark deleted successfully."));
        Ok(())
    }

    /// Case-insensitive substring filter over title and URL. Never
    /// touches the store or mutates the canonical view.
    pub async fn search(&self, query: &str) -> Vec<Bookmark> {
        filter_view(&self.state.read().await.bookmarks, query)
    }

    /// Moves one entry of the view from `from` to `to`. Purely local and
    /// ephemeral: the next refetch restores store order. Out-of-bounds
    /// indices are a silent no-op (a cancelled drag has no destination).
    pub async fn reorder(&self, from: usize, to: usize) {
        move_entry(&mut self.state.write().await.bookmarks, from, to);
    }

    /// Establishes the live reconciliation task: every change event
    /// pushed for this owner triggers a full refetch. The handle must be
    /// torn down when the session ends; a dropped handle aborts the task.
    pub fn subscribe(&self) -> SubscriptionHandle {
        let mut rx = self.store.subscribe(&self.user.id);
        let sync = self.clone();
        let user_id = self.user.id.clone();
        let task = tokio::spawn(async move {
            debug!(user = %user_id, "change subscription established");
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        debug!(kind = ?event.kind, id = %event.row.id, "change event, refetching");
                        // A failed refetch already posted a status.
                        let _ = sync.refresh().await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "change feed lagged, refetching");
                        let _ = sync.refresh().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!(user = %user_id, "change feed closed");
                        break;
                    }
                }
            }
        });
        SubscriptionHandle { task }
    }
}

/// Handle to the background reconciliation task of one subscription.
///
/// Dropping the handle aborts the task, so a session cannot leak a live
/// listener or double-deliver events across re-subscriptions.
pub struct SubscriptionHandle {
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    /// Tears the subscription down.
    pub fn unsubscribe(self) {
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Case-insensitive substring filter over `title` and `url`. Returns a
/// new sequence; `view` is untouched.
pub fn filter_view(view: &[Bookmark], query: &str) -> Vec<Bookmark> {
    let needle = query.to_lowercase();
    view.iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&needle) || b.url.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Splice-move: remove the entry at `from`, insert it at `to`. Either
/// index out of bounds leaves `view` unchanged.
pub fn move_entry(view: &mut Vec<Bookmark>, from: usize, to: usize) {
    if from >= view.len() || to >= view.len() {
        return;
    }
    let entry = view.remove(from);
    view.insert(to, entry);
}
