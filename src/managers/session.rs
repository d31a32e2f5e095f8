//! Dashboard session lifecycle.
//!
//! Ties the synchronizer's init and teardown to the auth session:
//! confirm the user, load the initial view, establish the live
//! subscription, and on sign-out tear the subscription down before the
//! session ends. The session is an explicitly passed object, not ambient
//! state.

use std::sync::Arc;

use tracing::info;

use crate::auth::AuthProvider;
use crate::store::BookmarkStore;
use crate::types::errors::SyncError;
use crate::types::settings::{MergeStrategy, SyncSettings};

use super::synchronizer::{BookmarkSynchronizer, SubscriptionHandle};

/// One authenticated dashboard session.
pub struct DashboardSession<A, S>
where
    A: AuthProvider + 'static,
    S: BookmarkStore + 'static,
{
    auth: Arc<A>,
    synchronizer: BookmarkSynchronizer<A, S>,
    subscription: Option<SubscriptionHandle>,
}

impl<A, S> DashboardSession<A, S>
where
    A: AuthProvider + 'static,
    S: BookmarkStore + 'static,
{
    /// Confirms the session and brings the dashboard up.
    ///
    /// Fails with [`SyncError::Auth`] when no session exists — the caller
    /// redirects to sign-in. A failed initial load is not fatal: the view
    /// stays empty, the error status is already posted, and the user can
    /// retry via refresh.
    pub async fn start(
        auth: Arc<A>,
        store: Arc<S>,
        settings: SyncSettings,
    ) -> Result<Self, SyncError> {
        let user = auth.current_user().await.ok_or(SyncError::Auth)?;
        info!(user = %user.id, "session confirmed, loading dashboard");

        let synchronizer =
            BookmarkSynchronizer::new(Arc::clone(&auth), store, user, settings.clone());
        let _ = synchronizer.refresh().await;

        // Under OptimisticInsert there is no live feed to reconcile from.
        let subscription = match settings.merge_strategy {
            MergeStrategy::RefetchOnPush => Some(synchronizer.subscribe()),
            MergeStrategy::OptimisticInsert => None,
        };

        Ok(Self {
            auth,
            synchronizer,
            subscription,
        })
    }

    pub fn synchronizer(&self) -> &BookmarkSynchronizer<A, S> {
        &self.synchronizer
    }

    /// Whether the live subscription is established and running.
    pub fn is_live(&self) -> bool {
        self.subscription
            .as_ref()
            .map_or(false, SubscriptionHandle::is_active)
    }

    /// Unsubscribes, then terminates the auth session. Consumes the
    /// session so no operation can run against a signed-out dashboard.
    pub async fn sign_out(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.auth.sign_out().await;
        info!("signed out");
    }
}
