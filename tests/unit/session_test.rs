//! Unit tests for the dashboard session lifecycle.
//!
//! Covers session confirmation, the initial load, push-driven
//! reconciliation from the live subscription, and sign-out teardown.

use std::sync::Arc;
use std::time::Duration;

use smartmarks::auth::{AuthProvider, MemoryAuthProvider};
use smartmarks::managers::session::DashboardSession;
use smartmarks::store::{BookmarkStore, MemoryStore};
use smartmarks::types::bookmark::NewBookmark;
use smartmarks::types::errors::SyncError;
use smartmarks::types::settings::{MergeStrategy, SyncSettings};
use smartmarks::types::user::User;

fn row(title: &str, url: &str) -> NewBookmark {
    NewBookmark {
        title: title.to_string(),
        url: url.to_string(),
        user_id: "user-1".to_string(),
    }
}

/// Polls until `check` passes or the deadline expires.
async fn wait_until<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Without a session the dashboard cannot start; the caller redirects to
/// sign-in.
#[tokio::test]
async fn test_start_without_session_fails() {
    let auth = Arc::new(MemoryAuthProvider::signed_out());
    let store = Arc::new(MemoryStore::new());

    let err = match DashboardSession::start(auth, store, SyncSettings::default()).await {
        Ok(_) => panic!("session started without an active session"),
        Err(e) => e,
    };
    assert_eq!(err, SyncError::Auth);
}

/// Starting a session loads the existing collection and establishes the
/// live subscription.
#[tokio::test]
async fn test_start_loads_view_and_subscribes() {
    let auth = Arc::new(MemoryAuthProvider::signed_in(User::new("user-1")));
    let store = Arc::new(MemoryStore::new());
    store.insert(row("Example", "https://example.com")).await.unwrap();

    let session = DashboardSession::start(auth, store, SyncSettings::default())
        .await
        .unwrap();

    assert_eq!(session.synchronizer().view().await.len(), 1);
    assert!(session.is_live());
}

/// A failed initial load is not fatal: the session starts with an empty
/// view and an error status.
#[tokio::test]
async fn test_start_survives_initial_load_failure() {
    let auth = Arc::new(MemoryAuthProvider::signed_in(User::new("user-1")));
    let store = Arc::new(MemoryStore::new());
    store.fail_requests(true);

    let session = DashboardSession::start(auth, store, SyncSettings::default())
        .await
        .unwrap();

    assert!(session.synchronizer().view().await.is_empty());
    assert!(session.synchronizer().status().await.is_some());
}

/// A row inserted by another client reaches the view through the push
/// channel.
#[tokio::test]
async fn test_push_event_reconciles_remote_insert() {
    let auth = Arc::new(MemoryAuthProvider::signed_in(User::new("user-1")));
    let store = Arc::new(MemoryStore::new());

    let session = DashboardSession::start(auth, Arc::clone(&store), SyncSettings::default())
        .await
        .unwrap();
    assert!(session.synchronizer().view().await.is_empty());

    // Another device writes directly to the store.
    store.insert(row("Remote", "https://remote.example.com")).await.unwrap();

    let sync = session.synchronizer().clone();
    let reconciled = wait_until(|| {
        let sync = sync.clone();
        async move { sync.view().await.len() == 1 }
    })
    .await;
    assert!(reconciled, "remote insert never reached the view");
}

/// A remote delete is pruned from the view by the push-driven refetch.
#[tokio::test]
async fn test_push_event_reconciles_remote_delete() {
    let auth = Arc::new(MemoryAuthProvider::signed_in(User::new("user-1")));
    let store = Arc::new(MemoryStore::new());
    let bookmark = store.insert(row("Example", "https://example.com")).await.unwrap();

    let session = DashboardSession::start(auth, Arc::clone(&store), SyncSettings::default())
        .await
        .unwrap();
    assert_eq!(session.synchronizer().view().await.len(), 1);

    store.delete(&bookmark.id).await.unwrap();

    let sync = session.synchronizer().clone();
    let reconciled = wait_until(|| {
        let sync = sync.clone();
        async move { sync.view().await.is_empty() }
    })
    .await;
    assert!(reconciled, "remote delete never reached the view");
}

/// Sign-out tears the subscription down and terminates the auth session;
/// later store changes no longer touch the view.
#[tokio::test]
async fn test_sign_out_tears_down_subscription() {
    let auth = Arc::new(MemoryAuthProvider::signed_in(User::new("user-1")));
    let store = Arc::new(MemoryStore::new());

    let session = DashboardSession::start(
        Arc::clone(&auth),
        Arc::clone(&store),
        SyncSettings::default(),
    )
    .await
    .unwrap();

    let sync = session.synchronizer().clone();
    session.sign_out().await;

    assert!(auth.current_user().await.is_none());

    store.insert(row("Late", "https://late.example.com")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(
        sync.view().await.is_empty(),
        "view updated after the subscription was torn down"
    );
}

/// Under OptimisticInsert no live subscription is established.
#[tokio::test]
async fn test_optimistic_session_has_no_subscription() {
    let auth = Arc::new(MemoryAuthProvider::signed_in(User::new("user-1")));
    let store = Arc::new(MemoryStore::new());
    let settings = SyncSettings {
        merge_strategy: MergeStrategy::OptimisticInsert,
        ..SyncSettings::default()
    };

    let session = DashboardSession::start(auth, store, settings).await.unwrap();
    assert!(!session.is_live());
}
