//! Auth provider abstraction.
//!
//! The OAuth redirect dance happens outside this crate; by the time the
//! dashboard core runs, the provider either has a session or it does not.
//! [`MemoryAuthProvider`] is the in-process stand-in used by the tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::user::User;

/// Trait defining the identity and session lifecycle the dashboard needs.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The active session's user, or `None` when unauthenticated.
    async fn current_user(&self) -> Option<User>;

    /// Terminates the session.
    async fn sign_out(&self);
}

/// In-process session holder.
pub struct MemoryAuthProvider {
    session: RwLock<Option<User>>,
}

impl MemoryAuthProvider {
    /// Starts with no session.
    pub fn signed_out() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }

    /// Starts with an active session for `user`.
    pub fn signed_in(user: User) -> Self {
        Self {
            session: RwLock::new(Some(user)),
        }
    }

    /// Installs a session, as the OAuth callback would.
    pub async fn sign_in(&self, user: User) {
        *self.session.write().await = Some(user);
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn current_user(&self) -> Option<User> {
        self.session.read().await.clone()
    }

    async fn sign_out(&self) {
        *self.session.write().await = None;
    }
}
