//! In-memory holder for the signed-in user.

use tokio::sync::RwLock;

use crate::error::{ChosungError, Result};

/// Tracks which user is signed in for the lifetime of the process.
///
/// One instance is created by the composition root and shared via `Arc`.
/// Nothing here is persisted; the remembered login id lives in the
/// preference store instead.
#[derive(Debug, Default)]
pub struct Session {
    user_id: RwLock<Option<String>>,
}

impl Session {
    /// Creates a session with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the session for `user_id`, replacing any previous user.
    pub async fn sign_in(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        tracing::info!(user_id = %user_id, "Session started");
        *self.user_id.write().await = Some(user_id);
    }

    /// Ends the session. Calling it while signed out is a no-op.
    pub async fn sign_out(&self) {
        if let Some(user_id) = self.user_id.write().await.take() {
            tracing::info!(user_id = %user_id, "Session ended");
        }
    }

    pub async fn current_user_id(&self) -> Option<String> {
        self.user_id.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.user_id.read().await.is_some()
    }

    /// Returns the signed-in user id or `NotLoggedIn`.
    pub async fn require_user_id(&self) -> Result<String> {
        self.current_user_id()
            .await
            .ok_or(ChosungError::NotLoggedIn)
    }
}
