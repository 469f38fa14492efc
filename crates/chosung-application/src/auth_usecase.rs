//! Sign-in, sign-out and account management.

use std::sync::Arc;

use chosung_core::auth::SocialLoginProvider;
use chosung_core::error::{ChosungError, Result};
use chosung_core::preference::PreferenceStore;
use chosung_core::session::Session;
use chosung_core::user::{User, UserRepository};
use futures::stream::BoxStream;

/// Use case for authentication and the signed-in user's account.
///
/// # Responsibilities
///
/// - Running the social login and mapping it to a stored `User`
/// - Starting and ending the in-memory `Session`
/// - Keeping the remembered login id and auto-login flag up to date
pub struct AuthUseCase {
    social_login: Arc<dyn SocialLoginProvider>,
    user_repository: Arc<dyn UserRepository>,
    preferences: Arc<dyn PreferenceStore>,
    session: Arc<Session>,
}

impl AuthUseCase {
    pub fn new(
        social_login: Arc<dyn SocialLoginProvider>,
        user_repository: Arc<dyn UserRepository>,
        preferences: Arc<dyn PreferenceStore>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            social_login,
            user_repository,
            preferences,
            session,
        }
    }

    /// Logs in with the social provider, registering the user on first use.
    pub async fn sign_in(&self, auto_login: bool) -> Result<User> {
        let account = self.social_login.login().await?;

        let user = match self
            .user_repository
            .find_by_social_id(&account.provider_user_id)
            .await?
        {
            Some(user) => user,
            None => {
                let user = User::new(&account.provider_user_id, &account.display_name);
                self.user_repository.create(&user).await?;
                tracing::info!(user_id = %user.id, "Registered new user");
                user
            }
        };

        // the session only starts once the login is remembered
        self.preferences
            .set_remembered_login_id(Some(user.id.clone()))
            .await?;
        self.preferences.set_auto_login(auto_login).await?;
        self.session.sign_in(&user.id).await;
        Ok(user)
    }

    /// Restores the session from the remembered id when auto-login is on.
    ///
    /// Returns `None` when auto-login is off, nothing is remembered, or the
    /// remembered user no longer exists. A stale id is forgotten.
    pub async fn try_auto_sign_in(&self) -> Result<Option<User>> {
        if !self.preferences.auto_login().await {
            return Ok(None);
        }
        let Some(user_id) = self.preferences.remembered_login_id().await else {
            return Ok(None);
        };

        match self.user_repository.find_by_id(&user_id).await? {
            Some(user) => {
                self.session.sign_in(&user.id).await;
                tracing::info!(user_id = %user.id, "Auto sign-in");
                Ok(Some(user))
            }
            None => {
                tracing::warn!(user_id = %user_id, "Remembered user no longer exists");
                self.preferences.set_remembered_login_id(None).await?;
                Ok(None)
            }
        }
    }

    /// Ends the session. The remembered id stays for the login form.
    pub async fn sign_out(&self) -> Result<()> {
        self.social_login.logout().await?;
        self.session.sign_out().await;
        self.preferences.set_auto_login(false).await?;
        Ok(())
    }

    /// Deletes the account and forgets everything stored about the login.
    pub async fn withdraw(&self) -> Result<()> {
        let user_id = self.session.require_user_id().await?;
        self.social_login.unlink().await?;
        self.user_repository.delete(&user_id).await?;
        self.session.sign_out().await;
        self.preferences.set_remembered_login_id(None).await?;
        self.preferences.set_auto_login(false).await?;
        tracing::info!(user_id = %user_id, "User withdrew");
        Ok(())
    }

    /// Remembered login id, for pre-filling the login form.
    pub fn remembered_login_id_stream(&self) -> BoxStream<'static, Option<String>> {
        self.preferences.remembered_login_id_stream()
    }

    pub fn auto_login_stream(&self) -> BoxStream<'static, bool> {
        self.preferences.auto_login_stream()
    }

    /// Loads the signed-in user.
    pub async fn current_user(&self) -> Result<User> {
        let user_id = self.session.require_user_id().await?;
        self.user_repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ChosungError::not_found("User", user_id))
    }

    pub async fn update_nickname(&self, nickname: &str) -> Result<User> {
        let user_id = self.session.require_user_id().await?;
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(ChosungError::validation("nickname must not be empty"));
        }
        self.user_repository
            .update_nickname(&user_id, nickname)
            .await?;
        self.current_user().await
    }
}
