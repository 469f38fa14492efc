//! Login screen with auto sign-in on start.

use std::sync::Arc;

use chosung_core::user::User;
use futures::stream::BoxStream;

use super::{StateHolder, ViewState};
use crate::auth_usecase::AuthUseCase;

/// Login screen. `Success(None)` means "show the login button".
pub struct LoginScreen {
    auth: Arc<AuthUseCase>,
    state: StateHolder<Option<User>>,
}

impl LoginScreen {
    pub fn new(auth: Arc<AuthUseCase>) -> Self {
        Self {
            auth,
            state: StateHolder::with_state("Login", ViewState::Success(None)),
        }
    }

    pub fn state(&self) -> &StateHolder<Option<User>> {
        &self.state
    }

    /// Pre-fill value for the login form.
    pub fn remembered_login_id(&self) -> BoxStream<'static, Option<String>> {
        self.auth.remembered_login_id_stream()
    }

    /// Tries the remembered login on app start.
    pub async fn on_start(&self) {
        self.state.run(self.auth.try_auto_sign_in()).await;
    }

    pub async fn sign_in(&self, auto_login: bool) {
        self.state
            .run(async { self.auth.sign_in(auto_login).await.map(Some) })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubSocialLogin, memory_user_repository};
    use chosung_core::session::Session;
    use chosung_infrastructure::MemoryPreferenceStore;
    use futures::StreamExt;

    fn screen(social: Arc<StubSocialLogin>) -> LoginScreen {
        let auth = AuthUseCase::new(
            social,
            memory_user_repository(),
            Arc::new(MemoryPreferenceStore::new()),
            Arc::new(Session::new()),
        );
        LoginScreen::new(Arc::new(auth))
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let screen = screen(Arc::new(StubSocialLogin::new("kakao-9", "민수")));
        screen.on_start().await;
        assert_eq!(screen.state().current(), ViewState::Success(None));

        screen.sign_in(true).await;
        let user = screen.state().current().success().cloned().flatten().unwrap();
        assert_eq!(user.nickname, "민수");

        let mut remembered = screen.remembered_login_id();
        assert_eq!(remembered.next().await, Some(Some(user.id)));
    }

    #[tokio::test]
    async fn test_sign_in_failure_is_error_state() {
        let social = Arc::new(StubSocialLogin::new("kakao-9", "민수"));
        social.fail_next_login();
        let screen = screen(social);

        screen.sign_in(false).await;
        assert!(screen.state().current().error().is_some());
    }
}
