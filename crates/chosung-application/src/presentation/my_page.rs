//! My page: profile, medals and paged solving history.

use std::sync::Arc;

use chosung_core::paging::PageRequest;
use chosung_core::quiz_result::QuizResult;
use chosung_core::user::User;

use super::{StateHolder, ViewState};
use crate::auth_usecase::AuthUseCase;
use crate::quiz_result_usecase::QuizResultUseCase;

#[derive(Debug, Clone, PartialEq)]
pub struct MyPage {
    pub user: User,
    pub results: Vec<QuizResult>,
    pub next_cursor: Option<String>,
}

/// Profile, medals and solving history of the signed-in user.
pub struct MyPageScreen {
    auth: Arc<AuthUseCase>,
    results: Arc<QuizResultUseCase>,
    page_size: usize,
    state: StateHolder<MyPage>,
}

impl MyPageScreen {
    pub fn new(auth: Arc<AuthUseCase>, results: Arc<QuizResultUseCase>, page_size: usize) -> Self {
        Self {
            auth,
            results,
            page_size,
            state: StateHolder::new("MyPage"),
        }
    }

    pub fn state(&self) -> &StateHolder<MyPage> {
        &self.state
    }

    pub async fn load(&self) {
        self.state
            .run(async {
                let user = self.auth.current_user().await?;
                let page = self
                    .results
                    .list_mine(&PageRequest::first(self.page_size))
                    .await?;
                Ok(MyPage {
                    user,
                    results: page.items,
                    next_cursor: page.next_cursor,
                })
            })
            .await;
    }

    pub async fn load_more_results(&self) {
        let ViewState::Success(current) = self.state.current() else {
            return;
        };
        let Some(cursor) = current.next_cursor.clone() else {
            return;
        };

        let result = self
            .results
            .list_mine(&PageRequest::after(self.page_size, cursor))
            .await
            .map(|page| {
                let mut results = current.results;
                results.extend(page.items);
                MyPage {
                    results,
                    next_cursor: page.next_cursor,
                    ..current
                }
            });
        self.state.publish(result);
    }

    /// Returns `true` when the nickname is stored. A page that was not
    /// loaded yet is loaded afterwards.
    pub async fn change_nickname(&self, nickname: &str) -> bool {
        match self.auth.update_nickname(nickname).await {
            Ok(user) => {
                if !self.state.modify(|page| page.user = user) {
                    self.load().await;
                }
                true
            }
            Err(e) => {
                tracing::warn!("[MyPage] {}", e);
                self.state.set(ViewState::Error(e.to_string()));
                false
            }
        }
    }

    pub async fn sign_out(&self) -> bool {
        self.leave(self.auth.sign_out()).await
    }

    pub async fn withdraw(&self) -> bool {
        self.leave(self.auth.withdraw()).await
    }

    async fn leave(
        &self,
        action: impl std::future::Future<Output = chosung_core::error::Result<()>>,
    ) -> bool {
        match action.await {
            Ok(()) => {
                self.state.set(ViewState::Loading);
                true
            }
            Err(e) => {
                tracing::warn!("[MyPage] {}", e);
                self.state.set(ViewState::Error(e.to_string()));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryRepositories, StubSocialLogin};
    use chosung_core::preference::PreferenceStore;
    use chosung_infrastructure::MemoryPreferenceStore;

    struct Fixture {
        repos: MemoryRepositories,
        preferences: Arc<MemoryPreferenceStore>,
        screen: MyPageScreen,
    }

    async fn fixture() -> (Fixture, User) {
        let repos = MemoryRepositories::new();
        let preferences = Arc::new(MemoryPreferenceStore::new());
        let auth = Arc::new(AuthUseCase::new(
            Arc::new(StubSocialLogin::new("kakao-3", "영수")),
            repos.users.clone(),
            preferences.clone(),
            repos.session.clone(),
        ));
        let user = auth.sign_in(true).await.unwrap();
        let screen = MyPageScreen::new(auth, repos.result_usecase(), 2);
        (
            Fixture {
                repos,
                preferences,
                screen,
            },
            user,
        )
    }

    #[tokio::test]
    async fn test_load_and_page_results() {
        let (f, user) = fixture().await;
        let group = f.repos.group_with_answers(&user.id, &["사과"]).await;
        let results = f.repos.result_usecase();
        for _ in 0..3 {
            results
                .submit(&group.id, vec!["사과".to_string()])
                .await
                .unwrap();
        }

        f.screen.load().await;
        let page = f.screen.state().current().success().cloned().unwrap();
        assert_eq!(page.user.points, 300);
        assert_eq!(page.results.len(), 2);
        assert!(page.next_cursor.is_some());

        f.screen.load_more_results().await;
        let page = f.screen.state().current().success().cloned().unwrap();
        assert_eq!(page.results.len(), 3);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_change_nickname() {
        let (f, _) = fixture().await;
        f.screen.load().await;

        assert!(f.screen.change_nickname("새이름").await);
        let page = f.screen.state().current().success().cloned().unwrap();
        assert_eq!(page.user.nickname, "새이름");

        assert!(!f.screen.change_nickname(" ").await);
        assert!(f.screen.state().current().error().is_some());
    }

    #[tokio::test]
    async fn test_change_nickname_before_load() {
        let (f, _) = fixture().await;
        assert!(f.screen.state().current().is_loading());

        assert!(f.screen.change_nickname("먼저").await);
        let page = f.screen.state().current().success().cloned().unwrap();
        assert_eq!(page.user.nickname, "먼저");
    }

    #[tokio::test]
    async fn test_sign_out_and_withdraw() {
        let (f, user) = fixture().await;
        assert!(f.screen.sign_out().await);
        assert!(!f.repos.session.is_signed_in().await);
        assert_eq!(f.preferences.remembered_login_id().await, Some(user.id.clone()));

        // withdraw needs a session
        assert!(!f.screen.withdraw().await);
        assert_eq!(f.screen.state().current().error(), Some("not logged in"));

        f.repos.session.sign_in(&user.id).await;
        assert!(f.screen.withdraw().await);
        assert!(f.repos.users.find_by_id(&user.id).await.unwrap().is_none());
        assert!(f.preferences.remembered_login_id().await.is_none());
    }
}
