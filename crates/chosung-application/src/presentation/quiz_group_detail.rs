//! Detail screen for one quiz group: likes, delete and report.

use std::sync::Arc;

use chosung_core::error::Result;
use chosung_core::quiz_group::QuizGroup;
use chosung_core::session::Session;

use super::{StateHolder, ViewState};
use crate::quiz_group_usecase::QuizGroupUseCase;

#[derive(Debug, Clone, PartialEq)]
pub struct QuizGroupDetail {
    pub group: QuizGroup,
    /// Whether the signed-in user has liked the group.
    pub liked: bool,
    /// Whether the signed-in user wrote the group (enables delete).
    pub owned: bool,
}

pub struct QuizGroupDetailScreen {
    usecase: Arc<QuizGroupUseCase>,
    session: Arc<Session>,
    state: StateHolder<QuizGroupDetail>,
}

impl QuizGroupDetailScreen {
    pub fn new(usecase: Arc<QuizGroupUseCase>, session: Arc<Session>) -> Self {
        Self {
            usecase,
            session,
            state: StateHolder::new("QuizGroupDetail"),
        }
    }

    pub fn state(&self) -> &StateHolder<QuizGroupDetail> {
        &self.state
    }

    pub async fn load(&self, group_id: &str) {
        self.state
            .run(async {
                let group = self.usecase.get(group_id).await?;
                Ok(self.detail(group).await)
            })
            .await;
    }

    /// Flips the like and shows the stored outcome.
    pub async fn toggle_like(&self) {
        let Some(group_id) = self.loaded_group_id() else {
            return;
        };
        let result = match self.usecase.toggle_like(&group_id).await {
            Ok(group) => Ok(self.detail(group).await),
            Err(e) => Err(e),
        };
        self.state.publish(result);
    }

    /// Deletes the loaded group. Returns `true` when it is gone.
    ///
    /// The state drops back to `Loading` since there is nothing left to show.
    pub async fn delete(&self) -> bool {
        let deleted = self
            .finish(|id| async move { self.usecase.delete(&id).await })
            .await;
        if deleted.is_some() {
            self.state.set(ViewState::Loading);
        }
        deleted.is_some()
    }

    /// Reports the loaded group and reloads it with its new status.
    pub async fn report(&self) -> bool {
        let Some(group_id) = self
            .finish(|id| async move { self.usecase.report(&id).await })
            .await
        else {
            return false;
        };
        self.load(&group_id).await;
        true
    }

    /// Runs `action` on the loaded group. Returns its id on success.
    async fn finish<F, Fut>(&self, action: F) -> Option<String>
    where
        F: FnOnce(String) -> Fut,
        Fut: std::future::Future<Output = Result<()>>,
    {
        let group_id = self.loaded_group_id()?;
        match action(group_id.clone()).await {
            Ok(()) => Some(group_id),
            Err(e) => {
                tracing::warn!("[QuizGroupDetail] {}", e);
                self.state.set(ViewState::Error(e.to_string()));
                None
            }
        }
    }

    fn loaded_group_id(&self) -> Option<String> {
        match self.state.current() {
            ViewState::Success(detail) => Some(detail.group.id),
            _ => {
                tracing::debug!("[QuizGroupDetail] no group loaded");
                None
            }
        }
    }

    async fn detail(&self, group: QuizGroup) -> QuizGroupDetail {
        let user_id = self.session.current_user_id().await;
        let liked = user_id.as_deref().is_some_and(|id| group.is_liked_by(id));
        let owned = user_id.as_deref().is_some_and(|id| group.is_owned_by(id));
        QuizGroupDetail {
            group,
            liked,
            owned,
        }
    }
}
