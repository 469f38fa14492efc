//! Quiz authoring form.

use std::sync::Arc;

use chosung_core::quiz_group::{QuizGroup, QuizGroupDraft};

use super::{StateHolder, ViewState};
use crate::quiz_group_usecase::QuizGroupUseCase;

/// Authoring form. `Success(Some(group))` once the group is stored.
pub struct CreateQuizScreen {
    usecase: Arc<QuizGroupUseCase>,
    state: StateHolder<Option<QuizGroup>>,
}

impl CreateQuizScreen {
    pub fn new(usecase: Arc<QuizGroupUseCase>) -> Self {
        Self {
            usecase,
            state: StateHolder::with_state("CreateQuiz", ViewState::Success(None)),
        }
    }

    pub fn state(&self) -> &StateHolder<Option<QuizGroup>> {
        &self.state
    }

    pub async fn submit(&self, draft: QuizGroupDraft) -> Option<QuizGroup> {
        self.state
            .run(async { self.usecase.create(draft).await.map(Some) })
            .await
            .flatten()
    }
}
