//! Result screen with the per-question breakdown.

use std::sync::Arc;

use chosung_core::quiz_result::{QuestionOutcome, QuizResult};

use super::{StateHolder, ViewState};
use crate::quiz_result_usecase::QuizResultUseCase;

#[derive(Debug, Clone, PartialEq)]
pub struct QuizResultView {
    pub result: QuizResult,
    /// Empty when the group's questions are no longer available.
    pub details: Vec<QuestionOutcome>,
}

pub struct QuizResultScreen {
    usecase: Arc<QuizResultUseCase>,
    state: StateHolder<QuizResultView>,
}

impl QuizResultScreen {
    pub fn new(usecase: Arc<QuizResultUseCase>) -> Self {
        Self {
            usecase,
            state: StateHolder::new("QuizResult"),
        }
    }

    pub fn state(&self) -> &StateHolder<QuizResultView> {
        &self.state
    }

    pub async fn load(&self, result_id: &str) {
        self.state
            .run(async {
                let result = self.usecase.get(result_id).await?;
                let details = self.usecase.details(&result).await;
                Ok(QuizResultView { result, details })
            })
            .await;
    }

    /// Deletes the shown result. Returns `true` when it is gone.
    ///
    /// The state drops back to `Loading` since there is nothing left to show.
    pub async fn delete(&self) -> bool {
        let ViewState::Success(view) = self.state.current() else {
            return false;
        };
        match self.usecase.delete(&view.result.id).await {
            Ok(()) => {
                self.state.set(ViewState::Loading);
                true
            }
            Err(e) => {
                tracing::warn!("[QuizResult] {}", e);
                self.state.set(ViewState::Error(e.to_string()));
                false
            }
        }
    }
}
