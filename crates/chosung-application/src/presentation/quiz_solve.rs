//! Solving screen: shows prompts and submits answers for scoring.

use std::sync::Arc;

use chosung_core::error::ChosungError;
use chosung_core::quiz::QuizPrompt;

use super::{StateHolder, ViewState};
use crate::quiz_group_usecase::QuizGroupUseCase;
use crate::quiz_result_usecase::QuizResultUseCase;

/// Questions being solved. `result_id` is set once the answers are scored.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSolve {
    pub quiz_group_id: String,
    pub prompts: Vec<QuizPrompt>,
    pub result_id: Option<String>,
}

pub struct QuizSolveScreen {
    groups: Arc<QuizGroupUseCase>,
    results: Arc<QuizResultUseCase>,
    state: StateHolder<QuizSolve>,
}

impl QuizSolveScreen {
    pub fn new(groups: Arc<QuizGroupUseCase>, results: Arc<QuizResultUseCase>) -> Self {
        Self {
            groups,
            results,
            state: StateHolder::new("QuizSolve"),
        }
    }

    pub fn state(&self) -> &StateHolder<QuizSolve> {
        &self.state
    }

    pub async fn load(&self, quiz_group_id: &str) {
        self.state
            .run(async {
                let prompts = self.groups.prompts(quiz_group_id).await?;
                Ok(QuizSolve {
                    quiz_group_id: quiz_group_id.to_string(),
                    prompts,
                    result_id: None,
                })
            })
            .await;
    }

    /// Submits the answers for scoring and returns the stored result id.
    ///
    /// On failure the error is published and the prompts are lost; call
    /// `load` again to retry.
    pub async fn submit(&self, answers: Vec<String>) -> Option<String> {
        let ViewState::Success(solve) = self.state.current() else {
            self.state.publish(Err(ChosungError::validation("quiz is not loaded")));
            return None;
        };

        let result = self
            .results
            .submit(&solve.quiz_group_id, answers)
            .await
            .map(|result_id| QuizSolve {
                result_id: Some(result_id),
                ..solve
            });
        self.state.publish(result).and_then(|solve| solve.result_id)
    }
}
