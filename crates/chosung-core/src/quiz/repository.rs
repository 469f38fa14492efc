//! Quiz repository trait.

use async_trait::async_trait;

use super::model::Quiz;
use crate::error::Result;

/// Read access to stored questions.
///
/// Questions are written together with their group (see
/// `QuizGroupRepository::create_with_quizzes`), so this trait only reads.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, quiz_id: &str) -> Result<Option<Quiz>>;

    /// Loads the given questions in the order of `quiz_ids`.
    ///
    /// Fails with `NotFound` if any id has no document.
    async fn find_by_ids(&self, quiz_ids: &[String]) -> Result<Vec<Quiz>>;
}
