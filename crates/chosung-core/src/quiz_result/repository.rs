//! Quiz result repository trait.

use async_trait::async_trait;

use super::model::QuizResult;
use crate::error::Result;
use crate::paging::{Page, PageRequest};

/// Repository for quiz result persistence.
#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    /// Finds a result by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(QuizResult))`: Result found
    /// - `Ok(None)`: Result not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, result_id: &str) -> Result<Option<QuizResult>>;

    /// Inserts a new result. Fails if the id is already taken.
    async fn create(&self, result: &QuizResult) -> Result<()>;

    /// Deletes a result (no error if it was already gone).
    async fn delete(&self, result_id: &str) -> Result<()>;

    /// A user's results, most recently completed first.
    async fn list_by_user(&self, user_id: &str, page: &PageRequest) -> Result<Page<QuizResult>>;

    /// Every result recorded for a quiz group.
    async fn list_by_quiz_group(&self, quiz_group_id: &str) -> Result<Vec<QuizResult>>;
}
