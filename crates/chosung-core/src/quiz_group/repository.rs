//! Quiz group repository trait.

use async_trait::async_trait;

use super::model::{LikeToggle, QuizGroup, QuizGroupStatus};
use crate::error::Result;
use crate::paging::{Page, PageRequest};
use crate::quiz::Quiz;

/// Repository for quiz groups and the questions they own.
///
/// # Implementation Notes
///
/// - Group and question writes go through one atomic batch.
/// - `toggle_like` must run as a single atomic read-modify-write.
/// - Listings order by creation time (newest first) and break ties by id.
#[async_trait]
pub trait QuizGroupRepository: Send + Sync {
    /// Finds a quiz group by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(QuizGroup))`: Group found
    /// - `Ok(None)`: Group not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, group_id: &str) -> Result<Option<QuizGroup>>;

    /// Stores a new group together with its questions in one batch.
    async fn create_with_quizzes(&self, group: &QuizGroup, quizzes: &[Quiz]) -> Result<()>;

    /// Removes a group and all of its question documents in one batch.
    async fn delete_with_quizzes(&self, group: &QuizGroup) -> Result<()>;

    /// Groups authored by `user_id`, newest first.
    async fn list_by_user(&self, user_id: &str, page: &PageRequest) -> Result<Page<QuizGroup>>;

    /// Active groups of every author, newest first.
    async fn list_active(&self, page: &PageRequest) -> Result<Page<QuizGroup>>;

    /// Groups `user_id` has liked, newest first.
    async fn list_liked_by(&self, user_id: &str, page: &PageRequest) -> Result<Page<QuizGroup>>;

    /// Active groups with the most likes.
    async fn list_top_liked(&self, limit: usize) -> Result<Vec<QuizGroup>>;

    /// Flips `user_id`'s like atomically and returns the outcome and the
    /// updated group.
    async fn toggle_like(&self, group_id: &str, user_id: &str) -> Result<(LikeToggle, QuizGroup)>;

    async fn update_status(&self, group_id: &str, status: QuizGroupStatus) -> Result<()>;

    /// Bumps the finished-attempt counter by one.
    async fn increment_result_count(&self, group_id: &str) -> Result<()>;
}
