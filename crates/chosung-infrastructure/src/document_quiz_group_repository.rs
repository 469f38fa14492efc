//! DocumentStore-based QuizGroupRepository implementation

use std::sync::Arc;

use async_trait::async_trait;
use chosung_core::error::{ChosungError, Result};
use chosung_core::paging::{Page, PageRequest};
use chosung_core::quiz::Quiz;
use chosung_core::quiz_group::{LikeToggle, QuizGroup, QuizGroupRepository, QuizGroupStatus};
use serde_json::Value;

use crate::document::{Direction, Document, DocumentStore, Filter, Query, WriteBatch};
use crate::document_repository::{DocumentRepository, timestamp_value};
use crate::dto::quiz_group::fields;
use crate::dto::{DocumentDto, QuizDocument, QuizGroupDocument, encode};

/// Quiz group repository over the `quizGroups` collection.
///
/// Questions live in their own `quizzes` collection; every write that
/// touches both goes through one `WriteBatch`.
pub struct DocumentQuizGroupRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentRepository for DocumentQuizGroupRepository {
    type Dto = QuizGroupDocument;

    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl DocumentQuizGroupRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn newest_first() -> Query {
        Query::new().order_by(fields::CREATED_AT, Direction::Descending)
    }

    async fn page(&self, query: Query, page: &PageRequest) -> Result<Page<QuizGroup>> {
        self.find_page(query, page, |g| g.id.as_str()).await
    }

    fn map_missing(group_id: &str) -> impl FnOnce(ChosungError) -> ChosungError + '_ {
        move |e| {
            if e.is_not_found() {
                ChosungError::not_found("QuizGroup", group_id)
            } else {
                e
            }
        }
    }
}

#[async_trait]
impl QuizGroupRepository for DocumentQuizGroupRepository {
    async fn find_by_id(&self, group_id: &str) -> Result<Option<QuizGroup>> {
        self.find_one(group_id).await
    }

    async fn create_with_quizzes(&self, group: &QuizGroup, quizzes: &[Quiz]) -> Result<()> {
        let mut batch = WriteBatch::new();
        for quiz in quizzes {
            batch.set(
                QuizDocument::COLLECTION,
                &quiz.id,
                encode::<QuizDocument>(quiz, &quiz.id)?,
            );
        }
        batch.set(
            self.collection(),
            &group.id,
            encode::<QuizGroupDocument>(group, &group.id)?,
        );
        self.store.commit(batch).await?;
        tracing::info!(
            group_id = %group.id,
            questions = quizzes.len(),
            "Quiz group created"
        );
        Ok(())
    }

    async fn delete_with_quizzes(&self, group: &QuizGroup) -> Result<()> {
        let mut batch = WriteBatch::new();
        for quiz_id in &group.quiz_ids {
            batch.delete(QuizDocument::COLLECTION, quiz_id);
        }
        batch.delete(self.collection(), &group.id);
        self.store.commit(batch).await?;
        tracing::info!(group_id = %group.id, "Quiz group deleted");
        Ok(())
    }

    async fn list_by_user(&self, user_id: &str, page: &PageRequest) -> Result<Page<QuizGroup>> {
        let query = Self::newest_first().filter(Filter::eq(fields::USER_ID, user_id));
        self.page(query, page).await
    }

    async fn list_active(&self, page: &PageRequest) -> Result<Page<QuizGroup>> {
        let query = Self::newest_first().filter(Filter::eq(
            fields::STATUS,
            QuizGroupStatus::Active.as_ref(),
        ));
        self.page(query, page).await
    }

    async fn list_liked_by(&self, user_id: &str, page: &PageRequest) -> Result<Page<QuizGroup>> {
        let query =
            Self::newest_first().filter(Filter::array_contains(fields::LIKED_USER_IDS, user_id));
        self.page(query, page).await
    }

    async fn list_top_liked(&self, limit: usize) -> Result<Vec<QuizGroup>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let query = Query::new()
            .filter(Filter::eq(
                fields::STATUS,
                QuizGroupStatus::Active.as_ref(),
            ))
            .order_by(fields::LIKE_COUNT, Direction::Descending)
            .limit(limit);
        self.find_all(&query).await
    }

    async fn toggle_like(&self, group_id: &str, user_id: &str) -> Result<(LikeToggle, QuizGroup)> {
        let liker = user_id.to_string();
        let group = self
            .update_domain(group_id, move |group| {
                group.toggle_like(&liker);
                group.updated_at = chosung_core::time::now();
                Ok(())
            })
            .await
            .map_err(Self::map_missing(group_id))?;

        let outcome = if group.is_liked_by(user_id) {
            LikeToggle::Liked
        } else {
            LikeToggle::Unliked
        };
        tracing::info!(
            group_id,
            user_id,
            like_count = group.like_count,
            outcome = ?outcome,
            "Like toggled"
        );
        Ok((outcome, group))
    }

    async fn update_status(&self, group_id: &str, status: QuizGroupStatus) -> Result<()> {
        let mut patch = Document::new();
        patch.insert(fields::STATUS.to_string(), Value::from(status.as_ref()));
        patch.insert(
            fields::UPDATED_AT.to_string(),
            timestamp_value(chosung_core::time::now()),
        );
        self.patch_one(group_id, patch)
            .await
            .map_err(Self::map_missing(group_id))?;
        tracing::info!(group_id, status = %status, "Quiz group status updated");
        Ok(())
    }

    async fn increment_result_count(&self, group_id: &str) -> Result<()> {
        self.update_domain(group_id, |group| {
            group.result_count = group.result_count.saturating_add(1);
            Ok(())
        })
        .await
        .map_err(Self::map_missing(group_id))?;
        tracing::debug!(group_id, "Result count incremented");
        Ok(())
    }
}
