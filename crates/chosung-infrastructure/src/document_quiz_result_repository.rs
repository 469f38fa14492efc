//! DocumentStore-based QuizResultRepository implementation

use std::sync::Arc;

use async_trait::async_trait;
use chosung_core::error::Result;
use chosung_core::paging::{Page, PageRequest};
use chosung_core::quiz_result::{QuizResult, QuizResultRepository};

use crate::document::{Direction, DocumentStore, Filter, Query};
use crate::document_repository::DocumentRepository;
use crate::dto::QuizResultDocument;
use crate::dto::quiz_result::fields;

/// Result repository over the `quizResults` collection.
pub struct DocumentQuizResultRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentRepository for DocumentQuizResultRepository {
    type Dto = QuizResultDocument;

    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl DocumentQuizResultRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl QuizResultRepository for DocumentQuizResultRepository {
    async fn find_by_id(&self, result_id: &str) -> Result<Option<QuizResult>> {
        self.find_one(result_id).await
    }

    async fn create(&self, result: &QuizResult) -> Result<()> {
        self.insert_one(&result.id, result).await?;
        tracing::info!(
            result_id = %result.id,
            quiz_group_id = %result.quiz_group_id,
            score = result.score,
            "Quiz result saved"
        );
        Ok(())
    }

    async fn delete(&self, result_id: &str) -> Result<()> {
        self.delete_one(result_id).await?;
        tracing::info!(result_id, "Quiz result deleted");
        Ok(())
    }

    async fn list_by_user(&self, user_id: &str, page: &PageRequest) -> Result<Page<QuizResult>> {
        let query = Query::new()
            .filter(Filter::eq(fields::USER_ID, user_id))
            .order_by(fields::COMPLETED_AT, Direction::Descending);
        self.find_page(query, page, |r| r.id.as_str()).await
    }

    async fn list_by_quiz_group(&self, quiz_group_id: &str) -> Result<Vec<QuizResult>> {
        let query = Query::new()
            .filter(Filter::eq(fields::QUIZ_GROUP_ID, quiz_group_id))
            .order_by(fields::COMPLETED_AT, Direction::Ascending);
        self.find_all(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocumentStore;
    use chosung_core::quiz_result::ResultStatus;
    use chrono::Duration;

    fn create_test_repository() -> DocumentQuizResultRepository {
        DocumentQuizResultRepository::new(Arc::new(MemoryDocumentStore::new()))
    }

    fn result_at(user: &str, group: &str, score: u8, offset_secs: i64) -> QuizResult {
        let mut result = QuizResult::verified(user, group, score, vec!["사과".to_string()]);
        result.completed_at = result.completed_at + Duration::seconds(offset_secs);
        result
    }

    #[tokio::test]
    async fn test_create_find_delete() {
        let repo = create_test_repository();
        let result = result_at("u-1", "g-1", 80, 0);
        repo.create(&result).await.unwrap();

        let found = repo.find_by_id(&result.id).await.unwrap().unwrap();
        assert_eq!(found, result);
        assert_eq!(found.status, ResultStatus::Verified);

        repo.delete(&result.id).await.unwrap();
        assert!(repo.find_by_id(&result.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_user_most_recent_first() {
        let repo = create_test_repository();
        let older = result_at("u-1", "g-1", 50, 0);
        let newer = result_at("u-1", "g-2", 90, 10);
        let other = result_at("u-2", "g-1", 70, 5);
        for r in [&older, &newer, &other] {
            repo.create(r).await.unwrap();
        }

        let page = repo.list_by_user("u-1", &PageRequest::first(1)).await.unwrap();
        assert_eq!(page.items[0].id, newer.id);
        let rest = repo
            .list_by_user("u-1", &PageRequest::after(1, page.next_cursor.unwrap()))
            .await
            .unwrap();
        assert_eq!(rest.items.len(), 1);
        assert_eq!(rest.items[0].id, older.id);
    }

    #[tokio::test]
    async fn test_list_by_quiz_group() {
        let repo = create_test_repository();
        repo.create(&result_at("u-1", "g-1", 50, 0)).await.unwrap();
        repo.create(&result_at("u-2", "g-1", 60, 1)).await.unwrap();
        repo.create(&result_at("u-1", "g-2", 70, 2)).await.unwrap();

        let results = repo.list_by_quiz_group("g-1").await.unwrap();
        let scores: Vec<u8> = results.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![50, 60]);
    }
}
