//! DocumentStore-based QuizRepository implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chosung_core::error::{ChosungError, Result};
use chosung_core::quiz::{Quiz, QuizRepository};

use crate::document::{DocumentStore, Filter, IN_FILTER_LIMIT, Query};
use crate::document_repository::DocumentRepository;
use crate::dto::QuizDocument;

/// Question repository over the `quizzes` collection.
pub struct DocumentQuizRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentRepository for DocumentQuizRepository {
    type Dto = QuizDocument;

    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl DocumentQuizRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl QuizRepository for DocumentQuizRepository {
    async fn find_by_id(&self, quiz_id: &str) -> Result<Option<Quiz>> {
        self.find_one(quiz_id).await
    }

    async fn find_by_ids(&self, quiz_ids: &[String]) -> Result<Vec<Quiz>> {
        // `in` filters are capped, so large groups are fetched in chunks
        let mut found: HashMap<String, Quiz> = HashMap::with_capacity(quiz_ids.len());
        for chunk in quiz_ids.chunks(IN_FILTER_LIMIT) {
            let query = Query::new().filter(Filter::id_in(chunk));
            for quiz in self.find_all(&query).await? {
                found.insert(quiz.id.clone(), quiz);
            }
        }
        tracing::debug!(
            requested = quiz_ids.len(),
            found = found.len(),
            "Loaded quizzes"
        );

        quiz_ids
            .iter()
            .map(|id| {
                found
                    .get(id)
                    .cloned()
                    .ok_or_else(|| ChosungError::not_found("Quiz", id))
            })
            .collect()
    }
}
