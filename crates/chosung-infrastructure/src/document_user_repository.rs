//! DocumentStore-based UserRepository implementation

use std::sync::Arc;

use async_trait::async_trait;
use chosung_core::error::{ChosungError, Result};
use chosung_core::user::{Medal, User, UserRepository};
use serde_json::Value;

use crate::document::{Direction, Document, DocumentStore, Filter, Query};
use crate::document_repository::{DocumentRepository, timestamp_value};
use crate::dto::UserDocument;
use crate::dto::user::fields;

/// User repository over the `users` collection.
///
/// Medals are embedded in the user document, so awarding one is a single
/// atomic update.
pub struct DocumentUserRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentRepository for DocumentUserRepository {
    type Dto = UserDocument;

    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl DocumentUserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for DocumentUserRepository {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        self.find_one(user_id).await
    }

    async fn find_by_social_id(&self, social_id: &str) -> Result<Option<User>> {
        let query = Query::new()
            .filter(Filter::eq(fields::SOCIAL_ID, social_id))
            .limit(1);
        let mut users = self.find_all(&query).await?;
        Ok(users.pop())
    }

    async fn create(&self, user: &User) -> Result<()> {
        self.insert_one(&user.id, user).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(())
    }

    async fn update_nickname(&self, user_id: &str, nickname: &str) -> Result<()> {
        let mut patch = Document::new();
        patch.insert(fields::NICKNAME.to_string(), Value::from(nickname));
        patch.insert(
            fields::UPDATED_AT.to_string(),
            timestamp_value(chosung_core::time::now()),
        );
        self.patch_one(user_id, patch).await.map_err(|e| {
            if e.is_not_found() {
                ChosungError::not_found("User", user_id)
            } else {
                e
            }
        })
    }

    async fn add_points(&self, user_id: &str, delta: u64) -> Result<u64> {
        let user = self
            .update_domain(user_id, move |user| {
                user.points = user.points.saturating_add(delta);
                user.updated_at = chosung_core::time::now();
                Ok(())
            })
            .await?;
        tracing::debug!(user_id, delta, total = user.points, "Points added");
        Ok(user.points)
    }

    async fn add_medal(&self, user_id: &str, medal: &Medal) -> Result<()> {
        let medal = medal.clone();
        let medal_type = medal.medal_type;
        self.update_domain(user_id, move |user| {
            user.medals.push(medal);
            user.updated_at = chosung_core::time::now();
            Ok(())
        })
        .await?;
        tracing::info!(user_id, medal = %medal_type, "Medal awarded");
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        self.delete_one(user_id).await
    }

    async fn list_top_by_points(&self, limit: usize) -> Result<Vec<User>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let query = Query::new()
            .order_by(fields::POINTS, Direction::Descending)
            .limit(limit);
        self.find_all(&query).await
    }
}
