//! Shared plumbing for repositories backed by a `DocumentStore`.

use std::sync::Arc;

use async_trait::async_trait;
use chosung_core::error::{ChosungError, Result};
use chosung_core::paging::{Page, PageRequest};
use serde_json::Value;

use crate::document::{Document, DocumentMutation, DocumentStore, Query};
use crate::dto::{DocumentDto, decode, decode_all, decode_fields, encode};

/// Common trait for repositories that persist one DTO type.
///
/// Implementors only hand out their store; reads and writes of the
/// repository's own collection go through the provided methods.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    type Dto: DocumentDto<Domain: Send + Sync> + 'static;

    /// Returns the underlying store
    fn store(&self) -> &Arc<dyn DocumentStore>;

    fn collection(&self) -> &'static str {
        <Self::Dto as DocumentDto>::COLLECTION
    }

    /// Loads and decodes one document.
    async fn find_one(&self, id: &str) -> Result<Option<<Self::Dto as DocumentDto>::Domain>> {
        match self.store().get(self.collection(), id).await? {
            Some(snapshot) => decode::<Self::Dto>(snapshot).map(Some),
            None => Ok(None),
        }
    }

    /// Inserts a new document built from `domain`. Fails if `id` exists.
    async fn insert_one(&self, id: &str, domain: &<Self::Dto as DocumentDto>::Domain) -> Result<()> {
        let data = encode::<Self::Dto>(domain, id)?;
        self.store().insert(self.collection(), id, data).await
    }

    /// Runs a query and decodes every result.
    async fn find_all(&self, query: &Query) -> Result<Vec<<Self::Dto as DocumentDto>::Domain>> {
        let snapshots = self.store().query(self.collection(), query).await?;
        decode_all::<Self::Dto>(snapshots)
    }

    /// Runs `query` bounded by `page` and wraps the result as a `Page`.
    async fn find_page<F>(
        &self,
        query: Query,
        page: &PageRequest,
        id_of: F,
    ) -> Result<Page<<Self::Dto as DocumentDto>::Domain>>
    where
        F: Fn(&<Self::Dto as DocumentDto>::Domain) -> &str + Send,
    {
        if page.limit == 0 {
            return Ok(Page::empty());
        }
        let query = query.limit(page.limit).start_after(page.after.clone());
        let items = self.find_all(&query).await?;
        Ok(Page::from_items(items, page.limit, id_of))
    }

    /// Atomically edits the decoded domain model and returns the stored
    /// result.
    ///
    /// Any decode error or error from `f` aborts the write.
    async fn update_domain<F>(&self, id: &str, f: F) -> Result<<Self::Dto as DocumentDto>::Domain>
    where
        F: FnOnce(&mut <Self::Dto as DocumentDto>::Domain) -> Result<()> + Send + 'static,
    {
        let mutation = mutate_domain::<Self::Dto, F>(id, f);
        let data = self
            .store()
            .update_with(self.collection(), id, mutation)
            .await?;
        decode_fields::<Self::Dto>(id, data)
    }

    /// Applies a partial field update. Fails if the document is missing.
    async fn patch_one(&self, id: &str, patch: Document) -> Result<()> {
        self.store().update(self.collection(), id, patch).await
    }

    async fn delete_one(&self, id: &str) -> Result<()> {
        self.store().delete(self.collection(), id).await
    }
}

/// Builds an `update_with` mutation that edits the decoded domain model.
fn mutate_domain<D, F>(id: &str, f: F) -> DocumentMutation
where
    D: DocumentDto + 'static,
    F: FnOnce(&mut D::Domain) -> Result<()> + Send + 'static,
{
    let id = id.to_string();
    Box::new(move |data: &mut Document| -> Result<()> {
        let dto: D = serde_json::from_value(Value::Object(data.clone()))
            .map_err(|e| ChosungError::document(D::COLLECTION, &id, e))?;
        let mut domain = dto.into_domain(id.clone())?;
        f(&mut domain)?;
        *data = encode::<D>(&domain, &id)?;
        Ok(())
    })
}

/// Field patch holding a millisecond timestamp.
pub fn timestamp_value(at: chrono::DateTime<chrono::Utc>) -> Value {
    Value::from(at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocumentStore;
    use crate::dto::UserDocument;
    use chosung_core::user::User;

    struct Users {
        store: Arc<dyn DocumentStore>,
    }

    impl DocumentRepository for Users {
        type Dto = UserDocument;

        fn store(&self) -> &Arc<dyn DocumentStore> {
            &self.store
        }
    }

    fn users() -> Users {
        Users {
            store: Arc::new(MemoryDocumentStore::new()),
        }
    }

    #[tokio::test]
    async fn test_provided_methods_use_the_store() {
        let repo = users();
        assert_eq!(repo.collection(), "users");

        let user = User::new("social-1", "철수");
        repo.insert_one(&user.id, &user).await.unwrap();
        assert!(repo.insert_one(&user.id, &user).await.is_err());
        assert_eq!(repo.find_one(&user.id).await.unwrap(), Some(user.clone()));

        let updated = repo
            .update_domain(&user.id, |u| {
                u.points += 5;
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(updated.points, 5);
        assert_eq!(repo.find_one(&user.id).await.unwrap().unwrap().points, 5);

        repo.delete_one(&user.id).await.unwrap();
        assert!(repo.find_one(&user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_update_domain_leaves_document() {
        let repo = users();
        let user = User::new("social-1", "철수");
        repo.insert_one(&user.id, &user).await.unwrap();

        let err = repo
            .update_domain(&user.id, |u| {
                u.points = 99;
                Err(ChosungError::validation("rejected"))
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.find_one(&user.id).await.unwrap().unwrap().points, 0);
    }

    #[tokio::test]
    async fn test_find_page_with_zero_limit_is_empty() {
        let repo = users();
        let user = User::new("social-1", "철수");
        repo.insert_one(&user.id, &user).await.unwrap();

        let page = repo
            .find_page(Query::new(), &PageRequest::first(0), |u| u.id.as_str())
            .await
            .unwrap();
        assert!(page.items.is_empty());

        let page = repo
            .find_page(Query::new(), &PageRequest::first(10), |u| u.id.as_str())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.next_cursor.is_none());
    }
}
