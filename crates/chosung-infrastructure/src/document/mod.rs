//! Document store abstraction.
//!
//! Models the subset of a managed document database the repositories use:
//! loosely-typed JSON documents grouped in collections, point reads and
//! writes, partial updates, atomic batches and simple queries with cursor
//! pagination. Schema is enforced by the `dto` mappers, not here.

mod memory;

pub use memory::MemoryDocumentStore;

use async_trait::async_trait;
use chosung_core::error::Result;
use serde_json::Value;

/// Field map of one stored document. The document id is not part of it.
pub type Document = serde_json::Map<String, Value>;

/// Pseudo field name that addresses the document id in filters.
pub const DOCUMENT_ID: &str = "__name__";

/// Maximum number of values in one `in` filter.
pub const IN_FILTER_LIMIT: usize = 30;

/// A document together with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub id: String,
    pub data: Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Field equals the value.
    Eq,
    /// Field equals one of the values (value must be an array).
    In,
    /// Field is an array that contains the value.
    ArrayContains,
}

/// A single WHERE condition. All filters of a query are AND-ed.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    /// Simple equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn is_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::In,
            value: Value::Array(values),
        }
    }

    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::ArrayContains,
            value: value.into(),
        }
    }

    /// Matches documents whose id is one of `ids`.
    pub fn id_in<S: AsRef<str>>(ids: &[S]) -> Self {
        Self::is_in(
            DOCUMENT_ID,
            ids.iter()
                .map(|id| Value::String(id.as_ref().to_string()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Query parameters for `DocumentStore::query`.
///
/// Results are ordered by `order_by` and then by document id in the same
/// direction, so cursors never skip or repeat documents with equal keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
    /// Id of the document the result should start after.
    pub start_after: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn start_after(mut self, cursor: Option<String>) -> Self {
        self.start_after = cursor;
        self
    }
}

/// One write inside a `WriteBatch`.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Set {
        collection: String,
        id: String,
        data: Document,
    },
    Delete {
        collection: String,
        id: String,
    },
}

/// A group of writes applied all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, collection: &str, id: &str, data: Document) -> &mut Self {
        self.ops.push(WriteOp::Set {
            collection: collection.to_string(),
            id: id.to_string(),
            data,
        });
        self
    }

    pub fn delete(&mut self, collection: &str, id: &str) -> &mut Self {
        self.ops.push(WriteOp::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Closure applied by `DocumentStore::update_with`.
pub type DocumentMutation = Box<dyn FnOnce(&mut Document) -> Result<()> + Send>;

/// A document database client.
///
/// Implementations handle their own connection management and must be
/// safe to share between tasks.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads one document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(snapshot))`: Document found
    /// - `Ok(None)`: No document with that id
    /// - `Err(_)`: Store failure
    async fn get(&self, collection: &str, id: &str) -> Result<Option<DocumentSnapshot>>;

    /// Creates a document. Fails if the id already exists.
    async fn insert(&self, collection: &str, id: &str, data: Document) -> Result<()>;

    /// Creates or replaces a document.
    async fn set(&self, collection: &str, id: &str, data: Document) -> Result<()>;

    /// Overwrites the given top-level fields. Fails with `NotFound` if the
    /// document does not exist.
    async fn update(&self, collection: &str, id: &str, patch: Document) -> Result<()>;

    /// Atomically reads, mutates and writes back one document, returning the
    /// stored result. An error from `mutation` aborts without writing.
    async fn update_with(
        &self,
        collection: &str,
        id: &str,
        mutation: DocumentMutation,
    ) -> Result<Document>;

    /// Removes a document. Deleting a missing document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Applies every write of the batch or none of them.
    async fn commit(&self, batch: WriteBatch) -> Result<()>;

    /// Runs a query against one collection.
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<DocumentSnapshot>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_builder() {
        let query = Query::new()
            .filter(Filter::eq("userId", "u-1"))
            .order_by("createdAt", Direction::Descending)
            .limit(10)
            .start_after(Some("g-9".to_string()));

        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters[0].value, json!("u-1"));
        assert_eq!(query.order_by.unwrap().direction, Direction::Descending);
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.start_after.as_deref(), Some("g-9"));
    }

    #[test]
    fn test_id_in_filter() {
        let filter = Filter::id_in(&["a", "b"]);
        assert_eq!(filter.field, DOCUMENT_ID);
        assert_eq!(filter.op, FilterOp::In);
        assert_eq!(filter.value, json!(["a", "b"]));
    }

    #[test]
    fn test_write_batch_collects_ops() {
        let mut batch = WriteBatch::new();
        batch
            .set("quizzes", "q-1", Document::new())
            .delete("quizGroups", "g-1");
        assert_eq!(batch.len(), 2);
        assert!(matches!(batch.into_ops()[1], WriteOp::Delete { .. }));
    }
}
