//! In-memory document store.
//!
//! Collections live in a `HashMap<String, BTreeMap<id, Document>>` behind a
//! `tokio::sync::RwLock`. Writes hold the write lock for their whole
//! read-modify-write, which makes `update_with` and `commit` atomic.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chosung_core::error::{ChosungError, Result};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{
    DOCUMENT_ID, Direction, Document, DocumentMutation, DocumentSnapshot, DocumentStore, Filter,
    FilterOp, IN_FILTER_LIMIT, Query, WriteBatch, WriteOp,
};

type Collection = BTreeMap<String, Document>;
type Store = HashMap<String, Collection>;

/// In-memory document store.
///
/// Data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<Store>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

fn document_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, id)
}

fn field_value(id: &str, data: &Document, field: &str) -> Option<Value> {
    if field == DOCUMENT_ID {
        Some(Value::String(id.to_string()))
    } else {
        data.get(field).cloned()
    }
}

fn matches_filter(id: &str, data: &Document, filter: &Filter) -> bool {
    let Some(value) = field_value(id, data, &filter.field) else {
        return false;
    };
    match filter.op {
        FilterOp::Eq => value == filter.value,
        FilterOp::In => filter
            .value
            .as_array()
            .is_some_and(|candidates| candidates.contains(&value)),
        FilterOp::ArrayContains => value
            .as_array()
            .is_some_and(|items| items.contains(&filter.value)),
    }
}

fn validate_filters(filters: &[Filter]) -> Result<()> {
    for filter in filters {
        if filter.op == FilterOp::In {
            let len = filter.value.as_array().map(Vec::len).ok_or_else(|| {
                ChosungError::data_access(format!(
                    "'in' filter on '{}' needs an array value",
                    filter.field
                ))
            })?;
            if len > IN_FILTER_LIMIT {
                return Err(ChosungError::data_access(format!(
                    "'in' filter on '{}' has {} values (limit {})",
                    filter.field, len, IN_FILTER_LIMIT
                )));
            }
        }
    }
    Ok(())
}

/// Type rank used when values of different JSON types are compared.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => {
                match (a.as_i64(), b.as_i64()) {
                    (Some(a), Some(b)) => a.cmp(&b),
                    _ => a
                        .as_f64()
                        .partial_cmp(&b.as_f64())
                        .unwrap_or(Ordering::Equal),
                }
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => type_rank(a).cmp(&type_rank(b)),
        },
    }
}

/// Sort key of a document: ordered field value, then id.
fn compare_keys(
    order_field: Option<&str>,
    (a_id, a_data): (&str, &Document),
    (b_id, b_data): (&str, &Document),
) -> Ordering {
    let by_field = match order_field {
        Some(field) => compare_values(
            field_value(a_id, a_data, field).as_ref(),
            field_value(b_id, b_data, field).as_ref(),
        ),
        None => Ordering::Equal,
    };
    by_field.then_with(|| a_id.cmp(b_id))
}

fn apply_patch(target: &mut Document, patch: Document) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<DocumentSnapshot>> {
        let store = self.collections.read().await;
        Ok(store
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| DocumentSnapshot {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn insert(&self, collection: &str, id: &str, data: Document) -> Result<()> {
        let mut store = self.collections.write().await;
        let docs = store.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Err(ChosungError::data_access(format!(
                "document already exists: {}",
                document_path(collection, id)
            )));
        }
        docs.insert(id.to_string(), data);
        Ok(())
    }

    async fn set(&self, collection: &str, id: &str, data: Document) -> Result<()> {
        let mut store = self.collections.write().await;
        store
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, patch: Document) -> Result<()> {
        let mut store = self.collections.write().await;
        let existing = store
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| ChosungError::not_found("document", document_path(collection, id)))?;
        apply_patch(existing, patch);
        Ok(())
    }

    async fn update_with(
        &self,
        collection: &str,
        id: &str,
        mutation: DocumentMutation,
    ) -> Result<Document> {
        let mut store = self.collections.write().await;
        let existing = store
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| ChosungError::not_found("document", document_path(collection, id)))?;

        // Mutate a copy so a failing closure leaves the stored document intact.
        let mut working = existing.clone();
        mutation(&mut working)?;
        *existing = working.clone();
        Ok(working)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut store = self.collections.write().await;
        if let Some(docs) = store.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<()> {
        let mut store = self.collections.write().await;
        for op in batch.into_ops() {
            match op {
                WriteOp::Set {
                    collection,
                    id,
                    data,
                } => {
                    store.entry(collection).or_default().insert(id, data);
                }
                WriteOp::Delete { collection, id } => {
                    if let Some(docs) = store.get_mut(&collection) {
                        docs.remove(&id);
                    }
                }
            }
        }
        Ok(())
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<DocumentSnapshot>> {
        validate_filters(&query.filters)?;

        let store = self.collections.read().await;
        let Some(docs) = store.get(collection) else {
            return match &query.start_after {
                Some(cursor) => Err(ChosungError::not_found(
                    "document",
                    document_path(collection, cursor),
                )),
                None => Ok(Vec::new()),
            };
        };

        let order_field = query.order_by.as_ref().map(|o| o.field.as_str());
        let descending = matches!(
            query.order_by.as_ref().map(|o| o.direction),
            Some(Direction::Descending)
        );
        let directed = |ordering: Ordering| {
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        };

        let mut matched: Vec<(&String, &Document)> = docs
            .iter()
            .filter(|(id, data)| query.filters.iter().all(|f| matches_filter(id, data, f)))
            .collect();
        matched.sort_by(|(a_id, a_data), (b_id, b_data)| {
            directed(compare_keys(
                order_field,
                (a_id.as_str(), *a_data),
                (b_id.as_str(), *b_data),
            ))
        });

        if let Some(cursor) = &query.start_after {
            let cursor_data = docs.get(cursor).ok_or_else(|| {
                ChosungError::not_found("document", document_path(collection, cursor))
            })?;
            matched.retain(|(id, data)| {
                directed(compare_keys(
                    order_field,
                    (id.as_str(), *data),
                    (cursor.as_str(), cursor_data),
                )) == Ordering::Greater
            });
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .take(limit)
            .map(|(id, data)| DocumentSnapshot {
                id: id.clone(),
                data: data.clone(),
            })
            .collect())
    }
}
