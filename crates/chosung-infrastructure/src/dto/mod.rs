//! Document DTOs and the strict mapping boundary.
//!
//! Each collection has one DTO type. Loading deserializes the raw field map
//! with serde: a missing required field or a wrong type is an error naming
//! the document, never a silent default. The only defaults are the ones
//! declared with `#[serde(default)]` on the DTO fields.

pub mod quiz;
pub mod quiz_group;
pub mod quiz_result;
pub mod user;

pub use quiz::QuizDocument;
pub use quiz_group::QuizGroupDocument;
pub use quiz_result::QuizResultDocument;
pub use user::{MedalDocument, UserDocument};

use chosung_core::error::{ChosungError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::document::{Document, DocumentSnapshot};

/// Collection names.
pub mod collections {
    pub const USERS: &str = "users";
    pub const QUIZ_GROUPS: &str = "quizGroups";
    pub const QUIZZES: &str = "quizzes";
    pub const QUIZ_RESULTS: &str = "quizResults";
}

/// Mapping between a domain model and its stored document.
///
/// The document id is kept outside the field map, so it is passed in
/// separately when converting to the domain model.
pub trait DocumentDto: Serialize + DeserializeOwned {
    type Domain;

    const COLLECTION: &'static str;

    fn from_domain(domain: &Self::Domain) -> Self;

    fn into_domain(self, id: String) -> Result<Self::Domain>;
}

/// Serializes a domain model into a field map.
pub fn encode<D: DocumentDto>(domain: &D::Domain, id: &str) -> Result<Document> {
    match serde_json::to_value(D::from_domain(domain))? {
        Value::Object(map) => Ok(map),
        other => Err(ChosungError::document(
            D::COLLECTION,
            id,
            format!("expected an object, got {}", other),
        )),
    }
}

/// Deserializes a stored document into its domain model.
pub fn decode<D: DocumentDto>(snapshot: DocumentSnapshot) -> Result<D::Domain> {
    let DocumentSnapshot { id, data } = snapshot;
    let dto: D = serde_json::from_value(Value::Object(data))
        .map_err(|e| ChosungError::document(D::COLLECTION, &id, e))?;
    dto.into_domain(id)
}

/// Deserializes a field map returned by `DocumentStore::update_with`.
pub fn decode_fields<D: DocumentDto>(id: &str, data: Document) -> Result<D::Domain> {
    decode::<D>(DocumentSnapshot {
        id: id.to_string(),
        data,
    })
}

/// Deserializes every snapshot, failing on the first bad document.
pub fn decode_all<D: DocumentDto>(snapshots: Vec<DocumentSnapshot>) -> Result<Vec<D::Domain>> {
    snapshots.into_iter().map(decode::<D>).collect()
}
