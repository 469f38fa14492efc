//! Quiz group document mapping.

use chosung_core::error::Result;
use chosung_core::quiz_group::{QuizGroup, QuizGroupStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DocumentDto, collections};

/// Stored field names used by queries and patches.
pub mod fields {
    pub const USER_ID: &str = "userId";
    pub const LIKE_COUNT: &str = "likeCount";
    pub const LIKED_USER_IDS: &str = "likedUserIds";
    pub const STATUS: &str = "status";
    pub const RESULT_COUNT: &str = "resultCount";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGroupDocument {
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub quiz_ids: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub liked_user_ids: Vec<String>,
    #[serde(default)]
    pub status: QuizGroupStatus,
    #[serde(default)]
    pub result_count: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl DocumentDto for QuizGroupDocument {
    type Domain = QuizGroup;

    const COLLECTION: &'static str = collections::QUIZ_GROUPS;

    fn from_domain(group: &QuizGroup) -> Self {
        Self {
            user_id: group.user_id.clone(),
            title: group.title.clone(),
            description: group.description.clone(),
            quiz_ids: group.quiz_ids.clone(),
            tags: group.tags.clone(),
            like_count: group.like_count,
            liked_user_ids: group.liked_user_ids.clone(),
            status: group.status,
            result_count: group.result_count,
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }

    fn into_domain(self, id: String) -> Result<QuizGroup> {
        Ok(QuizGroup {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            quiz_ids: self.quiz_ids,
            tags: self.tags,
            like_count: self.like_count,
            liked_user_ids: self.liked_user_ids,
            status: self.status,
            result_count: self.result_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
