//! Quiz group domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::error::{ChosungError, Result};
use crate::quiz::{Quiz, QuizDraft};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuizGroupStatus {
    #[default]
    Active,
    Reported,
    Deleted,
}

/// A named, ordered collection of questions authored by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizGroup {
    pub id: String,
    /// Owner (author) user id.
    pub user_id: String,
    pub title: String,
    pub description: String,
    /// Question ids in play order.
    pub quiz_ids: Vec<String>,
    pub tags: Vec<String>,
    pub like_count: u32,
    pub liked_user_ids: Vec<String>,
    pub status: QuizGroupStatus,
    pub result_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Liked,
    Unliked,
}

impl QuizGroup {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_user_ids.iter().any(|id| id == user_id)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn question_count(&self) -> usize {
        self.quiz_ids.len()
    }

    /// Flips `user_id`'s like.
    ///
    /// `like_count` is rewritten from the list length, so a drifted count is
    /// repaired by the next toggle.
    pub fn toggle_like(&mut self, user_id: &str) -> LikeToggle {
        let outcome = if let Some(pos) = self.liked_user_ids.iter().position(|id| id == user_id) {
            self.liked_user_ids.remove(pos);
            LikeToggle::Unliked
        } else {
            self.liked_user_ids.push(user_id.to_string());
            LikeToggle::Liked
        };
        self.like_count = self.liked_user_ids.len() as u32;
        outcome
    }
}

/// Author input for a new quiz group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizGroupDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub questions: Vec<QuizDraft>,
}

impl QuizGroupDraft {
    /// Validates the draft and builds the group plus its questions.
    ///
    /// The group's `quiz_ids` follow the order of `questions`.
    pub fn build(self, owner_id: &str) -> Result<(QuizGroup, Vec<Quiz>)> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ChosungError::validation("quiz group title must not be empty"));
        }
        if self.questions.is_empty() {
            return Err(ChosungError::validation(
                "quiz group needs at least one question",
            ));
        }

        let quizzes = self
            .questions
            .into_iter()
            .map(QuizDraft::into_quiz)
            .collect::<Result<Vec<_>>>()?;

        let now = crate::time::now();
        let group = QuizGroup {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            title,
            description: self.description,
            quiz_ids: quizzes.iter().map(|q| q.id.clone()).collect(),
            tags: self.tags,
            like_count: 0,
            liked_user_ids: Vec::new(),
            status: QuizGroupStatus::Active,
            result_count: 0,
            created_at: now,
            updated_at: now,
        };
        Ok((group, quizzes))
    }
}
