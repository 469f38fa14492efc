//! Quiz result domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

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
pub enum ResultStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

/// One finished attempt at a quiz group.
///
/// The score is derived from `answers` when the result is created and is
/// never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub quiz_group_id: String,
    /// Percentage of correct answers, 0..=100.
    pub score: u8,
    /// Answers in the group's question order.
    pub answers: Vec<String>,
    pub completed_at: DateTime<Utc>,
    pub status: ResultStatus,
}

impl QuizResult {
    /// Creates a verified result stamped with the current time.
    pub fn verified(
        user_id: impl Into<String>,
        quiz_group_id: impl Into<String>,
        score: u8,
        answers: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            quiz_group_id: quiz_group_id.into(),
            score,
            answers,
            completed_at: crate::time::now(),
            status: ResultStatus::Verified,
        }
    }
}

/// Per-question breakdown of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub quiz_id: String,
    pub chosung: String,
    pub correct_answer: String,
    pub user_answer: String,
    pub hint: String,
    pub is_correct: bool,
}
