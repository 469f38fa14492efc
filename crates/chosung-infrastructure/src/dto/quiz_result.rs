//! Quiz result document mapping.

use chosung_core::error::{ChosungError, Result};
use chosung_core::quiz_result::{QuizResult, ResultStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DocumentDto, collections};

pub mod fields {
    pub const USER_ID: &str = "userId";
    pub const QUIZ_GROUP_ID: &str = "quizGroupId";
    pub const COMPLETED_AT: &str = "completedAt";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultDocument {
    pub user_id: String,
    pub quiz_group_id: String,
    pub score: u8,
    pub answers: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub completed_at: DateTime<Utc>,
    pub status: ResultStatus,
}

impl DocumentDto for QuizResultDocument {
    type Domain = QuizResult;

    const COLLECTION: &'static str = collections::QUIZ_RESULTS;

    fn from_domain(result: &QuizResult) -> Self {
        Self {
            user_id: result.user_id.clone(),
            quiz_group_id: result.quiz_group_id.clone(),
            score: result.score,
            answers: result.answers.clone(),
            completed_at: result.completed_at,
            status: result.status,
        }
    }

    fn into_domain(self, id: String) -> Result<QuizResult> {
        if self.score > 100 {
            return Err(ChosungError::document(
                Self::COLLECTION,
                &id,
                format!("score {} is out of range 0..=100", self.score),
            ));
        }
        Ok(QuizResult {
            id,
            user_id: self.user_id,
            quiz_group_id: self.quiz_group_id,
            score: self.score,
            answers: self.answers,
            completed_at: self.completed_at,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentSnapshot;
    use crate::dto::decode;
    use serde_json::json;

    fn snapshot(score: i64) -> DocumentSnapshot {
        DocumentSnapshot {
            id: "r-1".to_string(),
            data: json!({
                "userId": "u-1",
                "quizGroupId": "g-1",
                "score": score,
                "answers": ["사과"],
                "completedAt": 1_700_000_000_000_i64,
                "status": "verified"
            })
            .as_object()
            .cloned()
            .unwrap(),
        }
    }

    #[test]
    fn test_decode_result() {
        let result = decode::<QuizResultDocument>(snapshot(80)).unwrap();
        assert_eq!(result.score, 80);
        assert_eq!(result.status, ResultStatus::Verified);
    }

    #[test]
    fn test_decode_rejects_out_of_range_score() {
        assert!(decode::<QuizResultDocument>(snapshot(101)).is_err());
        assert!(decode::<QuizResultDocument>(snapshot(300)).is_err());
    }
}
