//! Quiz document mapping.

use chosung_core::error::Result;
use chosung_core::quiz::{Difficulty, Quiz};
use serde::{Deserialize, Serialize};

use super::{DocumentDto, collections};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDocument {
    pub chosung: String,
    pub answer: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
}

impl DocumentDto for QuizDocument {
    type Domain = Quiz;

    const COLLECTION: &'static str = collections::QUIZZES;

    fn from_domain(quiz: &Quiz) -> Self {
        Self {
            chosung: quiz.chosung.clone(),
            answer: quiz.answer.clone(),
            hint: quiz.hint.clone(),
            tags: quiz.tags.clone(),
            difficulty: quiz.difficulty,
        }
    }

    fn into_domain(self, id: String) -> Result<Quiz> {
        Ok(Quiz {
            id,
            chosung: self.chosung,
            answer: self.answer,
            hint: self.hint,
            tags: self.tags,
            difficulty: self.difficulty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentSnapshot;
    use crate::dto::{decode, encode};
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> DocumentSnapshot {
        DocumentSnapshot {
            id: "q-1".to_string(),
            data: value.as_object().cloned().unwrap(),
        }
    }

    #[test]
    fn test_encode_uses_camel_case_and_lowercase_enum() {
        let quiz = Quiz {
            id: "q-1".to_string(),
            chosung: "ㅅㄱ".to_string(),
            answer: "사과".to_string(),
            hint: "과일".to_string(),
            tags: vec![],
            difficulty: Difficulty::Hard,
        };
        let doc = encode::<QuizDocument>(&quiz, &quiz.id).unwrap();
        assert_eq!(doc["difficulty"], json!("hard"));
        assert!(!doc.contains_key("id"));
    }

    #[test]
    fn test_decode_applies_documented_defaults() {
        let quiz = decode::<QuizDocument>(snapshot(json!({
            "chosung": "ㅅㄱ",
            "answer": "사과",
            "difficulty": "easy"
        })))
        .unwrap();
        assert_eq!(quiz.id, "q-1");
        assert_eq!(quiz.hint, "");
        assert!(quiz.tags.is_empty());
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        let err = decode::<QuizDocument>(snapshot(json!({
            "chosung": "ㅅㄱ",
            "answer": 42,
            "difficulty": "easy"
        })))
        .unwrap_err();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("quizzes/q-1"));
    }

    #[test]
    fn test_decode_rejects_unknown_difficulty() {
        let err = decode::<QuizDocument>(snapshot(json!({
            "chosung": "ㅅㄱ",
            "answer": "사과",
            "difficulty": "impossible"
        })))
        .unwrap_err();
        assert!(err.is_serialization());
    }
}
