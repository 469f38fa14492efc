//! Quiz domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::chosung;
use crate::error::{ChosungError, Result};

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
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// One initial-consonant question.
///
/// Quizzes are immutable once stored; there is no update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    /// The consonant prompt shown to the player, e.g. "ㅅㄱ".
    pub chosung: String,
    pub answer: String,
    pub hint: String,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
}

impl Quiz {
    /// Case-insensitive comparison against this quiz's answer, ignoring
    /// surrounding whitespace.
    pub fn is_answered_by(&self, given: &str) -> bool {
        self.answer.trim().to_lowercase() == given.trim().to_lowercase()
    }

    /// The player-facing part of the question, without the answer.
    pub fn prompt(&self) -> QuizPrompt {
        QuizPrompt {
            quiz_id: self.id.clone(),
            chosung: self.chosung.clone(),
            hint: self.hint.clone(),
            difficulty: self.difficulty,
        }
    }
}

/// What a player sees while solving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPrompt {
    pub quiz_id: String,
    pub chosung: String,
    pub hint: String,
    pub difficulty: Difficulty,
}

/// Author input for one question of a new quiz group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub answer: String,
    #[serde(default)]
    pub hint: String,
    /// Explicit prompt; derived from `answer` when absent.
    #[serde(default)]
    pub chosung: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl QuizDraft {
    pub fn new(answer: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            hint: hint.into(),
            ..Self::default()
        }
    }

    /// Validates the draft and turns it into a quiz with a fresh id.
    pub fn into_quiz(self) -> Result<Quiz> {
        let answer = self.answer.trim().to_string();
        if answer.is_empty() {
            return Err(ChosungError::validation("quiz answer must not be empty"));
        }
        let chosung = match self.chosung {
            Some(prompt) if !prompt.trim().is_empty() => prompt.trim().to_string(),
            _ => chosung::extract(&answer),
        };
        Ok(Quiz {
            id: Uuid::new_v4().to_string(),
            chosung,
            answer,
            hint: self.hint,
            tags: self.tags,
            difficulty: self.difficulty,
        })
    }
}
