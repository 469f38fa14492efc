//! Quiz (single question) domain module.

mod model;
pub mod repository;

pub use model::{Difficulty, Quiz, QuizDraft, QuizPrompt};
pub use repository::QuizRepository;
