//! Quiz result domain module.
//!
//! # Module Structure
//!
//! - `model`: `QuizResult`, `ResultStatus`, `QuestionOutcome`
//! - `scoring`: answer comparison, score calculation and detail assembly
//! - `repository`: `QuizResultRepository` trait for persistence

mod model;
pub mod repository;
pub mod scoring;

pub use model::{QuestionOutcome, QuizResult, ResultStatus};
pub use repository::QuizResultRepository;
