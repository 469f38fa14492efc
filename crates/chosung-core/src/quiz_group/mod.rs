//! Quiz group domain module.
//!
//! A quiz group is the unit players browse, like and solve. It owns an
//! ordered list of question ids; the questions live in their own collection.

mod model;
pub mod repository;

pub use model::{LikeToggle, QuizGroup, QuizGroupDraft, QuizGroupStatus};
pub use repository::QuizGroupRepository;
