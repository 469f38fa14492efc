//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: `User`, `Medal` and `MedalType`
//! - `repository`: `UserRepository` trait for persistence

mod model;
pub mod repository;

// Re-export public API
pub use model::{Medal, MedalType, User};
pub use repository::UserRepository;
