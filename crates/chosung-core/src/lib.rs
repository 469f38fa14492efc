//! Domain layer for ChosungMarket.
//!
//! Models, repository traits, scoring rules and the boundary traits the
//! infrastructure layer implements.

pub mod auth;
pub mod chosung;
pub mod config;
pub mod error;
pub mod paging;
pub mod preference;
pub mod quiz;
pub mod quiz_group;
pub mod quiz_result;
pub mod session;
pub mod time;
pub mod user;

// Re-export common error type
pub use error::ChosungError;
pub use paging::{Page, PageRequest};
pub use session::Session;
