//! Application layer for ChosungMarket.
//!
//! Use cases coordinate the domain traits from `chosung-core` with the
//! storage adapters from `chosung-infrastructure`. The `presentation`
//! module turns their results into per-screen view state, and
//! [`bootstrap::AppContext`] wires everything together.

pub mod auth_usecase;
pub mod bootstrap;
pub mod hall_of_fame_service;
pub mod logging;
pub mod presentation;
pub mod quiz_group_usecase;
pub mod quiz_result_usecase;

#[cfg(test)]
mod testing;

pub use auth_usecase::AuthUseCase;
pub use bootstrap::AppContext;
pub use hall_of_fame_service::{AwardedMedal, HallOfFameService};
pub use quiz_group_usecase::QuizGroupUseCase;
pub use quiz_result_usecase::QuizResultUseCase;
