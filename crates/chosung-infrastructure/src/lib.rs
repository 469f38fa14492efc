//! Storage adapters for ChosungMarket.

pub mod config_service;
pub mod document;
pub mod document_quiz_group_repository;
pub mod document_quiz_repository;
pub mod document_quiz_result_repository;
pub mod document_repository;
pub mod document_user_repository;
pub mod dto;
pub mod paths;
pub mod preference_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::document::{DocumentStore, MemoryDocumentStore};
pub use crate::document_quiz_group_repository::DocumentQuizGroupRepository;
pub use crate::document_quiz_repository::DocumentQuizRepository;
pub use crate::document_quiz_result_repository::DocumentQuizResultRepository;
pub use crate::document_user_repository::DocumentUserRepository;
pub use crate::paths::ChosungPaths;
pub use crate::preference_store::{MemoryPreferenceStore, TomlPreferenceStore};
