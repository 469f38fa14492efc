//! User repository trait.

use async_trait::async_trait;

use super::model::{Medal, User};
use crate::error::Result;

/// Repository for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))`: User found
    /// - `Ok(None)`: User not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;

    /// Finds the user linked to a social-login id.
    async fn find_by_social_id(&self, social_id: &str) -> Result<Option<User>>;

    /// Inserts a new user. Fails if the id is already taken.
    async fn create(&self, user: &User) -> Result<()>;

    async fn update_nickname(&self, user_id: &str, nickname: &str) -> Result<()>;

    /// Adds `delta` to the user's point total and returns the new total.
    async fn add_points(&self, user_id: &str, delta: u64) -> Result<u64>;

    /// Appends a medal to the user's medal list.
    async fn add_medal(&self, user_id: &str, medal: &Medal) -> Result<()>;

    /// Deletes the user document (no error if it was already gone).
    async fn delete(&self, user_id: &str) -> Result<()>;

    /// Users with the highest point totals, best first.
    async fn list_top_by_points(&self, limit: usize) -> Result<Vec<User>>;
}
