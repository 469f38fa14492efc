//! Social-login boundary.
//!
//! The login handshake belongs to the provider's SDK. The application only
//! sees the opaque account id and display name it returns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Account information returned by a successful social login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccount {
    /// Stable, opaque id assigned by the provider.
    pub provider_user_id: String,
    pub display_name: String,
}

/// A social-login provider SDK.
#[async_trait]
pub trait SocialLoginProvider: Send + Sync {
    /// Runs the provider login flow.
    async fn login(&self) -> Result<SocialAccount>;

    /// Drops the provider-side login.
    async fn logout(&self) -> Result<()>;

    /// Disconnects the app from the provider account (used on withdrawal).
    async fn unlink(&self) -> Result<()>;
}
