//! Local preference store boundary.
//!
//! Two scalars survive restarts: the remembered login id and the
//! auto-login flag. Both can be observed as streams.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::Result;

/// The persisted preference values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remembered_login_id: Option<String>,
    #[serde(default)]
    pub auto_login: bool,
}

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn remembered_login_id(&self) -> Option<String>;

    async fn set_remembered_login_id(&self, login_id: Option<String>) -> Result<()>;

    async fn auto_login(&self) -> bool;

    async fn set_auto_login(&self, enabled: bool) -> Result<()>;

    /// Yields the current remembered id, then every change.
    fn remembered_login_id_stream(&self) -> BoxStream<'static, Option<String>>;

    /// Yields the current auto-login flag, then every change.
    fn auto_login_stream(&self) -> BoxStream<'static, bool>;
}

/// Turns a watch receiver into a stream of its current value and every
/// later change. The stream ends when the sender is dropped.
pub fn watch_stream<T>(mut receiver: watch::Receiver<T>) -> BoxStream<'static, T>
where
    T: Clone + Send + Sync + 'static,
{
    let current = receiver.borrow_and_update().clone();
    let changes = stream::unfold(receiver, |mut receiver| async move {
        receiver.changed().await.ok()?;
        let value = receiver.borrow_and_update().clone();
        Some((value, receiver))
    });
    stream::once(async move { current }).chain(changes).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_watch_stream_yields_current_then_changes() {
        let (tx, rx) = watch::channel(false);
        let mut stream = watch_stream(rx);

        assert_eq!(stream.next().await, Some(false));
        tx.send(true).unwrap();
        assert_eq!(stream.next().await, Some(true));
        drop(tx);
        assert_eq!(stream.next().await, None);
    }
}
