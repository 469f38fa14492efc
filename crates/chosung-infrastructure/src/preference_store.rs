//! PreferenceStore implementations.
//!
//! Both stores keep the live values in `watch` channels so every change is
//! pushed to stream subscribers. The TOML store also persists each change
//! before publishing it.

use std::path::PathBuf;

use async_trait::async_trait;
use chosung_core::error::{ChosungError, Result};
use chosung_core::preference::{PreferenceStore, Preferences, watch_stream};
use futures::stream::BoxStream;
use tokio::sync::{Mutex, watch};
use tokio::task;

use crate::storage::AtomicTomlFile;

/// Live preference values.
#[derive(Debug)]
struct PreferenceChannels {
    login_id: watch::Sender<Option<String>>,
    auto_login: watch::Sender<bool>,
}

impl PreferenceChannels {
    fn new(initial: Preferences) -> Self {
        let (login_id, _) = watch::channel(initial.remembered_login_id);
        let (auto_login, _) = watch::channel(initial.auto_login);
        Self {
            login_id,
            auto_login,
        }
    }

    fn login_id(&self) -> Option<String> {
        self.login_id.borrow().clone()
    }

    fn auto_login(&self) -> bool {
        *self.auto_login.borrow()
    }

    fn publish_login_id(&self, value: Option<String>) {
        self.login_id.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    fn publish_auto_login(&self, value: bool) {
        self.auto_login.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}

/// Preferences kept in memory only. Used by tests and previews.
#[derive(Debug)]
pub struct MemoryPreferenceStore {
    channels: PreferenceChannels,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::with_preferences(Preferences::default())
    }

    pub fn with_preferences(initial: Preferences) -> Self {
        Self {
            channels: PreferenceChannels::new(initial),
        }
    }
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn remembered_login_id(&self) -> Option<String> {
        self.channels.login_id()
    }

    async fn set_remembered_login_id(&self, login_id: Option<String>) -> Result<()> {
        self.channels.publish_login_id(login_id);
        Ok(())
    }

    async fn auto_login(&self) -> bool {
        self.channels.auto_login()
    }

    async fn set_auto_login(&self, enabled: bool) -> Result<()> {
        self.channels.publish_auto_login(enabled);
        Ok(())
    }

    fn remembered_login_id_stream(&self) -> BoxStream<'static, Option<String>> {
        watch_stream(self.channels.login_id.subscribe())
    }

    fn auto_login_stream(&self) -> BoxStream<'static, bool> {
        watch_stream(self.channels.auto_login.subscribe())
    }
}

/// Preferences persisted to `preferences.toml`.
///
/// File writes run on the blocking pool. Setters are serialized so the
/// published value always matches the last write on disk.
pub struct TomlPreferenceStore {
    file: AtomicTomlFile<Preferences>,
    channels: PreferenceChannels,
    writes: Mutex<()>,
}

impl TomlPreferenceStore {
    /// Opens the store at `path`.
    ///
    /// A missing file means defaults. An unreadable file is logged and also
    /// treated as defaults; the next write replaces it.
    pub fn open(path: PathBuf) -> Self {
        let file = AtomicTomlFile::<Preferences>::new(path);
        let initial = match file.load() {
            Ok(loaded) => loaded.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "[Preferences] Ignoring unreadable {}: {}",
                    file.path().display(),
                    e
                );
                Preferences::default()
            }
        };
        tracing::debug!(
            "[Preferences] Opened {} (auto_login={})",
            file.path().display(),
            initial.auto_login
        );
        Self {
            file,
            channels: PreferenceChannels::new(initial),
            writes: Mutex::new(()),
        }
    }

    async fn persist<F>(&self, apply: F) -> Result<Preferences>
    where
        F: Fn(&mut Preferences) + Send + 'static,
    {
        let file = self.file.clone();
        let fallback = Preferences {
            remembered_login_id: self.channels.login_id(),
            auto_login: self.channels.auto_login(),
        };

        task::spawn_blocking(move || Self::persist_sync(&file, fallback, apply))
            .await
            .map_err(|e| ChosungError::io(format!("Failed to join preference write: {}", e)))?
    }

    fn persist_sync(
        file: &AtomicTomlFile<Preferences>,
        fallback: Preferences,
        apply: impl Fn(&mut Preferences),
    ) -> Result<Preferences> {
        let result = file.update(fallback.clone(), |prefs| {
            apply(prefs);
            Ok(())
        });
        match result {
            Ok(saved) => Ok(saved),
            Err(e) if e.is_serialization() => {
                // The file on disk is corrupt; overwrite it from memory.
                let mut prefs = fallback;
                apply(&mut prefs);
                file.save(&prefs)?;
                Ok(prefs)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl PreferenceStore for TomlPreferenceStore {
    async fn remembered_login_id(&self) -> Option<String> {
        self.channels.login_id()
    }

    async fn set_remembered_login_id(&self, login_id: Option<String>) -> Result<()> {
        let _guard = self.writes.lock().await;
        let saved = self
            .persist(move |prefs| prefs.remembered_login_id = login_id.clone())
            .await?;
        self.channels.publish_login_id(saved.remembered_login_id);
        Ok(())
    }

    async fn auto_login(&self) -> bool {
        self.channels.auto_login()
    }

    async fn set_auto_login(&self, enabled: bool) -> Result<()> {
        let _guard = self.writes.lock().await;
        let saved = self
            .persist(move |prefs| prefs.auto_login = enabled)
            .await?;
        self.channels.publish_auto_login(saved.auto_login);
        Ok(())
    }

    fn remembered_login_id_stream(&self) -> BoxStream<'static, Option<String>> {
        watch_stream(self.channels.login_id.subscribe())
    }

    fn auto_login_stream(&self) -> BoxStream<'static, bool> {
        watch_stream(self.channels.auto_login.subscribe())
    }
}
