//! Configuration service implementation.
//!
//! Loads `AppConfig` from `~/.config/chosung-market/config.toml`. A missing
//! file is created with the defaults.

use std::sync::{Arc, RwLock};

use chosung_core::config::AppConfig;
use chosung_core::error::Result;

use crate::paths::ChosungPaths;
use crate::storage::AtomicTomlFile;

/// Loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: ChosungPaths,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(paths: ChosungPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configuration, loading it on first access.
    ///
    /// A broken or unreadable file falls back to the defaults (logged at
    /// `warn`); use [`ConfigService::load`] to see the error instead.
    pub fn get_config(&self) -> AppConfig {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return cached.clone();
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!("[Config] Failed to load config, using defaults: {}", e);
            AppConfig::default()
        });

        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(loaded.clone());
        loaded
    }

    /// Reads the config file, writing the defaults first if it is missing.
    pub fn load(&self) -> Result<AppConfig> {
        let path = self.paths.config_file()?;
        let file = AtomicTomlFile::<AppConfig>::new(path);

        match file.load()? {
            Some(config) => {
                tracing::debug!("[Config] Loaded {}", file.path().display());
                Ok(config)
            }
            None => {
                let config = AppConfig::default();
                file.save(&config)?;
                tracing::info!("[Config] Created default config at {}", file.path().display());
                Ok(config)
            }
        }
    }

    /// Drops the cached value so the next access re-reads the file.
    pub fn invalidate_cache(&self) {
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(ChosungPaths::default())
    }
}
