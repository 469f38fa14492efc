//! Path management for local ChosungMarket files.
//!
//! Only local settings live on disk; all game data is in the document store.
//!
//! ```text
//! ~/.config/chosung-market/    # Config directory (platform config dir)
//! ├── config.toml              # Application configuration
//! └── preferences.toml         # Remembered login id, auto-login flag
//! ```

use std::path::{Path, PathBuf};

use chosung_core::error::{ChosungError, Result};

const APP_DIR_NAME: &str = "chosung-market";

/// Resolves local file locations.
///
/// `base_dir` replaces the platform config directory, which keeps tests
/// inside a temp dir.
#[derive(Debug, Clone)]
pub struct ChosungPaths {
    base_dir: Option<PathBuf>,
}

impl ChosungPaths {
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the application config directory.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the platform has no config directory.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| ChosungError::config("Cannot find config directory"))
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn preferences_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("preferences.toml"))
    }
}

impl Default for ChosungPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
