//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure `ConfigService`. Every
//! section and field has a default so a partial file is valid.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub paging: PagingSettings,
    #[serde(default)]
    pub hall_of_fame: HallOfFameSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    20
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallOfFameSettings {
    /// Number of entries per ranking.
    #[serde(default = "default_ranking_limit")]
    pub limit: usize,
}

impl Default for HallOfFameSettings {
    fn default() -> Self {
        Self {
            limit: default_ranking_limit(),
        }
    }
}

fn default_ranking_limit() -> usize {
    10
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Overrides the preference file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences_path: Option<String>,
}
