//! Tracing subscriber setup.

use chosung_core::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `settings.level`. Returns an error if a subscriber
/// is already installed or the configured directive does not parse.
pub fn init(settings: &LoggingSettings) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false);

    if settings.json {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install JSON subscriber: {}", e))?;
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;
    }
    Ok(())
}
