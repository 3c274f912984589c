pub mod config;
pub mod error;
pub mod i18n;
pub mod settings;
pub mod storage;

pub use config::{Config, ValidationResult, WeatherConfig};
pub use error::{
    AppError, ConfigError, NetworkError, ReqwestErrorExt, StorageError, WeatherError,
};
pub use i18n::{labels, labels_for_code, LabelSet};
pub use settings::{Language, Settings, SettingsStore, Theme, UnknownCode};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Output goes to stderr so the rendered panel on stdout stays readable.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("wxglance core initialized");
    Ok(())
}
