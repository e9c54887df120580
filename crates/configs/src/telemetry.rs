//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{ConfigsError, LogFormat, LogSettings};

/// Builds the filter: `RUST_LOG` if set, else the configured level.
pub fn env_filter(settings: &LogSettings) -> Result<EnvFilter, ConfigsError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|err| ConfigsError::Filter(err.to_string()))
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_tracing(settings: &LogSettings) -> Result<(), ConfigsError> {
    let registry = tracing_subscriber::registry().with(env_filter(settings)?);

    let installed = match settings.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
    };
    installed.map_err(|err| ConfigsError::Subscriber(err.to_string()))?;

    tracing::debug!(level = %settings.level, format = ?settings.format, "tracing initialized");
    Ok(())
}
