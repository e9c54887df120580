//! # Configuration
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. `config/forum.toml` (optional)
//! 3. environment variables, e.g. `FORUM__DATABASE__URL`, `FORUM__LOG__FORMAT=json`
//!
//! [`Settings::load`] reads `.env` into the process environment first.

pub mod telemetry;

use config::{Config, ConfigError, Environment, File, Map};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE: &str = "config/forum";
const ENV_PREFIX: &str = "FORUM";
const ENV_SEPARATOR: &str = "__";

#[derive(Error, Debug)]
pub enum ConfigsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] ConfigError),

    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// An `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Settings {
    /// Loads `.env`, then every layer, from the real process environment.
    pub fn load() -> Result<Self, ConfigsError> {
        dotenvy::dotenv().ok();
        Self::from_env(None)
    }

    /// Same layering, with the environment layer read from `vars` instead of
    /// the process when given.
    pub fn from_env(vars: Option<Map<String, String>>) -> Result<Self, ConfigsError> {
        let settings = Config::builder()
            .set_default("database.url", "postgres://localhost:5432/forum")?
            .set_default("database.max_connections", 5)?
            .set_default("storage.backend", "memory")?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}
