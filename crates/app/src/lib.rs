//! # Composition root
//!
//! Turns [`Settings`] into a ready [`UseCases`] bundle. Transport layers
//! call [`bootstrap`] once at startup and share the result.

use std::sync::Arc;

use configs::{Settings, StorageBackend};
use domains::{CommentLikeRepository, CommentRepository, ReplyRepository, ThreadRepository};
use services::UseCases;
use storage_adapters::InMemoryStore;
use tracing::info;

/// Loads settings, installs tracing and wires the configured backend.
pub async fn bootstrap() -> anyhow::Result<UseCases> {
    let settings = Settings::load()?;
    configs::telemetry::init_tracing(&settings.log)?;
    use_cases_from_settings(&settings).await
}

/// Builds the use cases for the configured backend.
pub async fn use_cases_from_settings(settings: &Settings) -> anyhow::Result<UseCases> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            info!("using in-memory storage");
            Ok(wire(InMemoryStore::new()))
        }
        StorageBackend::Postgres => postgres_use_cases(settings).await,
    }
}

#[cfg(feature = "db-postgres")]
async fn postgres_use_cases(settings: &Settings) -> anyhow::Result<UseCases> {
    use secrecy::ExposeSecret;
    use storage_adapters::PgStore;

    let store = PgStore::connect(settings.database.url.expose_secret(), settings.database.max_connections).await?;
    store.migrate().await?;
    info!("using postgres storage");
    Ok(wire(store))
}

#[cfg(not(feature = "db-postgres"))]
async fn postgres_use_cases(_settings: &Settings) -> anyhow::Result<UseCases> {
    anyhow::bail!("the postgres backend needs the `db-postgres` feature")
}

/// One store serving all four ports.
pub fn wire<S>(store: S) -> UseCases
where
    S: ThreadRepository + CommentRepository + ReplyRepository + CommentLikeRepository + 'static,
{
    let store = Arc::new(store);
    UseCases::new(store.clone(), store.clone(), store.clone(), store)
}
