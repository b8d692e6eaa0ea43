//! Tasklane server entry point.
//!
//! Resolves configuration, installs logging, prepares storage, and serves
//! the task API until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use mockable::DefaultClock;
use std::sync::Arc;
use tasklane::api::{router, serve};
use tasklane::config::{Cli, ServerConfig, StorageBackend};
use tasklane::logging;
use tasklane::task::adapters::memory::InMemoryTaskRepository;
use tasklane::task::adapters::postgres::{PostgresTaskRepository, apply_schema, build_pool};
use tasklane::task::ports::TaskRepositoryError;
use tasklane::task::services::TaskLifecycleService;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::resolve(&cli)?;
    logging::init(&config.log_level)?;

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let clock = Arc::new(DefaultClock);

    match config.storage {
        StorageBackend::Memory => {
            info!("using in-memory task storage");
            let service = TaskLifecycleService::new(Arc::new(InMemoryTaskRepository::new()), clock);
            serve(listener, router(service)).await?;
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url()
                .context("database URL missing")?
                .to_owned();
            let pool_size = config.pool_size;
            let pool = tokio::task::spawn_blocking(move || {
                let built = build_pool(&url, pool_size)?;
                apply_schema(&built)?;
                Ok::<_, TaskRepositoryError>(built)
            })
            .await
            .context("database setup task panicked")?
            .context("failed to prepare PostgreSQL storage")?;
            info!(pool_size, "using PostgreSQL task storage");
            let service =
                TaskLifecycleService::new(Arc::new(PostgresTaskRepository::new(pool)), clock);
            serve(listener, router(service)).await?;
        }
    }

    info!("server stopped");
    Ok(())
}
