//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, database migrations, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

type Repositories = (Arc<dyn LinkRepository>, Arc<dyn ClickRepository>);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or the in-memory store)
/// - Services and shared state
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (link_repository, click_repository) = match config.database_url {
        Some(ref url) => {
            let pool = connect_pool(&config, url).await?;
            postgres_repositories(pool)
        }
        None => {
            tracing::warn!("No database configured, using in-memory storage (data is not persisted)");
            memory_repositories()
        }
    };

    let state = AppState::new(
        link_repository,
        click_repository,
        config.base_url.clone(),
        config.short_id_length,
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects to PostgreSQL and applies pending migrations.
async fn connect_pool(config: &Config, url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

fn postgres_repositories(pool: PgPool) -> Repositories {
    let pool = Arc::new(pool);
    (
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool)),
    )
}

fn memory_repositories() -> Repositories {
    let store = MemoryStore::new();
    (
        Arc::new(store.link_repository()),
        Arc::new(store.click_repository()),
    )
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
