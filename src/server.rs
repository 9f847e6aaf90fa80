//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend, builds shared state, and runs the Axum
//! server until a shutdown signal arrives.

use crate::config::Config;
use crate::application::services::TokenService;
use crate::infrastructure::persistence::{
    PgAccountRepository, PgCategoryRepository, PgUserRepository,
};
use crate::routes::{RouterOptions, app_router};
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations, or in-memory storage when no
///   database is configured
/// - JWT token service
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let tokens = Arc::new(TokenService::new(&config.jwt_secret, config.jwt_ttl_seconds));

    let state = match config.database_url {
        Some(ref url) => {
            let pool = connect(&config, url).await?;
            postgres_state(pool, tokens)
        }
        None => {
            tracing::warn!(
                "No database configured, using in-memory storage (data is not persisted)"
            );
            AppState::in_memory(tokens)
        }
    };

    let app = app_router(
        state,
        RouterOptions {
            rate_limit: config.rate_limit,
            behind_proxy: config.behind_proxy,
        },
    );

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
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

/// Opens the pool and applies pending migrations.
async fn connect(config: &Config, url: &str) -> Result<PgPool> {
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
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

fn postgres_state(pool: PgPool, tokens: Arc<TokenService>) -> AppState {
    let pool = Arc::new(pool);

    AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgCategoryRepository::new(pool.clone())),
        Arc::new(PgAccountRepository::new(pool)),
        tokens,
        "postgres",
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
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
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
