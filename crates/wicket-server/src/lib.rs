//! # wicket-server
//!
//! HTTP server for the wicket authentication gateway.
//!
//! Serves a small page application behind credential authentication:
//! public landing and form pages, plus a protected page that only
//! authenticated sessions can see. All authentication decisions are
//! delegated to the `wicket-auth` and `wicket-session` crates; this
//! crate wires them to routes, templates, and the session cookie.
//!
//! ## Usage
//!
//! ```ignore
//! use wicket_server::{config::AppConfig, Server};
//!
//! let config = AppConfig::from_env()?;
//! let server = Server::new(config).await?;
//! server.run().await?;
//! ```

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod router;
pub mod state;
pub mod ui;

pub use config::AppConfig;
pub use router::create_router;
pub use state::AppState;

use std::sync::Arc;

use sqlx::PgPool;
use tokio::net::TcpListener;
use wicket_auth::PasswordHasher;
use wicket_storage::IdentityProvider;
use wicket_storage_sql::{create_pool, ensure_schema, PgIdentityProvider, PoolConfig};

/// The wicket gateway server.
pub struct Server {
    config: AppConfig,
    pool: PgPool,
}

impl Server {
    /// Creates a new server instance.
    ///
    /// Initializes the database connection pool and bootstraps the
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or the schema
    /// cannot be created.
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let pool_config = PoolConfig::new(config.database_url());
        let pool = create_pool(&pool_config).await?;
        ensure_schema(&pool).await?;

        tracing::info!("database connection pool created");

        Ok(Self { config, pool })
    }

    /// Runs the server until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if binding or serving fails.
    pub async fn run(self) -> anyhow::Result<()> {
        let app = create_router(self.app_state());

        let listener = TcpListener::bind(config::BIND_ADDR).await?;
        tracing::info!("server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server shutdown complete");
        Ok(())
    }

    /// Builds the application state over the PostgreSQL store.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        let identities: Arc<dyn IdentityProvider> =
            Arc::new(PgIdentityProvider::new(self.pool.clone()));
        let hasher = Arc::new(PasswordHasher::with_defaults());
        AppState::new(identities, hasher, &self.config.session_secret)
    }

    /// Returns the database pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Waits for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
