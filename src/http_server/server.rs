//! # HTTP Server
//!
//! Combines the gateway routes with the CORS and tracing layers and serves
//! them until Ctrl-C.

use std::sync::Arc;

use axum::http::header::InvalidHeaderValue;
use axum::middleware::from_fn_with_state;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::db::SqlExecutor;

use super::config::HttpServerConfig;
use super::cors::{cors_middleware, CorsPolicy};
use super::routes::{gateway_routes, API_PREFIX};

/// HTTP server for the patient gateway
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `executor`.
    ///
    /// Fails if the configured origin is not a valid header value.
    pub fn new<E: SqlExecutor + 'static>(
        config: HttpServerConfig,
        executor: Arc<E>,
    ) -> Result<Self, InvalidHeaderValue> {
        let router = Self::build_router(&config, executor)?;
        Ok(Self { config, router })
    }

    /// Build the combined router with all layers
    fn build_router<E: SqlExecutor + 'static>(
        config: &HttpServerConfig,
        executor: Arc<E>,
    ) -> Result<Router, InvalidHeaderValue> {
        let cors = Arc::new(CorsPolicy::new(&config.allowed_origin)?);

        Ok(gateway_routes(executor)
            .layer(from_fn_with_state(cors, cors_middleware))
            .layer(TraceLayer::new_for_http()))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        info!(%addr, origin = %self.config.allowed_origin, "server running");
        info!("API endpoints: http://{}{}<statement>", addr, API_PREFIX);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
