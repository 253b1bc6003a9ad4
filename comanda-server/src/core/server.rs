//! Server implementation
//!
//! Router assembly and HTTP serving.

use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::core::{AppState, Config};

/// Request timeout for all routes
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the full application router
///
/// Exposed separately from [`Server`] so integration tests can drive the
/// router without binding a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health::router())
        .merge(api::orders::router())
        .merge(api::reservations::router())
        .merge(api::tables::router())
        .merge(api::menu_items::router())
        .merge(api::ingredients::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<AppState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for sharing with tests/tasks)
    pub fn with_state(config: Config, state: AppState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => AppState::initialize(&self.config),
        };

        let app = build_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!(
            environment = %self.config.environment,
            timezone = %self.config.timezone,
            "Comanda server listening on {}",
            addr
        );

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        Ok(())
    }
}
