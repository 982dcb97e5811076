//! Axum server setup
//!
//! Server skeleton with:
//! - Fixed allow-list CORS for the local frontend
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, then the database is closed

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Uri};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::db::{ConnectionManager, Connector};

/// Frontend origins allowed to call the API.
pub const ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:3000",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

/// Shared application state
pub struct AppState<C: Connector> {
    pub db: Arc<ConnectionManager<C>>,
}

impl<C: Connector> AppState<C> {
    pub fn new(db: Arc<ConnectionManager<C>>) -> Self {
        Self { db }
    }
}

impl<C: Connector> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: "route",
        id: uri.path().to_string(),
    }
}

/// Build the router with all routes and middleware.
pub fn build_router<C: Connector>(state: AppState<C>) -> Router {
    Router::new()
        .merge(routes::root::router())
        .merge(routes::health::router())
        .merge(routes::stats::router::<C>())
        .fallback(not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until a shutdown signal, then close the database.
///
/// The manager must already be connected; startup failures are the
/// caller's to report before calling this.
///
/// # Example
///
/// ```ignore
/// let manager = Arc::new(ConnectionManager::new(MongoConnector::default(), settings));
/// manager.connect().await?;
/// run_server(manager, ServerConfig::default()).await?;
/// ```
pub async fn run_server<C: Connector>(
    manager: Arc<ConnectionManager<C>>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let app = build_router(AppState::new(Arc::clone(&manager)));

    let served = async {
        let listener = TcpListener::bind(config.bind_addr).await?;
        tracing::info!("Server listening on {}", config.bind_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
    .await;

    manager.close().await;
    served?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
