//! Router setup, and running it until a shutdown signal arrives.

use crate::error::{ErrorKind, Result};
use crate::middleware::log_requests;
use crate::routes::{health, not_found, records};
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use docmeta_config::{Config, ServerConfig};
use exn::ResultExt;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/records", get(records::list_records))
        .route("/records/parse", post(records::parse_record))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.max_body_size()))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.timeout()))
        .layer(from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server, and serve until Ctrl+C or SIGTERM.
pub async fn start_server(config: Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(&config).await?);
    let app = build_router(state, &config.server);

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await.or_raise(|| ErrorKind::Bind(address.clone()))?;
    tracing::info!(
        %address,
        timeout_secs = config.server.timeout_secs,
        max_body_size_mb = config.server.max_body_size_mb,
        "Listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await.or_raise(|| ErrorKind::Serve)?;
    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            },
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
