//! Webhook HTTP server
//!
//! `POST /callback` receives signed LINE deliveries, `GET /health` is the
//! liveness probe.

use std::sync::Arc;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use crate::handlers::EventRouter;
use crate::middleware::{SignatureVerifier, SIGNATURE_HEADER};
use crate::models::CallbackRequest;
use crate::utils::errors::Result;

/// Shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EventRouter>,
    pub verifier: SignatureVerifier,
}

impl AppState {
    pub fn new(router: EventRouter, verifier: SignatureVerifier) -> Self {
        Self {
            router: Arc::new(router),
            verifier,
        }
    }
}

/// Build the axum application
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/callback", post(callback_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Server is running on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn health_handler() -> impl IntoResponse {
    debug!("Health check");
    (StatusCode::OK, "OK")
}

async fn callback_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let Some(signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        warn!("Webhook delivery without signature header");
        return (StatusCode::BAD_REQUEST, "missing signature");
    };

    if state.verifier.verify(&body, signature).is_err() {
        return (StatusCode::BAD_REQUEST, "invalid signature");
    }

    let request: CallbackRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Malformed webhook body");
            return (StatusCode::BAD_REQUEST, "malformed body");
        }
    };

    let report = state.router.dispatch(&request.events).await;
    info!(
        replied = report.replied,
        ignored = report.ignored,
        failed = report.failed,
        skipped = report.skipped,
        "Webhook delivery processed"
    );

    // failures are logged per event; the platform does not redeliver
    (StatusCode::OK, "OK")
}
