//! Logging relay HTTP server
//!
//! Accepts a JSON payload, logs it, best-effort forwards it to the external
//! sink, and always acknowledges well-formed bodies with `{"status":"ok"}`.

use crate::data::RelayConfig;
use crate::relay::forwarder::Forwarder;
use crate::relay::types::{AckResponse, StatusResponse};
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared state for the relay handlers
pub struct AppState {
    pub forwarder: Forwarder,
}

/// Build the relay router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/log-response", post(log_response))
        .route("/api/status", get(status))
        .with_state(state)
}

/// Bind the configured address and serve the relay until shutdown
pub async fn serve(config: &RelayConfig) -> Result<()> {
    let state = Arc::new(AppState {
        forwarder: Forwarder::new(config.forward_url.clone()),
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind relay listener on {}", config.listen_addr))?;
    info!("Relay listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("relay server error")?;
    Ok(())
}

/// POST /api/log-response
///
/// The body is taken as raw bytes so every malformed payload, invalid UTF-8
/// included, produces the documented `{"status":"error"}` shape instead of
/// the extractor's plain-text reject. Both outcomes use HTTP 200, matching
/// the endpoint this replaces.
async fn log_response(State(state): State<Arc<AppState>>, body: Bytes) -> Json<AckResponse> {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Rejected malformed submission: {}", e);
            return Json(AckResponse::error(e.to_string()));
        }
    };

    match payload.get("input").and_then(Value::as_str) {
        Some(input) => info!("Logged response: {:?}", input),
        None => info!("Logged response: {}", payload),
    }

    // Delivery is at-most-once with no guarantee: a failed forward is logged
    // and the acknowledgment stays "ok".
    if let Err(e) = state.forwarder.forward(&payload).await {
        error!("Failed to forward to sink: {}", e);
    }

    Json(AckResponse::ok())
}

/// GET /api/status
async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        forward_url: state.forwarder.sink_url().to_string(),
    })
}
