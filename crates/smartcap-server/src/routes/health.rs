use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// `GET /health` - liveness check for the container probe.
///
/// The body always names the store state so a 503 says which dependency is
/// down (file locked, disk full).
#[tracing::instrument(skip(state))]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, overall, store) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "reachable"),
        Err(e) => {
            tracing::error!(error = %e, "Store did not answer the health ping");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
        }
    };

    let body = json!({
        "status": overall,
        "store": store,
        "version": env!("CARGO_PKG_VERSION"),
    });
    (status, Json(body))
}
