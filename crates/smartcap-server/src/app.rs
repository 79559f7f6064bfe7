use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{routes, state::AppState};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware, outermost first:
///
/// 1. `CorsLayer` - permissive, the form and tracker may be embedded on
///    other origins.
/// 2. `TraceLayer` - structured request/response logging via `tracing`.
///
/// Paths that match no route fall through to the embedded static assets.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/waitlist", post(routes::waitlist::join_waitlist))
        .route("/api/pageview", post(routes::pageview::track_page_view))
        .route("/api/stats", get(routes::stats::get_stats))
        .route("/", get(routes::pages::index))
        .route("/dashboard", get(routes::pages::dashboard))
        .fallback(routes::pages::asset)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
