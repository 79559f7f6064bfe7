use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use smartcap_core::lead::{Lead, NewLead};
use smartcap_core::notify::NullNotifier;
use smartcap_core::page_view::{NewPageView, PageView};
use smartcap_core::store::LandingStore;
use smartcap_duckdb::DuckDbBackend;
use smartcap_server::app::build_app;
use smartcap_server::state::AppState;

async fn json_body(response: axum::http::Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse JSON")
}

fn health_request() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build request")
}

struct UnreachableStore;

#[async_trait]
impl LandingStore for UnreachableStore {
    async fn insert_lead(&self, _lead: &NewLead) -> anyhow::Result<i64> {
        anyhow::bail!("IO Error: could not open file")
    }
    async fn insert_page_view(&self, _view: &NewPageView) -> anyhow::Result<i64> {
        anyhow::bail!("IO Error: could not open file")
    }
    async fn count_leads(&self) -> anyhow::Result<i64> {
        anyhow::bail!("IO Error: could not open file")
    }
    async fn count_page_views(&self) -> anyhow::Result<i64> {
        anyhow::bail!("IO Error: could not open file")
    }
    async fn lead_variant_counts(&self) -> anyhow::Result<BTreeMap<String, i64>> {
        anyhow::bail!("IO Error: could not open file")
    }
    async fn recent_leads(&self, _limit: usize) -> anyhow::Result<Vec<Lead>> {
        anyhow::bail!("IO Error: could not open file")
    }
    async fn recent_page_views(&self, _limit: usize) -> anyhow::Result<Vec<PageView>> {
        anyhow::bail!("IO Error: could not open file")
    }
    async fn ping(&self) -> anyhow::Result<()> {
        anyhow::bail!("IO Error: could not open file")
    }
}

// ============================================================
// BDD: Health check returns 200 when the store is reachable
// ============================================================
#[tokio::test]
async fn test_health_returns_200_when_store_reachable() {
    let db = DuckDbBackend::open_in_memory().expect("in-memory DuckDB");
    let state = Arc::new(AppState::new(
        Arc::new(db),
        Arc::new(NullNotifier),
    ));

    let response = build_app(state)
        .oneshot(health_request())
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store"], "reachable");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_returns_503_when_store_unreachable() {
    let state = Arc::new(AppState::new(
        Arc::new(UnreachableStore),
        Arc::new(NullNotifier),
    ));
    let app = build_app(state);

    let response = app.clone().oneshot(health_request()).await.expect("request");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = json_body(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store"], "unreachable");

    // Stats still answers with defaults even when nothing can be read.
    let request = Request::builder()
        .method("GET")
        .uri("/api/stats")
        .body(Body::empty())
        .expect("build request");
    let response = app.oneshot(request).await.expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["totalLeads"], 0);
}
