use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::warn;

use smartcap_core::{
    stats::{StatsSnapshot, RECENT_LIMIT},
    store::LandingStore,
};

use crate::state::AppState;

/// `GET /api/stats` - dashboard snapshot.
///
/// Always 200. A failed query degrades only its own field.
#[tracing::instrument(skip(state))]
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsSnapshot> {
    Json(gather_stats(state.store.as_ref()).await)
}

/// Run the five snapshot reads together and assemble the result once every
/// one has finished.
///
/// The reads touch disjoint data, so their relative order does not matter.
/// There is no timeout: a stalled read stalls the whole snapshot.
pub async fn gather_stats(store: &dyn LandingStore) -> StatsSnapshot {
    let (total_leads, total_page_views, variants, recent_leads, recent_page_views) = tokio::join!(
        store.count_leads(),
        store.count_page_views(),
        store.lead_variant_counts(),
        store.recent_leads(RECENT_LIMIT),
        store.recent_page_views(RECENT_LIMIT),
    );

    StatsSnapshot {
        total_leads: or_default("total_leads", total_leads),
        total_page_views: or_default("total_page_views", total_page_views),
        variants: or_default("variants", variants),
        recent_leads: or_default("recent_leads", recent_leads),
        recent_page_views: or_default("recent_page_views", recent_page_views),
    }
}

fn or_default<T: Default>(field: &'static str, result: anyhow::Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!(field, error = %e, "Stats query failed, reporting default");
        T::default()
    })
}
