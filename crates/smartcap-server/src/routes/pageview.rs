use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use serde_json::{json, Value};

use smartcap_core::page_view::PageViewPayload;

use crate::{
    error::AppError,
    extract::{client_ip, user_agent, LenientJsonOrForm, MaybeConnectInfo},
    state::AppState,
};

/// `POST /api/pageview` - record one page load.
///
/// No field is required and the body is never rejected: an empty or
/// unparseable body, or a field of the wrong type, still produces a row.
/// `ip_address` and `user_agent` come from the request, never from the body.
#[tracing::instrument(skip(state, headers, body))]
pub async fn track_page_view(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    MaybeConnectInfo(peer): MaybeConnectInfo,
    LenientJsonOrForm(body): LenientJsonOrForm<Value>,
) -> Result<impl IntoResponse, AppError> {
    let view = PageViewPayload::from_body(&body)
        .into_new_page_view(client_ip(&headers, peer), user_agent(&headers));

    let view_id = state
        .store
        .insert_page_view(&view)
        .await
        .map_err(|e| AppError::Internal(e.context("inserting page view")))?;
    tracing::debug!(view_id, "Page view recorded");

    Ok(Json(json!({ "success": true, "viewId": view_id })))
}
