use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};
use tracing::{debug, info};

use smartcap_core::{
    lead::{is_known_variant, WaitlistSubmission},
    notify::LeadNotification,
};

use crate::{error::AppError, extract::JsonOrForm, notify, state::AppState};

/// `POST /api/waitlist` - record a signup.
///
/// `name` and `email` are required; anything else is a 400 with no insert.
/// On success the lead id is returned straight away and the operator
/// notification goes out on a detached task whose outcome never reaches the
/// caller. A failed insert is a 500 and sends nothing.
///
/// Scalar fields are read as text, so `{"name": 123}` stores `"123"`. Unknown
/// headline variants are stored as given.
#[tracing::instrument(skip(state, body))]
pub async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    JsonOrForm(body): JsonOrForm<Value>,
) -> Result<impl IntoResponse, AppError> {
    let lead = WaitlistSubmission::from_body(&body).validate()?;

    if let Some(variant) = lead.ab_variant.as_deref() {
        if !is_known_variant(variant) {
            debug!(variant, "Lead carries a headline outside the canonical set");
        }
    }

    let lead_id = state
        .store
        .insert_lead(&lead)
        .await
        .map_err(|e| AppError::Internal(e.context("inserting lead")))?;
    info!(lead_id, variant = ?lead.ab_variant, "Lead joined waitlist");

    notify::dispatch(
        Arc::clone(&state.notifier),
        LeadNotification::new(lead_id, &lead),
    );

    Ok(Json(json!({
        "success": true,
        "message": "Successfully joined waitlist.",
        "leadId": lead_id
    })))
}
