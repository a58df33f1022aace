//! Final step: decide the price, save the registration, notify.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use ws_core::{MatchRule, PriceTier, RegistrationForm, RegistrationRow, match_member};
use ws_notify::WebhookPayload;

use super::{lookup_workshop, non_blank};
use crate::AppState;
use crate::error::{ApiError, ApiResult};

const PROCESSING_FAILED: &str = "Eroare la procesarea înregistrării. Te rugăm să încerci din nou.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub workshop_slug: Option<String>,
    #[serde(default)]
    pub form_data: Option<RegistrationForm>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub payment_link: String,
    pub is_member: bool,
    pub message: &'static str,
}

/// POST /api/submit-registration
pub async fn submit_registration(
    State(state): State<AppState>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> ApiResult<Json<SubmitResponse>> {
    let Json(request) = body?;

    let (Some(slug), Some(form)) = (
        non_blank(request.workshop_slug.as_deref()),
        request.form_data.as_ref(),
    ) else {
        return Err(ApiError::BadRequest("Date incomplete".into()));
    };
    let workshop = lookup_workshop(&state, slug)?;

    form.validate().map_err(|e| {
        tracing::info!(slug, error = %e, "invalid registration form");
        ApiError::BadRequest(format!("Date invalide: {e}"))
    })?;

    let roster = state
        .workbook
        .roster(&workshop.sheet_id)
        .await
        .map_err(|e| {
            tracing::error!(slug, error = %e, "failed to load roster");
            ApiError::Internal(PROCESSING_FAILED.into())
        })?;

    let result = match_member(&form.submission(), &roster);
    let tier = PriceTier::from_is_member(result.is_member);
    tracing::info!(
        slug,
        is_member = result.is_member,
        matched_by = result.matched_by.map(MatchRule::as_str),
        "member match"
    );

    let row = RegistrationRow::new(workshop.name.as_str(), form, result.is_member, Utc::now());
    state
        .workbook
        .append_registration(&workshop.sheet_id, &row)
        .await
        .map_err(|e| {
            tracing::error!(slug, error = %e, "failed to save registration");
            ApiError::Internal(PROCESSING_FAILED.into())
        })?;

    if let Err(e) = state
        .notifier
        .notify(&workshop.webhook_url, WebhookPayload::from(&row))
    {
        tracing::warn!(slug, error = %e, "webhook notification dropped");
    }

    Ok(Json(SubmitResponse {
        success: true,
        payment_link: workshop.payment_link(tier).to_string(),
        is_member: result.is_member,
        message: "Înregistrare finalizată cu succes!",
    }))
}
