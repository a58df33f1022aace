//! Step 1 of the form: "have we seen this email before?"

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use ws_core::match_by_email_only;

use super::{lookup_workshop, non_blank};
use crate::AppState;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckMemberRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub workshop_slug: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckMemberResponse {
    pub is_member: bool,
    pub message: String,
}

/// Greeting for a recognized member, naming the club when one is set.
fn member_greeting(brand: &str) -> String {
    match brand.trim() {
        "" => String::from("Bun venit înapoi! Ești membru."),
        brand => format!("Bun venit înapoi! Ești membru {brand}."),
    }
}

/// POST /api/check-member
pub async fn check_member(
    State(state): State<AppState>,
    body: Result<Json<CheckMemberRequest>, JsonRejection>,
) -> ApiResult<Json<CheckMemberResponse>> {
    let Json(request) = body?;

    let email = non_blank(request.email.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Email este necesar".into()))?;
    let slug = non_blank(request.workshop_slug.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Workshop slug este necesar".into()))?;
    let workshop = lookup_workshop(&state, slug)?;

    let roster = state
        .workbook
        .roster(&workshop.sheet_id)
        .await
        .map_err(|e| {
            tracing::error!(slug, error = %e, "failed to load roster");
            ApiError::Internal(
                "Eroare la verificarea statusului de membru. Încearcă din nou.".into(),
            )
        })?;

    let result = match_by_email_only(email, &roster);
    tracing::info!(slug, is_member = result.is_member, "member check");

    Ok(Json(CheckMemberResponse {
        is_member: result.is_member,
        message: if result.is_member {
            member_greeting(&state.config.server.brand)
        } else {
            String::from("Bun venit! Continuă cu înregistrarea.")
        },
    }))
}
