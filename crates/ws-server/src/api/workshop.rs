//! Public workshop info.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// What the registration page may know about a workshop. Sheet id, payment
/// links, and webhook stay server-side.
#[derive(Debug, Serialize)]
pub struct WorkshopInfo {
    pub slug: String,
    pub name: String,
    pub active: bool,
}

/// GET /api/workshop/:slug
pub async fn get_workshop(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<WorkshopInfo>> {
    let workshop = state
        .config
        .workshops
        .get(&slug)
        .filter(|w| w.active)
        .ok_or_else(|| ApiError::NotFound("Workshop nu a fost găsit sau nu este activ".into()))?;

    Ok(Json(WorkshopInfo {
        slug: workshop.slug.clone(),
        name: workshop.name.clone(),
        active: workshop.active,
    }))
}
