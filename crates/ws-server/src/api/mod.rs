//! HTTP API handlers.

pub mod check_member;
pub mod health;
pub mod submit;
pub mod workshop;

use ws_config::WorkshopConfig;

use crate::AppState;
use crate::error::ApiError;

pub(crate) const WORKSHOP_NOT_FOUND: &str = "Workshop nu a fost găsit";

/// Resolve a slug from a request body. Inactive workshops still accept
/// registrations; only the public info route hides them.
pub(crate) fn lookup_workshop<'a>(
    state: &'a AppState,
    slug: &str,
) -> Result<&'a WorkshopConfig, ApiError> {
    state.config.workshops.get(slug).ok_or_else(|| {
        tracing::info!(slug, "unknown workshop");
        ApiError::NotFound(WORKSHOP_NOT_FOUND.into())
    })
}

/// Blank strings count as missing.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
