//! # ws-server
//!
//! HTTP API for workshop registration.
//!
//! Routes:
//! - `GET /health`
//! - `GET /api/workshop/:slug` (public workshop info)
//! - `POST /api/check-member` (email-only membership check)
//! - `POST /api/submit-registration` (match, save, notify, return payment link)

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use ws_config::WsConfig;
use ws_notify::Notifier;
use ws_sheets::Workbook;

pub mod api;
pub mod error;

pub use error::{ApiError, ApiResult};

/// State shared across handlers. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<WsConfig>,
    pub workbook: Workbook,
    pub notifier: Notifier,
}

impl AppState {
    #[must_use]
    pub fn new(config: WsConfig, workbook: Workbook, notifier: Notifier) -> Self {
        Self {
            config: Arc::new(config),
            workbook,
            notifier,
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/workshop/:slug", get(api::workshop::get_workshop))
        .route("/api/check-member", post(api::check_member::check_member))
        .route(
            "/api/submit-registration",
            post(api::submit::submit_registration),
        )
        .merge(api::health::health_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
