//! Liveness and service status handlers.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::http::responses::ServiceStatusResponse;
use crate::state::AppState;

const SERVICE_NAME: &str = "seo-audit-api";

/// API root - liveness probe.
pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy", "service": SERVICE_NAME }))
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Service-level status endpoint.
pub async fn service_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ServiceStatusResponse {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        mode: if state.config.use_local_dev {
            "local-dev"
        } else {
            "production"
        },
        api_key_configured: !state.config.api_key.is_empty(),
    })
}
