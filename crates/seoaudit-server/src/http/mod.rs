//! HTTP server for the audit API.
//!
//! Provides endpoints for:
//! - Starting an audit (`POST /audit`, rate limited per client IP)
//! - Polling an audit (`GET /audit/{taskRunId}`)
//! - Liveness (`GET /`, `GET /health`) and service status (`GET /status`)

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::state::AppState;

pub mod error;
mod handlers;
pub mod rate_limit;
pub mod responses;

/// Localhost origins always allowed alongside a configured frontend.
const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::service_status))
        .route(
            "/audit",
            post(handlers::start_audit).layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit::limit_by_ip,
            )),
        )
        .route("/audit/:task_run_id", get(handlers::audit_status))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS restricted to the configured frontend origin (plus localhost dev
/// origins); any origin when no frontend is configured.
fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match &config.frontend_url {
        Some(frontend) => {
            let origins: Vec<HeaderValue> = std::iter::once(frontend.as_str())
                .chain(DEV_ORIGINS)
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!(origin = %origin, error = %e, "Skipping unparsable CORS origin");
                        None
                    }
                })
                .collect();
            cors.allow_origin(AllowOrigin::list(origins))
        }
        None => cors.allow_origin(Any),
    }
}
