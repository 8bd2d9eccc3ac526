//! Per-IP rate limiting middleware for the start-audit route.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use tracing::warn;

use crate::http::responses::ErrorResponse;
use crate::state::AppState;

/// Keyed limiter over client IP addresses.
pub type IpRateLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Create a per-IP limiter allowing `per_minute` requests per minute.
pub fn new_ip_limiter(per_minute: u32) -> IpRateLimiter {
    let rate = NonZeroU32::new(per_minute.max(1)).unwrap_or(NonZeroU32::MIN);
    RateLimiter::keyed(Quota::per_minute(rate))
}

/// Reject requests over the per-IP quota with 429 and a Retry-After.
pub async fn limit_by_ip(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    match state.start_limiter.check_key(&addr.ip()) {
        Ok(()) => next.run(req).await,
        Err(not_until) => {
            let retry_after = not_until.wait_time_from(DefaultClock::default().now());
            warn!(client_ip = %addr.ip(), retry_after_secs = retry_after.as_secs(), "Rate limit exceeded");
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after.as_secs().to_string())],
                Json(ErrorResponse {
                    error: "Rate limit exceeded: 10 per minute".to_string(),
                }),
            )
                .into_response()
        }
    }
}
