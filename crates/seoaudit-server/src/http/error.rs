//! Boundary mapping of workflow failures onto HTTP outcomes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use seoaudit_workflows::WorkflowError;

use crate::http::responses::ErrorResponse;

/// A workflow failure surfaced at the HTTP boundary.
///
/// Handlers return this so `?` on any remote call produces a mapped HTTP
/// response; no failure leaves the boundary unmapped.
#[derive(Debug)]
pub struct ApiError(WorkflowError);

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        Self(err)
    }
}

/// Map a workflow failure to its HTTP status and message.
///
/// Total over [`WorkflowError`]: caller-caused failures become 4xx with a
/// "Client error: " prefix, platform-side failures become 5xx with a
/// "Remote service error: " prefix, and anything uncategorized becomes a
/// 5xx with the raw message.
pub fn map_error(err: &WorkflowError) -> (StatusCode, String) {
    match err {
        WorkflowError::InvalidInput(_) | WorkflowError::Client { .. } => {
            (StatusCode::BAD_REQUEST, format!("Client error: {}", err))
        }
        WorkflowError::NotFound(_) => (StatusCode::NOT_FOUND, format!("Client error: {}", err)),
        WorkflowError::Remote { .. } | WorkflowError::Transport(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Remote service error: {}", err),
        ),
        WorkflowError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = map_error(&self.0);
        warn!(status = %status, error = %self.0, "Request failed");
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_400() {
        let (status, message) = map_error(&WorkflowError::InvalidInput("url is empty".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.starts_with("Client error: "));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, message) = map_error(&WorkflowError::NotFound("trn-missing".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(message.starts_with("Client error: "));
    }

    #[test]
    fn test_platform_rejection_maps_to_400() {
        let err = WorkflowError::Client {
            status: 422,
            message: "bad slug".into(),
        };
        let (status, message) = map_error(&err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.starts_with("Client error: "));
    }

    #[test]
    fn test_platform_failure_maps_to_500() {
        let err = WorkflowError::Remote {
            status: 503,
            message: "unavailable".into(),
        };
        let (status, message) = map_error(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(message.starts_with("Remote service error: "));
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_500() {
        // A malformed URL makes reqwest fail before any I/O.
        let transport = reqwest::Client::new()
            .get("http://[malformed")
            .send()
            .await
            .unwrap_err();

        let (status, message) = map_error(&WorkflowError::Transport(transport));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(message.starts_with("Remote service error: "));
    }

    #[test]
    fn test_uncategorized_failure_keeps_raw_message() {
        let (status, message) = map_error(&WorkflowError::Serialization("bad json".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "serialization error: bad json");
    }
}
