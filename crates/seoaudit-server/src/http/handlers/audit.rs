//! Audit start and status handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use seoaudit_core::{AuditReport, TaskRunId};
use seoaudit_workflows::WorkflowError;

use crate::http::error::ApiError;
use crate::http::responses::{AuditRequest, StartAuditResponse};
use crate::state::AppState;

/// Start an audit workflow for the requested target.
pub async fn start_audit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AuditRequest>,
) -> Result<Json<StartAuditResponse>, ApiError> {
    let target_url = validate_target_url(&req.url)?;

    let task_run_id = state.client.start_run(&target_url).await?;
    info!(task_run_id = %task_run_id, target_url = %target_url, "Audit started");

    Ok(Json(StartAuditResponse { task_run_id }))
}

/// Return the aggregated report for a previously started audit.
pub async fn audit_status(
    State(state): State<Arc<AppState>>,
    Path(task_run_id): Path<String>,
) -> Result<Json<AuditReport>, ApiError> {
    let id = TaskRunId::new(task_run_id);
    let report = state.aggregator.aggregate(&id).await?;
    Ok(Json(report))
}

/// Validate the audit target before any remote call.
fn validate_target_url(url: &str) -> Result<String, WorkflowError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(WorkflowError::InvalidInput(
            "audit target URL is required".to_string(),
        ));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(WorkflowError::InvalidInput(format!(
            "audit target must be an http(s) URL: {}",
            url
        )));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_target_is_trimmed() {
        assert_eq!(
            validate_target_url("  https://example.com  ").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_empty_target_rejected() {
        let err = validate_target_url("   ").unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInput(_)));
    }

    #[test]
    fn test_non_http_target_rejected() {
        let err = validate_target_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInput(_)));
    }
}
