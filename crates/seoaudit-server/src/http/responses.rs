//! HTTP request and response types.

use serde::{Deserialize, Serialize};

use seoaudit_core::TaskRunId;

/// Request body for the start-audit endpoint.
#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    /// Target URL to audit.
    pub url: String,
}

/// Response body for a successfully started audit.
#[derive(Debug, Serialize)]
pub struct StartAuditResponse {
    /// Root task run identifier to poll.
    #[serde(rename = "taskRunId")]
    pub task_run_id: TaskRunId,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Service-level status.
#[derive(Debug, Serialize)]
pub struct ServiceStatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    /// "local-dev" or "production".
    pub mode: &'static str,
    pub api_key_configured: bool,
}
