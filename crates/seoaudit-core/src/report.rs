//! Audit report shapes served to the frontend.

use crate::{RunStatus, TaskRunId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregated status of one audit: the root run merged with the child
/// runs it spawned.
///
/// Freshly constructed per request; nothing here persists across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Root task run identifier.
    pub id: TaskRunId,

    /// Root run status as reported by the platform.
    pub status: RunStatus,

    /// Number of retries the platform performed for the root run.
    pub retries: u32,

    /// Child runs spawned by the root, in platform order.
    pub tasks: Vec<ChildTaskSummary>,

    /// Result payload, present iff `status` is "completed".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
}

/// Summary of one child run spawned by a root audit run.
///
/// Field names match the JSON contract the frontend consumes: `task_id`
/// carries the resolved display name, timestamps keep the platform's
/// camelCase spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildTaskSummary {
    /// Child task run identifier.
    pub id: TaskRunId,

    /// Child run status.
    pub status: RunStatus,

    /// Resolved task definition display name (degrades to the raw
    /// definition identifier when resolution fails).
    #[serde(rename = "task_id")]
    pub task_name: String,

    /// When the child run started.
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,

    /// When the child run completed.
    #[serde(rename = "completedAt")]
    pub completed_at: Option<DateTime<Utc>>,

    /// First element of the child's input list, if any.
    pub input: Option<Value>,
}
