//! Workflow platform API seam: wire records and the client trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use seoaudit_core::{RunStatus, TaskDefId, TaskRunId};

use crate::error::WorkflowError;

/// A task run record as returned by the platform's task-runs endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRunRecord {
    /// Run identifier.
    pub id: TaskRunId,

    /// Task definition this run executes. The platform omits it for some
    /// run kinds.
    #[serde(default)]
    pub task_id: Option<TaskDefId>,

    /// Platform-reported status string.
    pub status: RunStatus,

    /// Retries performed by the platform for this run.
    #[serde(default)]
    pub retries: u32,

    /// When the run started.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    /// When the run completed.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Input list the run was invoked with.
    #[serde(default)]
    pub input: Vec<Value>,
}

impl TaskRunRecord {
    /// First element of the input list, if any.
    pub fn first_input(&self) -> Option<&Value> {
        self.input.first()
    }
}

/// Display metadata of a task definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Human-readable name, when the definition has one.
    #[serde(default)]
    pub name: Option<String>,

    /// Slug of the form `owner/task-name`.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Remote operations against the workflow platform.
///
/// The trait exists so the aggregation and resolution logic can be
/// exercised against in-memory fakes; [`crate::WorkflowClient`] is the
/// production implementation.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Trigger the audit workflow for a target URL, returning the root
    /// run identifier.
    async fn start_run(&self, target_url: &str) -> Result<TaskRunId, WorkflowError>;

    /// Fetch one task run by id.
    async fn get_run(&self, id: &TaskRunId) -> Result<TaskRunRecord, WorkflowError>;

    /// List runs spawned under a root run, in platform order.
    ///
    /// The platform caps this at `limit` entries with no pagination;
    /// runs beyond the cap are silently truncated.
    async fn list_child_runs(
        &self,
        root: &TaskRunId,
        limit: u32,
    ) -> Result<Vec<TaskRunRecord>, WorkflowError>;

    /// Fetch display metadata for a task definition.
    async fn get_task_definition(&self, id: &TaskDefId)
        -> Result<TaskDefinition, WorkflowError>;

    /// Fetch the result payload of a completed run.
    async fn get_run_result(&self, id: &TaskRunId) -> Result<Value, WorkflowError>;
}
