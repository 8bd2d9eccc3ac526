//! HTTP client for the workflow platform's REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use seoaudit_core::{TaskDefId, TaskRunId};

use crate::api::{TaskDefinition, TaskRunRecord, WorkflowApi};
use crate::error::WorkflowError;

/// Fixed per-call timeout for every remote operation.
const CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed [`WorkflowApi`] implementation.
///
/// Bearer-token authenticated; no retries at this layer (the platform
/// owns retry semantics for the workflow itself).
pub struct WorkflowClient {
    inner: reqwest::Client,
    base_url: String,
    api_key: String,
    audit_task_slug: String,
}

impl WorkflowClient {
    /// Create a new client against the given API base URL.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        audit_task_slug: impl Into<String>,
    ) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            audit_task_slug: audit_task_slug.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-2xx response to the matching error variant.
    async fn check(response: reqwest::Response, context: &str) -> Result<reqwest::Response, WorkflowError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(body) if !body.is_empty() => format!("{}: {}", context, body),
            _ => context.to_string(),
        };

        if status == StatusCode::NOT_FOUND {
            Err(WorkflowError::NotFound(message))
        } else if status.is_client_error() {
            Err(WorkflowError::Client {
                status: status.as_u16(),
                message,
            })
        } else {
            Err(WorkflowError::Remote {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, WorkflowError> {
        response
            .json()
            .await
            .map_err(|e| WorkflowError::Serialization(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WorkflowError> {
        let url = self.url(path);
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .get(&url)
            .query(query)
            .bearer_auth(&self.api_key)
            .timeout(CALL_TIMEOUT)
            .send()
            .await?;

        Self::decode(Self::check(response, path).await?).await
    }
}

#[async_trait]
impl WorkflowApi for WorkflowClient {
    async fn start_run(&self, target_url: &str) -> Result<TaskRunId, WorkflowError> {
        let url = self.url("/task-runs");
        debug!(url = %url, task_slug = %self.audit_task_slug, "Starting audit run");

        let response = self
            .inner
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(CALL_TIMEOUT)
            .json(&json!({
                "taskSlug": self.audit_task_slug,
                "input": [target_url],
            }))
            .send()
            .await?;

        let record: TaskRunRecord = Self::decode(Self::check(response, "start run").await?).await?;
        Ok(record.id)
    }

    async fn get_run(&self, id: &TaskRunId) -> Result<TaskRunRecord, WorkflowError> {
        self.get_json(&format!("/task-runs/{}", id), &[]).await
    }

    async fn list_child_runs(
        &self,
        root: &TaskRunId,
        limit: u32,
    ) -> Result<Vec<TaskRunRecord>, WorkflowError> {
        self.get_json(
            "/task-runs",
            &[
                ("rootTaskRunId", root.as_str().to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn get_task_definition(
        &self,
        id: &TaskDefId,
    ) -> Result<TaskDefinition, WorkflowError> {
        self.get_json(&format!("/tasks/{}", id), &[]).await
    }

    async fn get_run_result(&self, id: &TaskRunId) -> Result<Value, WorkflowError> {
        self.get_json(&format!("/task-runs/{}/results", id), &[]).await
    }
}
