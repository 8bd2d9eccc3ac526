//! Aggregation of a root run and its spawned children into one report.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use seoaudit_core::{AuditReport, ChildTaskSummary, TaskDefId, TaskRunId};

use crate::api::{TaskRunRecord, WorkflowApi};
use crate::error::WorkflowError;
use crate::resolver::NameResolver;

/// Cap on the child-run listing. The platform contract offers no
/// pagination; runs beyond the cap are silently truncated.
const CHILD_RUN_LIMIT: u32 = 100;

/// Builds an [`AuditReport`] for a root run by fanning out over its
/// spawned child runs and resolving their task names.
pub struct StatusAggregator {
    client: Arc<dyn WorkflowApi>,
    resolver: NameResolver,
}

impl StatusAggregator {
    /// Create an aggregator over a client and a name resolver.
    pub fn new(client: Arc<dyn WorkflowApi>, resolver: NameResolver) -> Self {
        Self { client, resolver }
    }

    /// Aggregate the status of a root run.
    ///
    /// The root fetch is the primary object of the request: its failure
    /// propagates. The child listing and the result fetch are secondary:
    /// their failures are logged and absorbed, degrading the report
    /// instead of failing it.
    pub async fn aggregate(&self, root_id: &TaskRunId) -> Result<AuditReport, WorkflowError> {
        let root = self.client.get_run(root_id).await?;

        let children = match self.client.list_child_runs(root_id, CHILD_RUN_LIMIT).await {
            Ok(runs) => {
                debug!(root_id = %root_id, count = runs.len(), "Fetched spawned task runs");
                runs
            }
            Err(e) => {
                warn!(root_id = %root_id, error = %e, "Could not fetch spawned task runs");
                Vec::new()
            }
        };

        // The root must not appear as its own child, even if the platform
        // includes it in the listing.
        let children: Vec<TaskRunRecord> = children
            .into_iter()
            .filter(|run| &run.id != root_id)
            .collect();

        let names = self.prefetch_names(&children).await;
        let tasks = build_summaries(&children, &names);

        let results = if root.status.is_completed() {
            match self.client.get_run_result(root_id).await {
                Ok(payload) => Some(payload),
                Err(e) => {
                    warn!(root_id = %root_id, error = %e, "Could not fetch run results");
                    None
                }
            }
        } else {
            None
        };

        Ok(AuditReport {
            id: root.id,
            status: root.status,
            retries: root.retries,
            tasks,
            results,
        })
    }

    /// Resolve each distinct definition id referenced by the children
    /// exactly once, so children sharing a definition share one lookup.
    async fn prefetch_names(&self, children: &[TaskRunRecord]) -> HashMap<TaskDefId, String> {
        let mut names = HashMap::new();
        for child in children {
            if let Some(def_id) = &child.task_id {
                if !names.contains_key(def_id) {
                    let name = self.resolver.resolve(def_id).await;
                    names.insert(def_id.clone(), name);
                }
            }
        }
        names
    }
}

/// Pure mapping pass over the platform-ordered child records, using the
/// pre-fetched name map.
fn build_summaries(
    children: &[TaskRunRecord],
    names: &HashMap<TaskDefId, String>,
) -> Vec<ChildTaskSummary> {
    children
        .iter()
        .map(|run| {
            let task_name = run
                .task_id
                .as_ref()
                .map(|id| {
                    names
                        .get(id)
                        .cloned()
                        .unwrap_or_else(|| id.as_str().to_string())
                })
                .unwrap_or_default();

            ChildTaskSummary {
                id: run.id.clone(),
                status: run.status.clone(),
                task_name,
                started_at: run.started_at,
                completed_at: run.completed_at,
                input: run.first_input().cloned(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use seoaudit_core::RunStatus;

    use crate::api::TaskDefinition;
    use crate::cache::TaskNameCache;

    fn run(id: &str, task_id: Option<&str>, status: &str) -> TaskRunRecord {
        TaskRunRecord {
            id: TaskRunId::new(id),
            task_id: task_id.map(TaskDefId::new),
            status: RunStatus::new(status),
            retries: 0,
            started_at: None,
            completed_at: None,
            input: vec![json!("https://example.com")],
        }
    }

    /// Scripted platform for aggregation tests.
    struct MockPlatform {
        root: TaskRunRecord,
        children: Vec<TaskRunRecord>,
        fail_root: bool,
        fail_children: bool,
        fail_result: bool,
        list_calls: AtomicUsize,
        def_lookups: AtomicUsize,
        result_calls: AtomicUsize,
    }

    impl MockPlatform {
        fn new(root: TaskRunRecord, children: Vec<TaskRunRecord>) -> Self {
            Self {
                root,
                children,
                fail_root: false,
                fail_children: false,
                fail_result: false,
                list_calls: AtomicUsize::new(0),
                def_lookups: AtomicUsize::new(0),
                result_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WorkflowApi for MockPlatform {
        async fn start_run(&self, _target_url: &str) -> Result<TaskRunId, WorkflowError> {
            unimplemented!("not used by the aggregator")
        }

        async fn get_run(&self, id: &TaskRunId) -> Result<TaskRunRecord, WorkflowError> {
            if self.fail_root {
                return Err(WorkflowError::NotFound(id.as_str().to_string()));
            }
            Ok(self.root.clone())
        }

        async fn list_child_runs(
            &self,
            _root: &TaskRunId,
            _limit: u32,
        ) -> Result<Vec<TaskRunRecord>, WorkflowError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_children {
                return Err(WorkflowError::Remote {
                    status: 500,
                    message: "listing failed".to_string(),
                });
            }
            Ok(self.children.clone())
        }

        async fn get_task_definition(
            &self,
            id: &TaskDefId,
        ) -> Result<TaskDefinition, WorkflowError> {
            self.def_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(TaskDefinition {
                name: Some(format!("name-of-{}", id)),
                slug: None,
            })
        }

        async fn get_run_result(&self, _id: &TaskRunId) -> Result<Value, WorkflowError> {
            self.result_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_result {
                return Err(WorkflowError::Remote {
                    status: 500,
                    message: "results unavailable".to_string(),
                });
            }
            Ok(json!({"score": 87}))
        }
    }

    fn aggregator_over(platform: Arc<MockPlatform>) -> StatusAggregator {
        let resolver = NameResolver::new(platform.clone(), Arc::new(TaskNameCache::new()));
        StatusAggregator::new(platform, resolver)
    }

    #[tokio::test]
    async fn test_root_failure_propagates_without_listing_children() {
        let mut platform = MockPlatform::new(run("trn-root", None, "running"), vec![]);
        platform.fail_root = true;
        let platform = Arc::new(platform);
        let aggregator = aggregator_over(platform.clone());

        let err = aggregator
            .aggregate(&TaskRunId::new("trn-root"))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::NotFound(_)));
        assert_eq!(platform.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_child_listing_failure_degrades_to_empty_tasks() {
        let mut root = run("trn-root", None, "running");
        root.retries = 3;
        let mut platform = MockPlatform::new(root, vec![]);
        platform.fail_children = true;
        let aggregator = aggregator_over(Arc::new(platform));

        let report = aggregator
            .aggregate(&TaskRunId::new("trn-root"))
            .await
            .unwrap();

        assert!(report.tasks.is_empty());
        assert_eq!(report.status.as_str(), "running");
        assert_eq!(report.retries, 3);
    }

    #[tokio::test]
    async fn test_shared_definition_resolved_once() {
        let platform = Arc::new(MockPlatform::new(
            run("trn-root", None, "running"),
            vec![
                run("trn-c1", Some("tsk-shared"), "completed"),
                run("trn-c2", Some("tsk-shared"), "running"),
            ],
        ));
        let aggregator = aggregator_over(platform.clone());

        let report = aggregator
            .aggregate(&TaskRunId::new("trn-root"))
            .await
            .unwrap();

        assert_eq!(platform.def_lookups.load(Ordering::SeqCst), 1);
        assert_eq!(report.tasks.len(), 2);
        assert!(report
            .tasks
            .iter()
            .all(|t| t.task_name == "name-of-tsk-shared"));
    }

    #[tokio::test]
    async fn test_children_keep_platform_order() {
        let platform = Arc::new(MockPlatform::new(
            run("trn-root", None, "running"),
            vec![
                run("trn-c2", Some("tsk-b"), "running"),
                run("trn-c1", Some("tsk-a"), "completed"),
                run("trn-c3", Some("tsk-a"), "pending"),
            ],
        ));
        let aggregator = aggregator_over(platform);

        let report = aggregator
            .aggregate(&TaskRunId::new("trn-root"))
            .await
            .unwrap();

        let ids: Vec<&str> = report.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["trn-c2", "trn-c1", "trn-c3"]);
    }

    #[tokio::test]
    async fn test_root_excluded_from_its_own_children() {
        let platform = Arc::new(MockPlatform::new(
            run("trn-root", None, "running"),
            vec![
                run("trn-root", Some("tsk-root"), "running"),
                run("trn-c1", Some("tsk-a"), "running"),
            ],
        ));
        let aggregator = aggregator_over(platform);

        let report = aggregator
            .aggregate(&TaskRunId::new("trn-root"))
            .await
            .unwrap();

        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].id.as_str(), "trn-c1");
    }

    #[tokio::test]
    async fn test_results_attached_only_when_completed() {
        let platform = Arc::new(MockPlatform::new(
            run("trn-root", None, "completed"),
            vec![],
        ));
        let aggregator = aggregator_over(platform.clone());

        let report = aggregator
            .aggregate(&TaskRunId::new("trn-root"))
            .await
            .unwrap();

        assert_eq!(report.results, Some(json!({"score": 87})));
        assert_eq!(platform.result_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_result_fetch_for_incomplete_root() {
        let platform = Arc::new(MockPlatform::new(run("trn-root", None, "running"), vec![]));
        let aggregator = aggregator_over(platform.clone());

        let report = aggregator
            .aggregate(&TaskRunId::new("trn-root"))
            .await
            .unwrap();

        assert_eq!(report.results, None);
        assert_eq!(platform.result_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_result_fetch_failure_absorbed() {
        let mut platform = MockPlatform::new(run("trn-root", None, "completed"), vec![]);
        platform.fail_result = true;
        let aggregator = aggregator_over(Arc::new(platform));

        let report = aggregator
            .aggregate(&TaskRunId::new("trn-root"))
            .await
            .unwrap();

        assert_eq!(report.status.as_str(), "completed");
        assert_eq!(report.results, None);
    }

    #[test]
    fn test_build_summaries_takes_first_input() {
        let mut record = run("trn-c1", Some("tsk-a"), "running");
        record.input = vec![json!("https://example.com"), json!({"depth": 2})];
        let mut names = HashMap::new();
        names.insert(TaskDefId::new("tsk-a"), "crawl".to_string());

        let summaries = build_summaries(&[record], &names);

        assert_eq!(summaries[0].input, Some(json!("https://example.com")));
        assert_eq!(summaries[0].task_name, "crawl");
    }

    #[test]
    fn test_build_summaries_without_definition_id() {
        let record = run("trn-c1", None, "running");
        let summaries = build_summaries(&[record], &HashMap::new());
        assert_eq!(summaries[0].task_name, "");
        assert_eq!(summaries[0].input, Some(json!("https://example.com")));
    }
}
