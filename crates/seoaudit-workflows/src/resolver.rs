//! Cached resolution of task definition ids into display names.

use std::sync::Arc;

use tracing::{debug, warn};

use seoaudit_core::TaskDefId;

use crate::api::{TaskDefinition, WorkflowApi};
use crate::cache::TaskNameCache;

/// Resolves task definition ids to display names through a shared
/// [`TaskNameCache`], falling back to one remote lookup per miss.
pub struct NameResolver {
    client: Arc<dyn WorkflowApi>,
    cache: Arc<TaskNameCache>,
}

impl NameResolver {
    /// Create a resolver over a client and an explicitly constructed cache.
    pub fn new(client: Arc<dyn WorkflowApi>, cache: Arc<TaskNameCache>) -> Self {
        Self { client, cache }
    }

    /// Resolve a definition id to its display name.
    ///
    /// A live cache entry short-circuits the remote lookup. On a miss the
    /// definition metadata is fetched and the computed name cached with a
    /// fresh expiry. Failures never propagate: the raw id is returned as a
    /// degraded name so resolution can never block status reporting.
    pub async fn resolve(&self, id: &TaskDefId) -> String {
        if let Some(name) = self.cache.get(id).await {
            return name;
        }

        match self.client.get_task_definition(id).await {
            Ok(def) => {
                let name = display_name(id, &def);
                self.cache.insert(id.clone(), name.clone()).await;
                debug!(task_def_id = %id, name = %name, "Resolved task name");
                name
            }
            Err(e) => {
                warn!(task_def_id = %id, error = %e, "Could not fetch task definition");
                id.as_str().to_string()
            }
        }
    }
}

/// Deterministic fallback chain for a definition's display name:
/// non-empty `name`, else the last path segment of `slug`, else the id.
fn display_name(id: &TaskDefId, def: &TaskDefinition) -> String {
    if let Some(name) = def.name.as_deref() {
        if !name.is_empty() {
            return name.to_string();
        }
    }
    if let Some(slug) = def.slug.as_deref() {
        if let Some((_, last)) = slug.rsplit_once('/') {
            return last.to_string();
        }
    }
    id.as_str().to_string()
}
