//! Shared application state.

use std::sync::Arc;

use seoaudit_workflows::{
    NameResolver, StatusAggregator, TaskNameCache, WorkflowApi, WorkflowClient,
};

use crate::config::Config;
use crate::http::rate_limit::{new_ip_limiter, IpRateLimiter};

/// Requests per minute allowed on the start-audit route, per client IP.
const START_AUDIT_RATE_LIMIT: u32 = 10;

/// Shared application state.
///
/// The name cache inside the aggregator is the only mutable state; it is
/// constructed once here and lives for the process.
pub struct AppState {
    /// Loaded configuration.
    pub config: Config,

    /// Workflow platform client, used directly by the start handler.
    pub client: Arc<dyn WorkflowApi>,

    /// Status aggregation over the same client and a shared name cache.
    pub aggregator: StatusAggregator,

    /// Per-IP limiter for the start-audit route.
    pub start_limiter: IpRateLimiter,
}

impl AppState {
    /// Create state with the production workflow client.
    pub fn new(config: Config) -> Arc<Self> {
        let client: Arc<dyn WorkflowApi> = Arc::new(WorkflowClient::new(
            &config.api_base_url,
            config.api_key.as_str(),
            config.audit_task_slug.as_str(),
        ));
        Self::with_client(config, client)
    }

    /// Create state over an arbitrary [`WorkflowApi`] implementation.
    pub fn with_client(config: Config, client: Arc<dyn WorkflowApi>) -> Arc<Self> {
        let cache = Arc::new(TaskNameCache::new());
        let resolver = NameResolver::new(client.clone(), cache);
        let aggregator = StatusAggregator::new(client.clone(), resolver);

        Arc::new(Self {
            config,
            client,
            aggregator,
            start_limiter: new_ip_limiter(START_AUDIT_RATE_LIMIT),
        })
    }
}
