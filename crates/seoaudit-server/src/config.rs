//! Server configuration from environment variables.

use thiserror::Error;

/// Base URL of the platform's local development endpoint.
const LOCAL_DEV_BASE_URL: &str = "http://localhost:8120";

/// Token accepted by the local development endpoint.
const LOCAL_DEV_API_KEY: &str = "local-dev";

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_AUDIT_TASK_SLUG: &str = "seo-audit";

/// Configuration errors surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// PORT is not a valid TCP port number.
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the HTTP server binds to.
    pub port: u16,

    /// Bearer token for the workflow platform's REST API.
    pub api_key: String,

    /// Base URL of the workflow platform's REST API.
    pub api_base_url: String,

    /// Frontend origin for CORS restriction; any origin when unset.
    pub frontend_url: Option<String>,

    /// True when pointed at the platform's local development endpoint.
    pub use_local_dev: bool,

    /// Slug of the workflow the start endpoint triggers.
    pub audit_task_slug: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let use_local_dev = non_empty("WORKFLOW_USE_LOCAL_DEV")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let (api_key, api_base_url) = if use_local_dev {
            (LOCAL_DEV_API_KEY.to_string(), LOCAL_DEV_BASE_URL.to_string())
        } else {
            (
                non_empty("WORKFLOW_API_KEY").ok_or(ConfigError::MissingVar("WORKFLOW_API_KEY"))?,
                non_empty("WORKFLOW_API_BASE_URL")
                    .ok_or(ConfigError::MissingVar("WORKFLOW_API_BASE_URL"))?,
            )
        };

        Ok(Self {
            port,
            api_key,
            api_base_url,
            frontend_url: non_empty("FRONTEND_URL"),
            use_local_dev,
            audit_task_slug: non_empty("AUDIT_TASK_SLUG")
                .unwrap_or_else(|| DEFAULT_AUDIT_TASK_SLUG.to_string()),
        })
    }
}
