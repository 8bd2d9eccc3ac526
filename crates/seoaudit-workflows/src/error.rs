//! Error types for workflow platform calls.

use thiserror::Error;

/// Errors that can occur when talking to the workflow platform.
///
/// Every failure a remote call can produce resolves to exactly one
/// variant; the boundary layer maps these onto HTTP outcomes.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Caller-supplied input was rejected before any remote call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The platform reports no such resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// The platform rejected the request (HTTP 4xx other than 404).
    #[error("HTTP {status}: {message}")]
    Client { status: u16, message: String },

    /// The platform failed to serve the request (HTTP 5xx).
    #[error("HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// Transport-level failure, including per-call timeouts.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl WorkflowError {
    /// Returns true if the failure is caller-caused (4xx-class).
    pub fn client_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::NotFound(_) | Self::Client { .. }
        )
    }
}
