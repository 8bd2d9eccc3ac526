//! Run status as reported by the workflow platform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task run.
///
/// The platform reports an open-ended set of string states ("completed",
/// "running", "failed", ...). This type deliberately does not enumerate
/// them; the only state with attached semantics on this side is
/// `"completed"`, which unlocks fetching the result payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunStatus(String);

impl RunStatus {
    /// The single state that unlocks result fetching.
    pub const COMPLETED: &'static str = "completed";

    /// Create a status from a platform-reported string.
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the run has completed and a result payload exists.
    pub fn is_completed(&self) -> bool {
        self.0 == Self::COMPLETED
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RunStatus {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RunStatus {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_unlocks_results() {
        assert!(RunStatus::new("completed").is_completed());
        assert!(!RunStatus::new("running").is_completed());
        assert!(!RunStatus::new("failed").is_completed());
        // Unknown states pass through untouched.
        assert!(!RunStatus::new("some_future_state").is_completed());
    }

    #[test]
    fn test_status_serde_transparent() {
        let status: RunStatus = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(status.as_str(), "running");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"running\"");
    }
}
