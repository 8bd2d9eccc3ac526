//! Newtype wrappers for identifiers to ensure type safety.
//!
//! Both identifiers are opaque strings minted by the workflow platform;
//! no internal structure is assumed.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one task run (a workflow execution).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskRunId(String);

impl TaskRunId {
    /// Create a new TaskRunId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random TaskRunId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaskRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskRunId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskRunId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifier for a task definition (a *kind* of task, not an instance).
///
/// Many [`TaskRunId`]s can share one TaskDefId.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDefId(String);

impl TaskDefId {
    /// Create a new TaskDefId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random TaskDefId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaskDefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskDefId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskDefId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_run_id_generate() {
        let id1 = TaskRunId::generate();
        let id2 = TaskRunId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_display() {
        let id = TaskRunId::new("trn-123");
        assert_eq!(format!("{}", id), "trn-123");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = TaskDefId::new("tsk-abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"tsk-abc\"");
        let back: TaskDefId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
