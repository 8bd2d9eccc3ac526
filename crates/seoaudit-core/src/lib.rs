//! SEO Audit Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - The workflow platform's API
//! - Runtime specifics
//!
//! All types here represent the audit report shapes served to the frontend.

pub mod ids;
pub mod report;
pub mod status;

// Re-export commonly used types
pub use ids::{TaskDefId, TaskRunId};
pub use report::{AuditReport, ChildTaskSummary};
pub use status::RunStatus;
