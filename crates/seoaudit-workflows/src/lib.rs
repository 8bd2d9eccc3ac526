//! Workflow platform client and audit status aggregation.
//!
//! This crate owns every remote interaction with the hosted workflow
//! platform plus the two pieces of logic built on top of it:
//!
//! - [`WorkflowApi`] / [`WorkflowClient`] — the REST client seam.
//! - [`TaskNameCache`] / [`NameResolver`] — bounded TTL + LRU resolution of
//!   task definition ids into display names.
//! - [`StatusAggregator`] — merges a root run with its spawned child runs
//!   into one [`seoaudit_core::AuditReport`].

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod error;
pub mod http;
pub mod resolver;

pub use aggregate::StatusAggregator;
pub use api::{TaskDefinition, TaskRunRecord, WorkflowApi};
pub use cache::TaskNameCache;
pub use error::WorkflowError;
pub use http::WorkflowClient;
pub use resolver::NameResolver;
