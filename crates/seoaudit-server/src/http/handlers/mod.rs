//! Request handlers.

mod audit;
mod health;

pub use audit::{audit_status, start_audit};
pub use health::{health_check, index, service_status};
