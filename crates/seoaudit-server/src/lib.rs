//! SEO Audit API Server Library
//!
//! Thin HTTP shell over the workflow platform: configuration, shared
//! state, and the axum router with its handlers and middleware.

pub mod config;
pub mod http;
pub mod state;

pub use config::Config;
pub use state::AppState;
