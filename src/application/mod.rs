//! Application wiring
//!
//! Builds the configured backends, starts the dashboard and serves the API
//! until shutdown.

pub mod app;

pub use app::{build_services, Application};
