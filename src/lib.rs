//! Sentiment Ops - dashboard service for a simulated sentiment-analysis pipeline
//!
//! A single dashboard task owns model info, live metrics and recent
//! predictions. Predictions and training runs go through pluggable backends,
//! simulated by default, and everything is exposed over a JSON HTTP API.

pub mod api;
pub mod application;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod services;

pub use application::Application;
pub use dashboard::{Dashboard, DashboardConfig, DashboardError, DashboardHandle};
pub use error::{Error, Result};
