//! Log message constants
//!
//! This module centralizes the log messages used throughout the service to
//! keep wording consistent between components.

/// Application startup and lifecycle messages
pub mod application {
    pub const STARTING: &str = "Starting Sentiment Ops application";
    pub const LISTENING: &str = "Sentiment Ops server listening";
    pub const SHUTDOWN_SIGNAL: &str = "Shutdown signal received";
    pub const STOPPED: &str = "Sentiment Ops application stopped";
    pub const BACKEND_SELECTED: &str = "Prediction and training backends selected";
    pub const DASHBOARD_TASK_FAILED: &str = "Dashboard task ended abnormally";
    pub const SIGNAL_HANDLER_FAILED: &str = "Failed to listen for the shutdown signal";
}

/// Dashboard actor messages
pub mod dashboard {
    pub const STARTED: &str = "Dashboard started";
    pub const STOPPING: &str = "Dashboard shutting down";
    pub const STOPPED: &str = "Dashboard stopped";
    pub const TAB_SELECTED: &str = "Tab selected";
    pub const PREDICTION_STARTED: &str = "Prediction started";
    pub const PREDICTION_RECORDED: &str = "Prediction recorded";
    pub const PREDICTION_FAILED: &str = "Prediction failed";
    pub const PREDICTION_REJECTED: &str = "Prediction rejected";
    pub const TRAINING_STARTED: &str = "Training started";
    pub const TRAINING_FINISHED: &str = "Training finished";
    pub const TRAINING_FAILED: &str = "Training failed";
    pub const TRAINING_REJECTED: &str = "Training rejected";
    pub const METRICS_REFRESHED: &str = "Metrics refreshed";
    pub const ALERT_RAISED: &str = "Monitoring alert raised";
    pub const OPERATION_PANICKED: &str = "Background operation terminated abnormally";
    pub const ORPHANED_OUTCOME: &str = "Discarding outcome with no pending operation";
}

/// Simulated backend messages
pub mod simulation {
    pub const PREDICTION_COMPLETED: &str = "Simulated prediction completed";
    pub const PREDICTION_FAILURE_INJECTED: &str = "Simulated prediction failure injected";
    pub const TRAINING_COMPLETED: &str = "Simulated training completed";
    pub const TRAINING_FAILURE_INJECTED: &str = "Simulated training failure injected";
}

/// Remote backend messages
pub mod remote {
    pub const RESPONSE_RECEIVED: &str = "Remote backend responded";
    pub const UPSTREAM_UNAVAILABLE: &str = "Remote backend returned a server error";
    pub const TRAINING_REQUESTED: &str = "Requesting remote training run";
}

/// API handler messages
pub mod api {
    pub const MODEL_VERSION_IGNORED: &str = "Requested model version ignored";
    pub const TRAINING_REQUESTED: &str = "Training requested over HTTP";
}

/// HTTP request processing messages
pub mod http {
    pub const INCOMING_REQUEST: &str = "Incoming request";
    pub const REQUEST_COMPLETED: &str = "Request completed";
    pub const REQUEST_FAILED: &str = "Request failed";
}
