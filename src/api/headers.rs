//! HTTP header names and route paths served by the API
//!
//! Remote backends use the same paths, so they are kept in one place.

/// Header name for request ID used for tracing and correlation
pub const X_REQUEST_ID: &str = "x-request-id";

/// Content type of every JSON body
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Well-known paths
pub mod paths {
    /// Liveness check
    pub const HEALTH: &str = "/health";

    /// Classify a text
    pub const PREDICT: &str = "/api/v1/predict";

    /// Trigger a training run
    pub const TRAIN: &str = "/api/v1/train";

    /// Current model
    pub const MODEL_INFO: &str = "/api/v1/model/info";
    pub const MODEL_STATUS: &str = "/api/v1/model/status";

    /// Live metrics
    pub const METRICS: &str = "/api/v1/metrics";
    pub const METRICS_PREDICTIONS: &str = "/api/v1/metrics/predictions";
    pub const METRICS_MODEL: &str = "/api/v1/metrics/model";
    pub const METRICS_ALERT: &str = "/api/v1/metrics/alert";

    /// Newest-first recent predictions
    pub const RECENT_PREDICTIONS: &str = "/api/v1/predictions/recent";

    /// Dashboard view state
    pub const DASHBOARD: &str = "/api/v1/dashboard";
    pub const DASHBOARD_TAB: &str = "/api/v1/dashboard/tab";
    pub const DASHBOARD_DRAFT: &str = "/api/v1/dashboard/draft";
    pub const DASHBOARD_DRAFT_SUBMIT: &str = "/api/v1/dashboard/draft/submit";
}
