//! Request and response bodies of the HTTP API
//!
//! Bodies are camelCase JSON. Request fields also accept the snake_case
//! names older clients send.

use crate::dashboard::{PredictState, TrainingState};
use crate::domain::{AlertSeverity, ModelInfo, ModelStatus, ModelVersion, Tab};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "sentiment-ops";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub text: String,
    /// Accepted for compatibility; the current model always answers
    #[serde(default, alias = "model_version", skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRequest {
    #[serde(default)]
    pub retrain: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: AlertSeverity,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TabRequest {
    pub tab: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DraftRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatusResponse {
    pub model_loaded: bool,
    pub version: ModelVersion,
    pub last_updated: DateTime<Utc>,
    pub status: ModelStatus,
    pub training: TrainingState,
}

impl ModelStatusResponse {
    pub fn new(model: &ModelInfo, training: TrainingState) -> Self {
        Self {
            model_loaded: model.is_active(),
            version: model.version.clone(),
            last_updated: model.last_updated,
            status: model.status,
            training,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabResponse {
    pub tab: Tab,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub draft: String,
    pub can_submit_prediction: bool,
    pub predict: PredictState,
}
