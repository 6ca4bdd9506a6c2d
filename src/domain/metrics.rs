//! Serving metrics shown on the overview and monitor panels

use crate::domain::{
    model::ModelInfo,
    types::{Confidence, ModelVersion, PredictionCount, Ratio, RequestsPerHour},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod seed {
    pub const TOTAL_PREDICTIONS: u64 = 127;
    pub const POSITIVE_RATIO: f64 = 0.6535;
    pub const AVG_CONFIDENCE: f64 = 0.8234;
    pub const REQUESTS_PER_HOUR: u32 = 45;
    pub const ERROR_RATE: f64 = 0.02;
}

/// Aggregate serving metrics
///
/// The ticker moves `total_predictions` and `requests_per_hour`; the other
/// fields keep their seed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_predictions: PredictionCount,
    pub positive_ratio: Ratio,
    pub avg_confidence: Confidence,
    pub requests_per_hour: RequestsPerHour,
    pub error_rate: Ratio,
}

impl Metrics {
    pub fn seed() -> Self {
        Self {
            total_predictions: PredictionCount::new(seed::TOTAL_PREDICTIONS),
            positive_ratio: Ratio::try_new(seed::POSITIVE_RATIO).expect("seed ratio is in range"),
            avg_confidence: Confidence::try_new(seed::AVG_CONFIDENCE)
                .expect("seed confidence is in range"),
            requests_per_hour: RequestsPerHour::new(seed::REQUESTS_PER_HOUR),
            error_rate: Ratio::try_new(seed::ERROR_RATE).expect("seed error rate is in range"),
        }
    }

    /// Apply one refresh: the total only grows, the throughput is replaced
    pub fn record_tick(&mut self, new_predictions: u64, requests_per_hour: RequestsPerHour) {
        self.total_predictions = self.total_predictions.add(new_predictions);
        self.requests_per_hour = requests_per_hour;
    }
}

/// Prediction-side view of the metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionMetrics {
    pub total_predictions: PredictionCount,
    pub positive_ratio: Ratio,
    pub avg_confidence: Confidence,
    pub timestamp: DateTime<Utc>,
}

impl PredictionMetrics {
    pub fn from_metrics(metrics: &Metrics, now: DateTime<Utc>) -> Self {
        Self {
            total_predictions: metrics.total_predictions,
            positive_ratio: metrics.positive_ratio,
            avg_confidence: metrics.avg_confidence,
            timestamp: now,
        }
    }
}

/// Model-side view of the metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub model_version: ModelVersion,
    pub last_updated: DateTime<Utc>,
    pub requests_per_hour: RequestsPerHour,
    pub error_rate: Ratio,
    pub timestamp: DateTime<Utc>,
}

impl ModelMetrics {
    pub fn from_parts(model: &ModelInfo, metrics: &Metrics, now: DateTime<Utc>) -> Self {
        Self {
            model_version: model.version.clone(),
            last_updated: model.last_updated,
            requests_per_hour: metrics.requests_per_hour,
            error_rate: metrics.error_rate,
            timestamp: now,
        }
    }
}
