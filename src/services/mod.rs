//! Prediction and training backends
//!
//! The dashboard only talks to the [`PredictionService`] and
//! [`TrainingService`] traits. Two families implement them:
//!
//! - **Simulated**: local randomness behind artificial, non-blocking latency
//! - **Remote**: JSON over HTTP against a real serving/training deployment

pub mod remote;
pub mod simulated;
pub mod ticker;

use crate::domain::{ModelInfo, PredictionResult, PredictionText};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use remote::{RemotePredictionService, RemoteTrainingService};
pub use simulated::{SimulatedPredictor, SimulatedTrainer, SimulationProfile};
pub use ticker::MetricsTicker;

/// Classifies text
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Short backend name used in logs
    fn id(&self) -> &'static str;

    /// Classify `text`; callers have already rejected blank input
    async fn predict(&self, text: &PredictionText) -> ServiceResult<PredictionResult>;
}

/// Produces new model versions
#[async_trait]
pub trait TrainingService: Send + Sync {
    /// Short backend name used in logs
    fn id(&self) -> &'static str;

    /// Run a training pass starting from the `current` model
    async fn train(&self, current: &ModelInfo) -> ServiceResult<ModelInfo>;
}

/// Failure of a backend call
///
/// All variants are transient from the dashboard's point of view: nothing is
/// retried automatically and state is left as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Operation aborted: {0}")]
    Aborted(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
