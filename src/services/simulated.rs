//! Simulated prediction and training backends
//!
//! Both backends sleep on a tokio timer for their artificial latency, so the
//! caller's task is parked rather than blocked. Randomness comes from a
//! seeded `StdRng` behind a short-lived lock that is never held across an
//! await point.

use crate::domain::{
    Accuracy, Confidence, FailureRate, ModelInfo, PredictionId, PredictionResult,
    PredictionText, Sentiment,
};
use crate::infrastructure::log_messages::simulation as log_msg;
use crate::services::{PredictionService, ServiceError, ServiceResult, TrainingService};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::ops::Range;
use std::time::Duration;
use tracing::{debug, warn};

/// Range of simulated classification confidence
pub const CONFIDENCE_RANGE: Range<f64> = 0.7..1.0;

/// Range of simulated post-training accuracy
pub const ACCURACY_RANGE: Range<f64> = 0.88..0.98;

/// Artificial latency of a prediction
pub const DEFAULT_PREDICT_LATENCY: Duration = Duration::from_millis(1500);

/// Artificial latency of a training run
pub const DEFAULT_TRAIN_LATENCY: Duration = Duration::from_millis(3000);

/// Latency and failure behaviour shared by the simulated backends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationProfile {
    pub predict_latency: Duration,
    pub train_latency: Duration,
    pub failure_rate: FailureRate,
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            predict_latency: DEFAULT_PREDICT_LATENCY,
            train_latency: DEFAULT_TRAIN_LATENCY,
            failure_rate: FailureRate::never(),
        }
    }
}

impl SimulationProfile {
    /// No latency and no failures
    pub fn instant() -> Self {
        Self {
            predict_latency: Duration::ZERO,
            train_latency: Duration::ZERO,
            failure_rate: FailureRate::never(),
        }
    }

    pub fn with_failure_rate(mut self, failure_rate: FailureRate) -> Self {
        self.failure_rate = failure_rate;
        self
    }
}

fn roll_failure(rng: &mut StdRng, failure_rate: FailureRate) -> bool {
    let rate = failure_rate.into_inner();
    rate > 0.0 && rng.gen_bool(rate)
}

/// Keyword classifier with random confidence
pub struct SimulatedPredictor {
    latency: Duration,
    failure_rate: FailureRate,
    rng: Mutex<StdRng>,
}

impl SimulatedPredictor {
    pub fn new(profile: &SimulationProfile) -> Self {
        Self::with_rng(profile, StdRng::from_entropy())
    }

    /// Deterministic predictor for reproducible runs
    pub fn seeded(profile: &SimulationProfile, seed: u64) -> Self {
        Self::with_rng(profile, StdRng::seed_from_u64(seed))
    }

    fn with_rng(profile: &SimulationProfile, rng: StdRng) -> Self {
        Self {
            latency: profile.predict_latency,
            failure_rate: profile.failure_rate,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl PredictionService for SimulatedPredictor {
    fn id(&self) -> &'static str {
        "simulated"
    }

    async fn predict(&self, text: &PredictionText) -> ServiceResult<PredictionResult> {
        tokio::time::sleep(self.latency).await;

        let (failed, confidence) = {
            let mut rng = self.rng.lock();
            (
                roll_failure(&mut rng, self.failure_rate),
                rng.gen_range(CONFIDENCE_RANGE),
            )
        };

        if failed {
            warn!("{}", log_msg::PREDICTION_FAILURE_INJECTED);
            return Err(ServiceError::Unavailable(
                "simulated prediction backend unavailable".to_string(),
            ));
        }

        let result = PredictionResult {
            prediction_id: PredictionId::generate(),
            sentiment: Sentiment::classify(text.as_ref()),
            confidence: Confidence::try_new(confidence)
                .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?,
            timestamp: Utc::now(),
        };
        debug!(
            prediction_id = %result.prediction_id,
            sentiment = %result.sentiment,
            confidence = result.confidence.into_inner(),
            "{}",
            log_msg::PREDICTION_COMPLETED
        );
        Ok(result)
    }
}

/// Trainer that resamples accuracy and stamps a fresh version
pub struct SimulatedTrainer {
    latency: Duration,
    failure_rate: FailureRate,
    rng: Mutex<StdRng>,
}

impl SimulatedTrainer {
    pub fn new(profile: &SimulationProfile) -> Self {
        Self::with_rng(profile, StdRng::from_entropy())
    }

    /// Deterministic trainer for reproducible runs
    pub fn seeded(profile: &SimulationProfile, seed: u64) -> Self {
        Self::with_rng(profile, StdRng::seed_from_u64(seed))
    }

    fn with_rng(profile: &SimulationProfile, rng: StdRng) -> Self {
        Self {
            latency: profile.train_latency,
            failure_rate: profile.failure_rate,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl TrainingService for SimulatedTrainer {
    fn id(&self) -> &'static str {
        "simulated"
    }

    async fn train(&self, current: &ModelInfo) -> ServiceResult<ModelInfo> {
        tokio::time::sleep(self.latency).await;

        let (failed, accuracy) = {
            let mut rng = self.rng.lock();
            (
                roll_failure(&mut rng, self.failure_rate),
                rng.gen_range(ACCURACY_RANGE),
            )
        };

        if failed {
            warn!("{}", log_msg::TRAINING_FAILURE_INJECTED);
            return Err(ServiceError::Unavailable(
                "simulated training backend unavailable".to_string(),
            ));
        }

        let accuracy = Accuracy::try_new(accuracy)
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
        let retrained = current.retrained(accuracy, Utc::now());
        debug!(
            version = %retrained.version,
            accuracy = retrained.accuracy.into_inner(),
            "{}",
            log_msg::TRAINING_COMPLETED
        );
        Ok(retrained)
    }
}
