//! The currently deployed sentiment model

use crate::domain::types::{Accuracy, ModelId, ModelVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the model shown before any training run
pub const SEED_MODEL_ID: &str = "model-abc123";

/// Accuracy of the model shown before any training run
pub const SEED_ACCURACY: f64 = 0.8745;

/// Version of the model shown before any training run
pub const SEED_VERSION: &str = "20241227143052";

/// Whether the model is serving predictions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Inactive => f.write_str("inactive"),
        }
    }
}

/// Metadata of the current model
///
/// Only a training run replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    #[serde(rename = "modelId", alias = "model_id")]
    pub id: ModelId,
    pub accuracy: Accuracy,
    pub version: ModelVersion,
    /// Training services that do not report a status serve what they trained
    #[serde(default)]
    pub status: ModelStatus,
    #[serde(default = "Utc::now", alias = "last_updated")]
    pub last_updated: DateTime<Utc>,
}

impl ModelInfo {
    /// The model the dashboard starts with
    pub fn seed() -> Self {
        Self {
            id: ModelId::try_new(SEED_MODEL_ID.to_string())
                .expect("SEED_MODEL_ID constant should be a valid model id"),
            accuracy: Accuracy::try_new(SEED_ACCURACY)
                .expect("SEED_ACCURACY constant should be in range"),
            version: ModelVersion::try_new(SEED_VERSION.to_string())
                .expect("SEED_VERSION constant should be a valid version"),
            status: ModelStatus::Active,
            last_updated: Utc::now(),
        }
    }

    /// The same model after a training run finished at `at`
    ///
    /// Identity and status carry over; accuracy and version are replaced.
    pub fn retrained(&self, accuracy: Accuracy, at: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            accuracy,
            version: ModelVersion::stamped_at(at),
            status: self.status,
            last_updated: at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ModelStatus::Active
    }
}
