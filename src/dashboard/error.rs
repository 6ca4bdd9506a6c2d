use crate::services::ServiceError;
use thiserror::Error;

/// Why a dashboard operation was refused or failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("Prediction text must not be empty")]
    EmptyText,

    #[error("Invalid prediction text: {0}")]
    InvalidText(String),

    #[error("A prediction is already pending")]
    PredictionPending,

    #[error("A training run is already in progress")]
    TrainingInProgress,

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Dashboard is not running")]
    Stopped,
}

impl DashboardError {
    /// Rejected locally, before any backend call was made
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyText | Self::InvalidText(_))
    }

    /// Refused because the same kind of operation is still running
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::PredictionPending | Self::TrainingInProgress)
    }
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;
