//! Dashboard state and its transitions
//!
//! Every mutation of dashboard data goes through a method here. The methods
//! are synchronous; the actor in `actor.rs` decides when they run.

use crate::dashboard::error::{DashboardError, DashboardResult};
use crate::domain::{
    Alert, BoundedHistory, DisplayedPrediction, Metrics, ModelInfo, PredictionRecord,
    PredictionResult, PredictionText, RecentPredictions, Tab, RECENT_ALERTS_CAPACITY,
    RECENT_PREDICTIONS_CAPACITY,
};
use crate::services::{ticker::TickOutcome, MetricsTicker, ServiceResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Progress of the predict panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PredictState {
    #[default]
    Idle,
    Loading,
    Failed {
        reason: String,
    },
}

impl PredictState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Progress of the train panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TrainingState {
    #[default]
    Idle,
    Training,
    Failed {
        reason: String,
    },
}

impl TrainingState {
    pub fn is_training(&self) -> bool {
        matches!(self, Self::Training)
    }
}

/// Where the text of a prediction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionOrigin {
    /// The predict panel's draft
    Draft,
    /// Passed in directly, e.g. over the HTTP API
    Direct,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    tab: Tab,
    draft: String,
    predict: PredictState,
    training: TrainingState,
    last_result: Option<PredictionResult>,
    model: ModelInfo,
    metrics: Metrics,
    recent: RecentPredictions,
    alerts: BoundedHistory<Alert>,
    ticks: u64,
    last_refreshed: Option<DateTime<Utc>>,
}

impl DashboardState {
    /// Initial state with seed model, metrics and recent predictions
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let mut recent = RecentPredictions::with_capacity(RECENT_PREDICTIONS_CAPACITY);
        for record in PredictionRecord::seeded(now) {
            recent.push(record);
        }

        Self {
            tab: Tab::default(),
            draft: String::new(),
            predict: PredictState::Idle,
            training: TrainingState::Idle,
            last_result: None,
            model: ModelInfo::seed(),
            metrics: Metrics::seed(),
            recent,
            alerts: BoundedHistory::with_capacity(RECENT_ALERTS_CAPACITY),
            ticks: 0,
            last_refreshed: None,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn predict_state(&self) -> &PredictState {
        &self.predict
    }

    pub fn training_state(&self) -> &TrainingState {
        &self.training
    }

    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.last_result.as_ref()
    }

    pub fn model(&self) -> &ModelInfo {
        &self.model
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn recent(&self) -> &RecentPredictions {
        &self.recent
    }

    /// Switch panels; nothing else changes
    pub fn select_tab(&mut self, tab: Tab) -> Tab {
        self.tab = tab;
        self.tab
    }

    pub fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    /// Whether a submit would currently be accepted
    pub fn can_submit_prediction(&self) -> bool {
        !self.predict.is_loading() && !self.draft.trim().is_empty()
    }

    pub fn can_train(&self) -> bool {
        !self.training.is_training()
    }

    /// Validate `text` and mark a prediction as pending
    ///
    /// On rejection nothing changes.
    pub fn begin_prediction(&mut self, text: &str) -> DashboardResult<PredictionText> {
        if text.trim().is_empty() {
            return Err(DashboardError::EmptyText);
        }
        if self.predict.is_loading() {
            return Err(DashboardError::PredictionPending);
        }
        let text = PredictionText::try_new(text.to_string())
            .map_err(|e| DashboardError::InvalidText(e.to_string()))?;

        self.predict = PredictState::Loading;
        self.last_result = None;
        Ok(text)
    }

    /// Apply the outcome of a pending prediction
    ///
    /// A failure only moves the panel into the failed state; recent
    /// predictions, metrics and the model stay as they were.
    pub fn finish_prediction(
        &mut self,
        text: PredictionText,
        origin: PredictionOrigin,
        outcome: ServiceResult<PredictionResult>,
    ) -> DashboardResult<PredictionResult> {
        match outcome {
            Ok(result) => {
                if origin == PredictionOrigin::Draft && self.draft == *text.as_ref() {
                    self.draft.clear();
                }
                self.recent.push(PredictionRecord::from_result(text, &result));
                self.last_result = Some(result.clone());
                self.predict = PredictState::Idle;
                Ok(result)
            }
            Err(error) => {
                self.predict = PredictState::Failed {
                    reason: error.to_string(),
                };
                Err(error.into())
            }
        }
    }

    /// Mark training as running and hand out the model to train from
    pub fn begin_training(&mut self) -> DashboardResult<ModelInfo> {
        if self.training.is_training() {
            return Err(DashboardError::TrainingInProgress);
        }
        self.training = TrainingState::Training;
        Ok(self.model.clone())
    }

    /// Apply the outcome of a training run
    pub fn finish_training(
        &mut self,
        outcome: ServiceResult<ModelInfo>,
    ) -> DashboardResult<ModelInfo> {
        match outcome {
            Ok(model) => {
                self.model = model.clone();
                self.training = TrainingState::Idle;
                Ok(model)
            }
            Err(error) => {
                self.training = TrainingState::Failed {
                    reason: error.to_string(),
                };
                Err(error.into())
            }
        }
    }

    pub fn record_tick(&mut self, ticker: &mut MetricsTicker, now: DateTime<Utc>) -> TickOutcome {
        let outcome = ticker.tick(&mut self.metrics);
        self.ticks += 1;
        self.last_refreshed = Some(now);
        outcome
    }

    /// Store an alert, returning it as stored
    ///
    /// Ids carry one-second resolution, so an alert whose id is already held
    /// is numbered `-2`, `-3`, ... until it is unique among retained alerts.
    pub fn record_alert(&mut self, alert: Alert) -> Alert {
        let taken = |id: &str| self.alerts.iter().any(|held| held.id.as_ref() == id);
        let alert = if taken(alert.id.as_ref()) {
            let base = alert.id.to_string();
            let ordinal = (2..)
                .find(|ordinal| !taken(&format!("{base}-{ordinal}")))
                .unwrap_or_default();
            alert.numbered(ordinal)
        } else {
            alert
        };
        self.alerts.push(alert.clone());
        alert
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        DashboardSnapshot {
            tab: self.tab,
            draft: self.draft.clone(),
            predict: self.predict.clone(),
            training: self.training.clone(),
            can_submit_prediction: self.can_submit_prediction(),
            can_train: self.can_train(),
            last_result: self.last_result.clone(),
            model: self.model.clone(),
            metrics: self.metrics.clone(),
            recent_predictions: self.recent.iter().map(|r| r.displayed(now)).collect(),
            alerts: self.alerts.to_vec(),
            ticks: self.ticks,
            last_refreshed: self.last_refreshed,
        }
    }
}

/// Everything a client needs to render the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub tab: Tab,
    pub draft: String,
    pub predict: PredictState,
    pub training: TrainingState,
    pub can_submit_prediction: bool,
    pub can_train: bool,
    pub last_result: Option<PredictionResult>,
    pub model: ModelInfo,
    pub metrics: Metrics,
    pub recent_predictions: Vec<DisplayedPrediction>,
    pub alerts: Vec<Alert>,
    pub ticks: u64,
    pub last_refreshed: Option<DateTime<Utc>>,
}
