//! The dashboard actor
//!
//! One task owns [`DashboardState`] and serializes every event that touches
//! it: commands from handles, refresh ticks, and outcomes of background
//! predictions and training runs. Backend calls run as separate tasks in a
//! `JoinSet`, and their outcomes are applied here, so state is only ever
//! mutated from this loop.

use crate::dashboard::error::DashboardResult;
use crate::dashboard::handle::DashboardHandle;
use crate::dashboard::state::{DashboardSnapshot, DashboardState, PredictionOrigin};
use crate::domain::{Alert, ModelInfo, PredictionResult, PredictionText, Tab};
use crate::infrastructure::log_messages::dashboard as log_msg;
use crate::services::{
    ticker::DEFAULT_TICK_INTERVAL, MetricsTicker, PredictionService, ServiceError,
    ServiceResult, TrainingService,
};
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{self, JoinError, JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

/// Default depth of the command queue
pub const DEFAULT_COMMAND_BUFFER: usize = 64;

type Reply<T> = oneshot::Sender<DashboardResult<T>>;

pub(crate) enum Command {
    SelectTab {
        tab: Tab,
        reply: oneshot::Sender<Tab>,
    },
    SetDraft {
        text: String,
        reply: oneshot::Sender<()>,
    },
    /// `text: None` submits the current draft
    StartPrediction {
        text: Option<String>,
        accepted: Reply<()>,
        done: Reply<PredictionResult>,
    },
    StartTraining {
        accepted: Reply<()>,
        done: Reply<ModelInfo>,
    },
    RaiseAlert {
        alert: Alert,
        reply: oneshot::Sender<Alert>,
    },
    Snapshot {
        reply: oneshot::Sender<DashboardSnapshot>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SelectTab { .. } => "SelectTab",
            Self::SetDraft { .. } => "SetDraft",
            Self::StartPrediction { .. } => "StartPrediction",
            Self::StartTraining { .. } => "StartTraining",
            Self::RaiseAlert { .. } => "RaiseAlert",
            Self::Snapshot { .. } => "Snapshot",
            Self::Shutdown { .. } => "Shutdown",
        };
        f.write_str(name)
    }
}

/// Result of a background backend call
enum Outcome {
    Prediction(ServiceResult<PredictionResult>),
    Training(ServiceResult<ModelInfo>),
}

/// Caller context kept while a backend call is in flight
enum Pending {
    Prediction {
        text: PredictionText,
        origin: PredictionOrigin,
        done: Reply<PredictionResult>,
    },
    Training {
        done: Reply<ModelInfo>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    pub tick_interval: Duration,
    pub command_buffer: usize,
    /// Fixed seed for the metrics ticker; `None` seeds from entropy
    pub ticker_seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            command_buffer: DEFAULT_COMMAND_BUFFER,
            ticker_seed: None,
        }
    }
}

pub struct Dashboard {
    state: DashboardState,
    commands: mpsc::Receiver<Command>,
    predictor: Arc<dyn PredictionService>,
    trainer: Arc<dyn TrainingService>,
    ticker: MetricsTicker,
    operations: JoinSet<Outcome>,
    pending: HashMap<task::Id, Pending>,
}

impl Dashboard {
    /// Start a dashboard on the current runtime
    ///
    /// The dashboard runs until [`DashboardHandle::shutdown`] is called or
    /// every handle has been dropped.
    pub fn spawn(
        config: DashboardConfig,
        predictor: Arc<dyn PredictionService>,
        trainer: Arc<dyn TrainingService>,
    ) -> (DashboardHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(config.command_buffer.max(1));
        let ticker = match config.ticker_seed {
            Some(seed) => MetricsTicker::seeded(config.tick_interval, seed),
            None => MetricsTicker::new(config.tick_interval),
        };

        let dashboard = Self {
            state: DashboardState::seeded(Utc::now()),
            commands: rx,
            predictor,
            trainer,
            ticker,
            operations: JoinSet::new(),
            pending: HashMap::new(),
        };

        let task = tokio::spawn(dashboard.run());
        (DashboardHandle::new(tx), task)
    }

    async fn run(mut self) {
        info!(
            predictor = self.predictor.id(),
            trainer = self.trainer.id(),
            tick_interval_ms = self.ticker.period().as_millis() as u64,
            "{}",
            log_msg::STARTED
        );
        let mut refresh = self.ticker.interval();

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown { reply }) => {
                        self.stop().await;
                        let _ = reply.send(());
                        return;
                    }
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                _ = refresh.tick() => self.handle_tick(),
                Some(joined) = self.operations.join_next_with_id() => self.handle_joined(joined),
            }
        }

        self.stop().await;
    }

    /// Abort in-flight operations; their callers observe `Stopped`
    async fn stop(&mut self) {
        info!(pending = self.pending.len(), "{}", log_msg::STOPPING);
        self.commands.close();
        self.operations.shutdown().await;
        self.pending.clear();
        info!("{}", log_msg::STOPPED);
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SelectTab { tab, reply } => {
                let selected = self.state.select_tab(tab);
                debug!(tab = %selected, "{}", log_msg::TAB_SELECTED);
                let _ = reply.send(selected);
            }
            Command::SetDraft { text, reply } => {
                self.state.set_draft(text);
                let _ = reply.send(());
            }
            Command::StartPrediction {
                text,
                accepted,
                done,
            } => {
                let (text, origin) = match text {
                    Some(text) => (text, PredictionOrigin::Direct),
                    None => (self.state.draft().to_string(), PredictionOrigin::Draft),
                };
                let _ = accepted.send(self.start_prediction(&text, origin, done));
            }
            Command::StartTraining { accepted, done } => {
                let _ = accepted.send(self.start_training(done));
            }
            Command::RaiseAlert { alert, reply } => {
                let alert = self.state.record_alert(alert);
                warn!(
                    alert_id = %alert.id,
                    kind = %alert.kind,
                    severity = ?alert.severity,
                    "{}",
                    log_msg::ALERT_RAISED
                );
                let _ = reply.send(alert);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.state.snapshot(Utc::now()));
            }
            // Handled by the run loop before dispatch
            Command::Shutdown { reply } => {
                let _ = reply.send(());
            }
        }
    }

    fn start_prediction(
        &mut self,
        text: &str,
        origin: PredictionOrigin,
        done: Reply<PredictionResult>,
    ) -> DashboardResult<()> {
        let text = self.state.begin_prediction(text).inspect_err(|e| {
            debug!(reason = %e, "{}", log_msg::PREDICTION_REJECTED);
        })?;

        let predictor = Arc::clone(&self.predictor);
        let input = text.clone();
        let handle = self
            .operations
            .spawn(async move { Outcome::Prediction(predictor.predict(&input).await) });
        self.pending
            .insert(handle.id(), Pending::Prediction { text, origin, done });

        debug!(?origin, "{}", log_msg::PREDICTION_STARTED);
        Ok(())
    }

    fn start_training(&mut self, done: Reply<ModelInfo>) -> DashboardResult<()> {
        let current = self.state.begin_training().inspect_err(|e| {
            debug!(reason = %e, "{}", log_msg::TRAINING_REJECTED);
        })?;

        let trainer = Arc::clone(&self.trainer);
        let handle = self
            .operations
            .spawn(async move { Outcome::Training(trainer.train(&current).await) });
        self.pending.insert(handle.id(), Pending::Training { done });

        info!("{}", log_msg::TRAINING_STARTED);
        Ok(())
    }

    fn handle_tick(&mut self) {
        let outcome = self.state.record_tick(&mut self.ticker, Utc::now());
        debug!(
            new_predictions = outcome.new_predictions,
            requests_per_hour = outcome.requests_per_hour.into_inner(),
            total_predictions = self.state.metrics().total_predictions.into_inner(),
            "{}",
            log_msg::METRICS_REFRESHED
        );
    }

    fn handle_joined(&mut self, joined: Result<(task::Id, Outcome), JoinError>) {
        match joined {
            Ok((id, outcome)) => match (self.pending.remove(&id), outcome) {
                (Some(pending), outcome) => self.complete(pending, outcome),
                (None, _) => warn!(task_id = %id, "{}", log_msg::ORPHANED_OUTCOME),
            },
            Err(join_error) => {
                error!(
                    task_id = %join_error.id(),
                    error = %join_error,
                    "{}",
                    log_msg::OPERATION_PANICKED
                );
                if let Some(pending) = self.pending.remove(&join_error.id()) {
                    let aborted = ServiceError::Aborted(join_error.to_string());
                    let outcome = match pending {
                        Pending::Prediction { .. } => Outcome::Prediction(Err(aborted)),
                        Pending::Training { .. } => Outcome::Training(Err(aborted)),
                    };
                    self.complete(pending, outcome);
                }
            }
        }
    }

    fn complete(&mut self, pending: Pending, outcome: Outcome) {
        match (pending, outcome) {
            (Pending::Prediction { text, origin, done }, Outcome::Prediction(outcome)) => {
                let result = self.state.finish_prediction(text, origin, outcome);
                match &result {
                    Ok(prediction) => info!(
                        prediction_id = %prediction.prediction_id,
                        sentiment = %prediction.sentiment,
                        confidence = prediction.confidence.into_inner(),
                        "{}",
                        log_msg::PREDICTION_RECORDED
                    ),
                    Err(e) => warn!(error = %e, "{}", log_msg::PREDICTION_FAILED),
                }
                let _ = done.send(result);
            }
            (Pending::Training { done }, Outcome::Training(outcome)) => {
                let result = self.state.finish_training(outcome);
                match &result {
                    Ok(model) => info!(
                        version = %model.version,
                        accuracy = model.accuracy.into_inner(),
                        "{}",
                        log_msg::TRAINING_FINISHED
                    ),
                    Err(e) => warn!(error = %e, "{}", log_msg::TRAINING_FAILED),
                }
                let _ = done.send(result);
            }
            (_, _) => warn!("{}", log_msg::ORPHANED_OUTCOME),
        }
    }
}
