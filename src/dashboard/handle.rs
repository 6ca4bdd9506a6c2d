//! Cloneable front door to a running dashboard

use crate::dashboard::actor::Command;
use crate::dashboard::error::{DashboardError, DashboardResult};
use crate::dashboard::state::DashboardSnapshot;
use crate::domain::{Alert, ModelInfo, PredictionResult, Tab};
use tokio::sync::{mpsc, oneshot};

/// Outcome of an accepted prediction or training run, delivered when it finishes
///
/// Dropping it does not cancel the operation; the dashboard still applies
/// the outcome.
#[derive(Debug)]
pub struct PendingOutcome<T> {
    rx: oneshot::Receiver<DashboardResult<T>>,
}

impl<T> PendingOutcome<T> {
    pub(crate) fn new(rx: oneshot::Receiver<DashboardResult<T>>) -> Self {
        Self { rx }
    }

    /// Wait for the operation to finish
    ///
    /// Resolves to [`DashboardError::Stopped`] if the dashboard shut down first.
    pub async fn wait(self) -> DashboardResult<T> {
        self.rx.await.unwrap_or(Err(DashboardError::Stopped))
    }
}

#[derive(Clone, Debug)]
pub struct DashboardHandle {
    commands: mpsc::Sender<Command>,
}

impl DashboardHandle {
    pub(crate) fn new(commands: mpsc::Sender<Command>) -> Self {
        Self { commands }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> DashboardResult<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| DashboardError::Stopped)?;
        response.await.map_err(|_| DashboardError::Stopped)
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    pub async fn select_tab(&self, tab: Tab) -> DashboardResult<Tab> {
        self.request(|reply| Command::SelectTab { tab, reply }).await
    }

    pub async fn set_draft(&self, text: impl Into<String>) -> DashboardResult<()> {
        let text = text.into();
        self.request(|reply| Command::SetDraft { text, reply }).await
    }

    /// Start classifying `text` without waiting for the result
    pub async fn start_prediction(
        &self,
        text: impl Into<String>,
    ) -> DashboardResult<PendingOutcome<PredictionResult>> {
        self.begin_prediction(Some(text.into())).await
    }

    /// Start classifying the current draft without waiting for the result
    pub async fn submit_draft(&self) -> DashboardResult<PendingOutcome<PredictionResult>> {
        self.begin_prediction(None).await
    }

    async fn begin_prediction(
        &self,
        text: Option<String>,
    ) -> DashboardResult<PendingOutcome<PredictionResult>> {
        let (done, outcome) = oneshot::channel();
        self.request(|accepted| Command::StartPrediction {
            text,
            accepted,
            done,
        })
        .await??;
        Ok(PendingOutcome::new(outcome))
    }

    /// Classify `text` and wait for the result
    pub async fn predict(&self, text: impl Into<String>) -> DashboardResult<PredictionResult> {
        self.start_prediction(text).await?.wait().await
    }

    /// Start a training run without waiting for it
    pub async fn start_training(&self) -> DashboardResult<PendingOutcome<ModelInfo>> {
        let (done, outcome) = oneshot::channel();
        self.request(|accepted| Command::StartTraining { accepted, done })
            .await??;
        Ok(PendingOutcome::new(outcome))
    }

    /// Run a training pass and wait for the new model
    pub async fn train(&self) -> DashboardResult<ModelInfo> {
        self.start_training().await?.wait().await
    }

    pub async fn raise_alert(&self, alert: Alert) -> DashboardResult<Alert> {
        self.request(|reply| Command::RaiseAlert { alert, reply }).await
    }

    pub async fn snapshot(&self) -> DashboardResult<DashboardSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Stop the dashboard: the refresh timer ends and pending operations are aborted
    ///
    /// Stopping an already stopped dashboard is not an error.
    pub async fn shutdown(&self) -> DashboardResult<()> {
        match self.request(|reply| Command::Shutdown { reply }).await {
            Ok(()) | Err(DashboardError::Stopped) => Ok(()),
            Err(other) => Err(other),
        }
    }
}
