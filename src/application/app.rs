use crate::api;
use crate::config::{BackendKind, Settings};
use crate::dashboard::{Dashboard, DashboardHandle};
use crate::infrastructure::log_messages::application as log_msg;
use crate::services::{
    PredictionService, RemotePredictionService, RemoteTrainingService, SimulatedPredictor,
    SimulatedTrainer, TrainingService,
};
use crate::Result;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

/// Main application struct that coordinates all components
pub struct Application {
    settings: Settings,
    listener: TcpListener,
    dashboard: DashboardHandle,
    dashboard_task: JoinHandle<()>,
}

impl Application {
    /// Wire the backends, start the dashboard and bind the listener
    #[instrument(skip(settings), fields(environment = %settings.application.environment))]
    pub async fn new(settings: Settings) -> Result<Self> {
        info!("{}", log_msg::STARTING);

        let (predictor, trainer) = build_services(&settings);
        info!(
            backend = ?settings.backend.kind,
            predictor = predictor.id(),
            trainer = trainer.id(),
            "{}",
            log_msg::BACKEND_SELECTED
        );

        let (dashboard, dashboard_task) =
            Dashboard::spawn(settings.dashboard_config(), predictor, trainer);
        let listener = TcpListener::bind(settings.socket_addr()?).await?;

        Ok(Self {
            settings,
            listener,
            dashboard,
            dashboard_task,
        })
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, then stop the dashboard
    #[instrument(skip_all)]
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.listener.local_addr()?;
        info!(%addr, "{}", log_msg::LISTENING);

        let router = api::router(self.dashboard.clone());
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        self.dashboard.shutdown().await?;
        if let Err(e) = self.dashboard_task.await {
            error!(error = %e, "{}", log_msg::DASHBOARD_TASK_FAILED);
        }

        info!("{}", log_msg::STOPPED);
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn dashboard(&self) -> &DashboardHandle {
        &self.dashboard
    }
}

/// Pick the prediction and training implementations named by the settings
pub fn build_services(
    settings: &Settings,
) -> (Arc<dyn PredictionService>, Arc<dyn TrainingService>) {
    match settings.backend.kind {
        BackendKind::Simulated => {
            let profile = settings.simulation_profile();
            (
                Arc::new(SimulatedPredictor::new(&profile)),
                Arc::new(SimulatedTrainer::new(&profile)),
            )
        }
        BackendKind::Remote => {
            let timeout = settings.request_timeout();
            (
                Arc::new(
                    RemotePredictionService::new(settings.backend.prediction_url.clone(), timeout)
                        .with_path(settings.backend.prediction_path.clone()),
                ),
                Arc::new(
                    RemoteTrainingService::new(settings.backend.training_url.clone(), timeout)
                        .with_path(settings.backend.training_path.clone()),
                ),
            )
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("{}", log_msg::SHUTDOWN_SIGNAL),
        Err(e) => error!(error = %e, "{}", log_msg::SIGNAL_HANDLER_FAILED),
    }
}
