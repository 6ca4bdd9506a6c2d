use crate::api::paths;
use crate::dashboard::DashboardConfig;
use crate::domain::FailureRate;
use crate::services::remote::STANDALONE_TRAIN_PATH;
use crate::services::SimulationProfile;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub simulation: SimulationSettings,
    pub backend: BackendSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationSettings {
    pub tick_interval_ms: u64,
    pub predict_latency_ms: u64,
    pub train_latency_ms: u64,
    pub failure_rate: f64,
}

/// Which implementation answers predictions and training runs
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Simulated,
    Remote,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub kind: BackendKind,
    pub prediction_url: String,
    pub prediction_path: String,
    pub training_url: String,
    pub training_path: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let config = Self::with_defaults(Config::builder(), &environment)?
            // Add configuration file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix("SENTIMENT_OPS").separator("__"))
            .build()?;

        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings built from defaults only, ignoring files and environment
    pub fn defaults() -> Result<Self, ConfigError> {
        let settings: Self = Self::with_defaults(Config::builder(), "development")?
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
        environment: &str,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("application.environment", environment)?
            .set_default("simulation.tick_interval_ms", 5000)?
            .set_default("simulation.predict_latency_ms", 1500)?
            .set_default("simulation.train_latency_ms", 3000)?
            .set_default("simulation.failure_rate", 0.0)?
            .set_default("backend.kind", "simulated")?
            .set_default("backend.prediction_url", "http://localhost:8081")?
            .set_default("backend.prediction_path", paths::PREDICT)?
            .set_default("backend.training_url", "http://localhost:8000")?
            .set_default("backend.training_path", STANDALONE_TRAIN_PATH)?
            .set_default("backend.request_timeout_ms", 10000)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application.port == 0 {
            return Err(ConfigError::Message(
                "application.port must be greater than 0".to_string(),
            ));
        }
        if self.simulation.tick_interval_ms == 0 {
            return Err(ConfigError::Message(
                "simulation.tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        if FailureRate::try_new(self.simulation.failure_rate).is_err() {
            return Err(ConfigError::Message(format!(
                "simulation.failure_rate must be within [0, 1], got {}",
                self.simulation.failure_rate
            )));
        }
        if self.backend.request_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "backend.request_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.backend.kind == BackendKind::Remote {
            for (key, url) in [
                ("backend.prediction_url", &self.backend.prediction_url),
                ("backend.training_url", &self.backend.training_url),
            ] {
                if url
                    .parse::<http::Uri>()
                    .map(|u| u.host().is_none())
                    .unwrap_or(true)
                {
                    return Err(ConfigError::Message(format!("{key} is not a valid URL: {url}")));
                }
            }
            for (key, path) in [
                ("backend.prediction_path", &self.backend.prediction_path),
                ("backend.training_path", &self.backend.training_path),
            ] {
                if !path.starts_with('/') {
                    return Err(ConfigError::Message(format!("{key} must start with '/': {path}")));
                }
            }
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.application.host, self.application.port)
            .parse()
            .map_err(|e| ConfigError::Message(format!("Invalid listen address: {e}")))
    }

    pub fn simulation_profile(&self) -> SimulationProfile {
        SimulationProfile {
            predict_latency: Duration::from_millis(self.simulation.predict_latency_ms),
            train_latency: Duration::from_millis(self.simulation.train_latency_ms),
            failure_rate: FailureRate::try_new(self.simulation.failure_rate)
                .unwrap_or_else(|_| FailureRate::never()),
        }
    }

    pub fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            tick_interval: Duration::from_millis(self.simulation.tick_interval_ms),
            ..DashboardConfig::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.backend.request_timeout_ms)
    }
}
