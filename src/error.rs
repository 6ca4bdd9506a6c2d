use crate::dashboard::DashboardError;
use crate::services::ServiceError;
use thiserror::Error;

/// Sentiment Ops application error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dashboard error: {0}")]
    Dashboard(#[from] DashboardError),

    #[error("Backend error: {0}")]
    Service(#[from] ServiceError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert_with_question_mark() {
        fn stopped() -> Result<()> {
            Err(DashboardError::Stopped)?
        }

        let error = stopped().unwrap_err();
        assert!(matches!(error, Error::Dashboard(DashboardError::Stopped)));
        assert_eq!(
            error.to_string(),
            "Dashboard error: Dashboard is not running"
        );
    }

    #[test]
    fn test_config_error_message() {
        let error = Error::from(config::ConfigError::Message("bad port".to_string()));
        assert_eq!(error.to_string(), "Configuration error: bad port");
    }
}
