//! Error responses of the HTTP API
//!
//! Every failure leaves the API as `{code, message, requestId}` with the
//! status code that matches its category.

use crate::api::headers::X_REQUEST_ID;
use crate::dashboard::DashboardError;
use crate::domain::tab::UnknownTab;
use crate::services::ServiceError;
use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error response format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Unique error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request ID for correlation
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            request_id: None,
        }
    }

    /// Add request ID for correlation
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Convert to HTTP response with proper headers
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        let request_id = self.request_id.clone();
        let mut response = (status, Json(self)).into_response();

        if let Some(id) = request_id {
            if let Ok(header_value) = HeaderValue::from_str(&id) {
                response.headers_mut().insert(X_REQUEST_ID, header_value);
            }
        }

        response
    }
}

/// Failure of an API handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// A body the JSON extractor refused, keeping the extractor's status
    #[error("Invalid request: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
            Self::Dashboard(error) => match error {
                DashboardError::EmptyText | DashboardError::InvalidText(_) => {
                    StatusCode::BAD_REQUEST
                }
                DashboardError::PredictionPending | DashboardError::TrainingInProgress => {
                    StatusCode::CONFLICT
                }
                DashboardError::Service(ServiceError::Unavailable(_))
                | DashboardError::Service(ServiceError::Timeout(_))
                | DashboardError::Stopped => StatusCode::SERVICE_UNAVAILABLE,
                DashboardError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "INVALID_REQUEST",
            Self::Rejected { status, .. } => match *status {
                StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
                StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
                _ => "INVALID_REQUEST",
            },
            Self::Dashboard(error) => match error {
                DashboardError::EmptyText => "EMPTY_TEXT",
                DashboardError::InvalidText(_) => "INVALID_TEXT",
                DashboardError::PredictionPending => "PREDICTION_PENDING",
                DashboardError::TrainingInProgress => "TRAINING_IN_PROGRESS",
                DashboardError::Stopped => "DASHBOARD_STOPPED",
                DashboardError::Service(ServiceError::Unavailable(_)) => "SERVICE_UNAVAILABLE",
                DashboardError::Service(ServiceError::Timeout(_)) => "SERVICE_TIMEOUT",
                DashboardError::Service(_) => "SERVICE_ERROR",
            },
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string())
    }
}

/// Syntax and shape errors both answer 400; oversized bodies and missing
/// content types keep 413 and 415
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
            status => status,
        };
        Self::Rejected {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<UnknownTab> for ApiError {
    fn from(error: UnknownTab) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.to_error_response().into_response_with_status(status)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
