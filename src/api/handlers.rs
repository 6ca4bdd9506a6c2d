//! Axum handlers
//!
//! Handlers translate between JSON bodies and [`DashboardHandle`] calls; the
//! dashboard does all validation that depends on state.

use crate::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::api::types::{
    AlertRequest, DraftRequest, DraftResponse, HealthResponse, ModelStatusResponse,
    PredictRequest, TabRequest, TabResponse, TrainRequest,
};
use crate::dashboard::{DashboardHandle, DashboardSnapshot};
use crate::domain::{
    Alert, AlertKind, AlertMessage, DisplayedPrediction, Metrics, ModelInfo, ModelMetrics,
    PredictionMetrics, PredictionResult, Tab,
};
use crate::infrastructure::log_messages::api as log_msg;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::Utc;
use std::str::FromStr;
use tracing::debug;

/// Shared state of every handler
#[derive(Clone, Debug)]
pub struct ApiState {
    pub dashboard: DashboardHandle,
}

impl ApiState {
    pub fn new(dashboard: DashboardHandle) -> Self {
        Self { dashboard }
    }

    async fn snapshot(&self) -> ApiResult<DashboardSnapshot> {
        Ok(self.dashboard.snapshot().await?)
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

pub async fn predict(
    State(state): State<ApiState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> ApiResult<Json<PredictionResult>> {
    let Json(request) = payload?;
    if let Some(version) = &request.model_version {
        debug!(requested_version = %version, "{}", log_msg::MODEL_VERSION_IGNORED);
    }
    Ok(Json(state.dashboard.predict(request.text).await?))
}

/// An empty body counts as `{}`
pub async fn train(State(state): State<ApiState>, body: Bytes) -> ApiResult<Json<ModelInfo>> {
    let request: TrainRequest = if body.iter().all(u8::is_ascii_whitespace) {
        TrainRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?
    };
    debug!(retrain = request.retrain, "{}", log_msg::TRAINING_REQUESTED);
    Ok(Json(state.dashboard.train().await?))
}

pub async fn metrics(State(state): State<ApiState>) -> ApiResult<Json<Metrics>> {
    Ok(Json(state.snapshot().await?.metrics))
}

pub async fn prediction_metrics(
    State(state): State<ApiState>,
) -> ApiResult<Json<PredictionMetrics>> {
    let snapshot = state.snapshot().await?;
    Ok(Json(PredictionMetrics::from_metrics(
        &snapshot.metrics,
        Utc::now(),
    )))
}

pub async fn model_metrics(State(state): State<ApiState>) -> ApiResult<Json<ModelMetrics>> {
    let snapshot = state.snapshot().await?;
    Ok(Json(ModelMetrics::from_parts(
        &snapshot.model,
        &snapshot.metrics,
        Utc::now(),
    )))
}

pub async fn raise_alert(
    State(state): State<ApiState>,
    payload: Result<Json<AlertRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Alert>)> {
    let Json(request) = payload?;
    let kind = AlertKind::try_new(request.kind)
        .map_err(|e| ApiError::BadRequest(format!("type: {e}")))?;
    let message = AlertMessage::try_new(request.message)
        .map_err(|e| ApiError::BadRequest(format!("message: {e}")))?;

    let alert = Alert::raise(kind, message, request.severity, Utc::now());
    let alert = state.dashboard.raise_alert(alert).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

pub async fn model_info(State(state): State<ApiState>) -> ApiResult<Json<ModelInfo>> {
    Ok(Json(state.snapshot().await?.model))
}

pub async fn model_status(State(state): State<ApiState>) -> ApiResult<Json<ModelStatusResponse>> {
    let snapshot = state.snapshot().await?;
    Ok(Json(ModelStatusResponse::new(
        &snapshot.model,
        snapshot.training,
    )))
}

pub async fn recent_predictions(
    State(state): State<ApiState>,
) -> ApiResult<Json<Vec<DisplayedPrediction>>> {
    Ok(Json(state.snapshot().await?.recent_predictions))
}

pub async fn dashboard(State(state): State<ApiState>) -> ApiResult<Json<DashboardSnapshot>> {
    Ok(Json(state.snapshot().await?))
}

pub async fn select_tab(
    State(state): State<ApiState>,
    payload: Result<Json<TabRequest>, JsonRejection>,
) -> ApiResult<Json<TabResponse>> {
    let Json(request) = payload?;
    let tab = Tab::from_str(&request.tab)?;
    let tab = state.dashboard.select_tab(tab).await?;
    Ok(Json(TabResponse { tab }))
}

pub async fn set_draft(
    State(state): State<ApiState>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> ApiResult<Json<DraftResponse>> {
    let Json(request) = payload?;
    state.dashboard.set_draft(request.text).await?;
    let snapshot = state.snapshot().await?;
    Ok(Json(DraftResponse {
        draft: snapshot.draft,
        can_submit_prediction: snapshot.can_submit_prediction,
        predict: snapshot.predict,
    }))
}

pub async fn submit_draft(State(state): State<ApiState>) -> ApiResult<Json<PredictionResult>> {
    let pending = state.dashboard.submit_draft().await?;
    Ok(Json(pending.wait().await?))
}

pub async fn not_found() -> Response {
    ErrorResponse::new("NOT_FOUND", "No such endpoint")
        .into_response_with_status(StatusCode::NOT_FOUND)
}
