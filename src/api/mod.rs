//! HTTP surface of the dashboard
//!
//! ```rust,ignore
//! let (dashboard, _task) = Dashboard::spawn(config, predictor, trainer);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, api::router(dashboard)).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod headers;
pub mod middleware;
pub mod types;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::ApiState;
pub use headers::paths;

use crate::dashboard::DashboardHandle;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use middleware::{error_handling_middleware, logging_middleware, request_id_middleware};
use tower_http::cors::CorsLayer;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the API router around a running dashboard
pub fn router(dashboard: DashboardHandle) -> Router {
    Router::new()
        .route(paths::HEALTH, get(handlers::health))
        .route(paths::PREDICT, post(handlers::predict))
        .route(paths::TRAIN, post(handlers::train))
        .route(paths::MODEL_INFO, get(handlers::model_info))
        .route(paths::MODEL_STATUS, get(handlers::model_status))
        .route(paths::METRICS, get(handlers::metrics))
        .route(
            paths::METRICS_PREDICTIONS,
            get(handlers::prediction_metrics),
        )
        .route(paths::METRICS_MODEL, get(handlers::model_metrics))
        .route(paths::METRICS_ALERT, post(handlers::raise_alert))
        .route(paths::RECENT_PREDICTIONS, get(handlers::recent_predictions))
        .route(paths::DASHBOARD, get(handlers::dashboard))
        .route(paths::DASHBOARD_TAB, put(handlers::select_tab))
        .route(paths::DASHBOARD_DRAFT, put(handlers::set_draft))
        .route(paths::DASHBOARD_DRAFT_SUBMIT, post(handlers::submit_draft))
        .fallback(handlers::not_found)
        .with_state(ApiState::new(dashboard))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(from_fn(error_handling_middleware))
        .layer(from_fn(logging_middleware))
        .layer(from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::headers::X_REQUEST_ID;
    use crate::dashboard::{Dashboard, DashboardConfig};
    use crate::domain::{model::SEED_VERSION, RECENT_PREDICTIONS_CAPACITY};
    use crate::services::{SimulatedPredictor, SimulatedTrainer, SimulationProfile};
    use axum::body::{to_bytes, Body};
    use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> (Router, DashboardHandle) {
        test_router_with(SimulationProfile::instant())
    }

    fn test_router_with(profile: SimulationProfile) -> (Router, DashboardHandle) {
        let (dashboard, _task) = Dashboard::spawn(
            DashboardConfig::default(),
            Arc::new(SimulatedPredictor::seeded(&profile, 3)),
            Arc::new(SimulatedTrainer::seeded(&profile, 4)),
        );
        (router(dashboard.clone()), dashboard)
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        assert!(response.headers().contains_key(X_REQUEST_ID));
        let status = response.status();
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (router, _dashboard) = test_router();
        let (status, body) = send(&router, Method::GET, paths::HEALTH, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "healthy", "service": "sentiment-ops"})
        );
    }

    #[tokio::test]
    async fn test_predict_returns_result_and_records_it() {
        let (router, _dashboard) = test_router();

        let (status, body) = send(
            &router,
            Method::POST,
            paths::PREDICT,
            Some(json!({"text": "This product is amazing!"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sentiment"], "positive");
        assert!(body["predictionId"].is_string());
        assert!(body["timestamp"].is_string());
        let confidence = body["confidence"].as_f64().unwrap();
        assert!((0.7..1.0).contains(&confidence));

        let (_, recent) = send(&router, Method::GET, paths::RECENT_PREDICTIONS, None).await;
        assert_eq!(recent[0]["id"], body["predictionId"]);
        assert_eq!(recent[0]["displayTime"], "Just now");
        assert_eq!(recent.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_predict_rejects_blank_text() {
        let (router, _dashboard) = test_router();

        let (status, body) = send(
            &router,
            Method::POST,
            paths::PREDICT,
            Some(json!({"text": "   "})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMPTY_TEXT");
        assert!(body["requestId"].is_string());
    }

    #[tokio::test]
    async fn test_predict_rejects_malformed_json() {
        let (router, _dashboard) = test_router();

        let (status, body) = send(
            &router,
            Method::POST,
            paths::PREDICT,
            Some(json!({"wrong": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_predict_without_json_content_type_is_unsupported() {
        let (router, _dashboard) = test_router();
        let request = Request::builder()
            .method(Method::POST)
            .uri(paths::PREDICT)
            .body(Body::from(json!({"text": "good"}).to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "UNSUPPORTED_MEDIA_TYPE");
        assert!(body["requestId"].is_string());
    }

    #[tokio::test]
    async fn test_predict_body_over_limit_is_too_large() {
        let (router, dashboard) = test_router();
        let text = "good ".repeat(MAX_BODY_BYTES / 4);

        let (status, body) = send(
            &router,
            Method::POST,
            paths::PREDICT,
            Some(json!({"text": text})),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
        let snapshot = dashboard.snapshot().await.unwrap();
        assert!(snapshot.last_result.is_none());
    }

    #[tokio::test]
    async fn test_train_with_and_without_body() {
        let (router, _dashboard) = test_router();

        let (status, first) = send(&router, Method::POST, paths::TRAIN, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["modelId"], "model-abc123");
        assert_eq!(first["status"], "active");
        assert_ne!(first["version"], SEED_VERSION);
        let accuracy = first["accuracy"].as_f64().unwrap();
        assert!((0.88..0.98).contains(&accuracy));

        let (status, _) = send(
            &router,
            Method::POST,
            paths::TRAIN,
            Some(json!({"retrain": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, info) = send(&router, Method::GET, paths::MODEL_INFO, None).await;
        assert_eq!(info["modelId"], "model-abc123");
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_train_conflicts_while_pending() {
        let (router, dashboard) = test_router_with(SimulationProfile::default());

        let pending = dashboard.start_training().await.unwrap();
        let (status, body) = send(&router, Method::POST, paths::TRAIN, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "TRAINING_IN_PROGRESS");

        let (_, model_status) = send(&router, Method::GET, paths::MODEL_STATUS, None).await;
        assert_eq!(model_status["training"]["state"], "training");
        assert_eq!(model_status["modelLoaded"], true);

        pending.wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_metrics_endpoints() {
        let (router, _dashboard) = test_router();

        let (status, metrics) = send(&router, Method::GET, paths::METRICS, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(metrics["totalPredictions"], 127);
        assert_eq!(metrics["requestsPerHour"], 45);

        let (_, predictions) = send(&router, Method::GET, paths::METRICS_PREDICTIONS, None).await;
        assert_eq!(predictions["totalPredictions"], 127);
        assert_eq!(predictions["positiveRatio"], 0.6535);

        let (_, model) = send(&router, Method::GET, paths::METRICS_MODEL, None).await;
        assert_eq!(model["modelVersion"], SEED_VERSION);
        assert_eq!(model["errorRate"], 0.02);
    }

    #[tokio::test]
    async fn test_alert_creation() {
        let (router, dashboard) = test_router();

        let (status, alert) = send(
            &router,
            Method::POST,
            paths::METRICS_ALERT,
            Some(json!({"type": "latency", "message": "p99 above 2s", "severity": "warning"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(alert["id"].as_str().unwrap().starts_with("alert-"));
        assert_eq!(alert["type"], "latency");
        assert!(alert["createdAt"].is_string());

        let (_, repeat) = send(
            &router,
            Method::POST,
            paths::METRICS_ALERT,
            Some(json!({"type": "latency", "message": "p99 above 2s", "severity": "warning"})),
        )
        .await;
        assert_ne!(repeat["id"], alert["id"]);

        let snapshot = dashboard.snapshot().await.unwrap();
        assert_eq!(snapshot.alerts.len(), 2);

        let (status, body) = send(
            &router,
            Method::POST,
            paths::METRICS_ALERT,
            Some(json!({"type": " ", "message": "x", "severity": "info"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_dashboard_tab_and_draft_flow() {
        let (router, _dashboard) = test_router();

        let (_, snapshot) = send(&router, Method::GET, paths::DASHBOARD, None).await;
        assert_eq!(snapshot["tab"], "overview");

        let (status, draft) = send(
            &router,
            Method::PUT,
            paths::DASHBOARD_DRAFT,
            Some(json!({"text": "Great value"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(draft["canSubmitPrediction"], true);

        for tab in ["Predict", "monitor"] {
            let (status, _) = send(
                &router,
                Method::PUT,
                paths::DASHBOARD_TAB,
                Some(json!({"tab": tab})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, body) = send(
            &router,
            Method::PUT,
            paths::DASHBOARD_TAB,
            Some(json!({"tab": "settings"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");

        let (_, snapshot) = send(&router, Method::GET, paths::DASHBOARD, None).await;
        assert_eq!(snapshot["tab"], "monitor");
        assert_eq!(snapshot["draft"], "Great value");

        let (status, result) = send(
            &router,
            Method::POST,
            paths::DASHBOARD_DRAFT_SUBMIT,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["sentiment"], "positive");

        let (_, snapshot) = send(&router, Method::GET, paths::DASHBOARD, None).await;
        assert_eq!(snapshot["draft"], "");
        assert_eq!(
            snapshot["recentPredictions"].as_array().unwrap().len(),
            RECENT_PREDICTIONS_CAPACITY.min(4)
        );
    }

    #[tokio::test]
    async fn test_stopped_dashboard_is_unavailable() {
        let (router, dashboard) = test_router();
        dashboard.shutdown().await.unwrap();

        let (status, body) = send(&router, Method::GET, paths::METRICS, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "DASHBOARD_STOPPED");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (router, _dashboard) = test_router();
        let (status, body) = send(&router, Method::GET, "/api/v1/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
