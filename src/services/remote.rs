//! Network-backed prediction and training services
//!
//! Both services speak the JSON contract the HTTP API serves. Endpoint paths
//! are configurable, so the same clients reach the standalone prediction and
//! training services or another deployment of this crate.

use crate::api::{
    headers::JSON_CONTENT_TYPE,
    paths,
    types::{PredictRequest, TrainRequest},
};
use crate::domain::{ModelInfo, PredictionResult, PredictionText};
use crate::infrastructure::log_messages::remote as log_msg;
use crate::services::{PredictionService, ServiceError, ServiceResult, TrainingService};
use async_trait::async_trait;
use bytes::Bytes;
use http::{header::CONTENT_TYPE, Method, Request, Uri};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default time budget for one remote call, including the response body
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Training path of a standalone training service
pub const STANDALONE_TRAIN_PATH: &str = "/train";

/// Minimal JSON-over-HTTP client shared by the remote services
#[derive(Clone)]
pub struct RemoteClient {
    base_url: String,
    client: Client<HttpConnector, Full<Bytes>>,
    timeout: Duration,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self {
            base_url,
            client,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn uri(&self, path: &str) -> ServiceResult<Uri> {
        let target = format!("{}{}", self.base_url, path);
        target
            .parse()
            .map_err(|_| ServiceError::RequestFailed(format!("Invalid URL: {target}")))
    }

    /// POST `body` as JSON to `path` and decode the JSON reply
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> ServiceResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let payload =
            serde_json::to_vec(body).map_err(|e| ServiceError::RequestFailed(e.to_string()))?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.uri(path)?)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(Full::new(Bytes::from(payload)))
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        let exchange = async {
            let response = self
                .client
                .request(request)
                .await
                .map_err(|e| ServiceError::Unavailable(format!("Connection error: {e}")))?;
            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| ServiceError::InvalidResponse(format!("Body collection error: {e}")))?
                .to_bytes();
            Ok::<_, ServiceError>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| ServiceError::Timeout(self.timeout))??;

        debug!(path, status = status.as_u16(), "{}", log_msg::RESPONSE_RECEIVED);

        if status.is_server_error() {
            warn!(path, status = status.as_u16(), "{}", log_msg::UPSTREAM_UNAVAILABLE);
            return Err(ServiceError::Unavailable(format!(
                "upstream returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(ServiceError::RequestFailed(format!(
                "upstream returned {status}"
            )));
        }

        serde_json::from_slice(&body).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }
}

/// Prediction backend reached over HTTP
///
/// Posts to [`paths::PREDICT`] unless another path is configured.
pub struct RemotePredictionService {
    client: RemoteClient,
    path: String,
}

impl RemotePredictionService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: RemoteClient::new(base_url, timeout),
            path: paths::PREDICT.to_string(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

#[async_trait]
impl PredictionService for RemotePredictionService {
    fn id(&self) -> &'static str {
        "remote"
    }

    async fn predict(&self, text: &PredictionText) -> ServiceResult<PredictionResult> {
        let request = PredictRequest {
            text: text.as_ref().to_string(),
            model_version: None,
        };
        self.client.post_json(&self.path, &request).await
    }
}

/// Training backend reached over HTTP
///
/// Posts to [`paths::TRAIN`] unless another path is configured; a standalone
/// training service usually serves [`STANDALONE_TRAIN_PATH`].
pub struct RemoteTrainingService {
    client: RemoteClient,
    path: String,
}

impl RemoteTrainingService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: RemoteClient::new(base_url, timeout),
            path: paths::TRAIN.to_string(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

#[async_trait]
impl TrainingService for RemoteTrainingService {
    fn id(&self) -> &'static str {
        "remote"
    }

    async fn train(&self, current: &ModelInfo) -> ServiceResult<ModelInfo> {
        debug!(
            base_url = self.client.base_url(),
            current_version = %current.version,
            "{}",
            log_msg::TRAINING_REQUESTED
        );
        self.client
            .post_json(&self.path, &TrainRequest { retrain: true })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sentiment;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Serve `app` on an ephemeral local port and return its base URL
    async fn run_mock_backend(app: Router) -> String {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn text(s: &str) -> PredictionText {
        PredictionText::try_new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn decodes_prediction_from_snake_case_backend() {
        let app = Router::new().route(
            paths::PREDICT,
            post(|Json(request): Json<PredictRequest>| async move {
                assert_eq!(request.text, "great stuff");
                Json(serde_json::json!({
                    "prediction_id": "0190a5c4-6a3e-7cc1-8f0e-3f1b2c4d5e6f",
                    "sentiment": "positive",
                    "confidence": 0.81,
                    "timestamp": "2025-01-01T00:00:00Z"
                }))
            }),
        );
        let base_url = run_mock_backend(app).await;
        let service = RemotePredictionService::new(base_url, DEFAULT_REQUEST_TIMEOUT);

        let result = service.predict(&text("great stuff")).await.unwrap();

        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.confidence.into_inner(), 0.81);
    }

    #[tokio::test]
    async fn decodes_model_from_standalone_trainer() {
        let app = Router::new().route(
            STANDALONE_TRAIN_PATH,
            post(|Json(request): Json<TrainRequest>| async move {
                assert!(request.retrain);
                Json(serde_json::json!({
                    "model_id": "3f2b9c1e-0d4a-4e6b-9a51-2c7f8e1d0b3a",
                    "accuracy": 0.91,
                    "version": "20250101_120000",
                    "created_at": "2025-01-01T12:00:00.123456"
                }))
            }),
        );
        let base_url = run_mock_backend(app).await;
        let service = RemoteTrainingService::new(base_url, DEFAULT_REQUEST_TIMEOUT)
            .with_path(STANDALONE_TRAIN_PATH);

        let model = service.train(&ModelInfo::seed()).await.unwrap();

        assert_eq!(model.id.as_ref(), "3f2b9c1e-0d4a-4e6b-9a51-2c7f8e1d0b3a");
        assert_eq!(model.version.as_ref(), "20250101_120000");
        assert_eq!(model.accuracy.into_inner(), 0.91);
        assert!(model.is_active());
    }

    #[tokio::test]
    async fn server_errors_map_to_unavailable() {
        let app = Router::new().route(
            paths::TRAIN,
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base_url = run_mock_backend(app).await;
        let service = RemoteTrainingService::new(base_url, DEFAULT_REQUEST_TIMEOUT);

        let outcome = service.train(&ModelInfo::seed()).await;

        assert!(matches!(outcome, Err(ServiceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn client_errors_map_to_request_failed() {
        let app = Router::new().route(
            paths::PREDICT,
            post(|| async { (StatusCode::BAD_REQUEST, "nope") }),
        );
        let base_url = run_mock_backend(app).await;
        let service = RemotePredictionService::new(base_url, DEFAULT_REQUEST_TIMEOUT);

        let outcome = service.predict(&text("hello")).await;

        assert!(matches!(outcome, Err(ServiceError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn malformed_payload_maps_to_invalid_response() {
        let app = Router::new().route(
            paths::PREDICT,
            post(|| async { Json(serde_json::json!({ "sentiment": "neutral" })) }),
        );
        let base_url = run_mock_backend(app).await;
        let service = RemotePredictionService::new(base_url, DEFAULT_REQUEST_TIMEOUT);

        let outcome = service.predict(&text("hello")).await;

        assert!(matches!(outcome, Err(ServiceError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let app = Router::new().route(
            paths::PREDICT,
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let base_url = run_mock_backend(app).await;
        let service = RemotePredictionService::new(base_url, Duration::from_millis(50));

        let outcome = service.predict(&text("hello")).await;

        assert_eq!(
            outcome,
            Err(ServiceError::Timeout(Duration::from_millis(50)))
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        let service =
            RemotePredictionService::new("http://127.0.0.1:9", Duration::from_secs(2));

        let outcome = service.predict(&text("hello")).await;

        assert!(matches!(
            outcome,
            Err(ServiceError::Unavailable(_)) | Err(ServiceError::Timeout(_))
        ));
    }
}
