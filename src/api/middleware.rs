//! Middleware applied to every API route

use crate::api::error::ErrorResponse;
use crate::api::headers::X_REQUEST_ID;
use crate::infrastructure::log_messages::http as log_msg;
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Largest error body the error middleware will rewrite
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

fn request_id_of(request: &Request) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Request ID middleware - ensures every request has a unique ID for tracing
///
/// A valid UUID sent by the client is kept; anything else is replaced.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::now_v7);
    let header_value = HeaderValue::from_str(&request_id.to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"));

    request
        .headers_mut()
        .insert(X_REQUEST_ID, header_value.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(X_REQUEST_ID, header_value);
    response
}

/// Logging middleware - logs request/response details with timing
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request_id_of(&request);

    info!(request_id, method = %method, path, "{}", log_msg::INCOMING_REQUEST);

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(
            request_id,
            method = %method,
            path,
            status,
            duration_ms,
            "{}",
            log_msg::REQUEST_FAILED
        );
    } else {
        info!(
            request_id,
            method = %method,
            path,
            status,
            duration_ms,
            "{}",
            log_msg::REQUEST_COMPLETED
        );
    }

    response
}

/// Error handling middleware - stamps the request id into error bodies
///
/// Handlers do not see the request id, so error bodies leave them without
/// one. Bodies that are not our JSON error format pass through untouched.
pub async fn error_handling_middleware(request: Request, next: Next) -> Response {
    let request_id = request_id_of(&request);
    let response = next.run(request).await;

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if response.status().is_success() || !is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(request_id, error = %e, "{}", log_msg::REQUEST_FAILED);
            return ErrorResponse::new("INTERNAL_ERROR", "Failed to read error body")
                .with_request_id(request_id)
                .into_response_with_status(parts.status);
        }
    };

    match serde_json::from_slice::<ErrorResponse>(&bytes) {
        Ok(error_response) => error_response
            .with_request_id(request_id)
            .into_response_with_status(parts.status),
        Err(_) => Response::from_parts(parts, Body::from(bytes)),
    }
}
