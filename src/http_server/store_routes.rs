//! Store HTTP Routes
//!
//! The write-only boundary: accepts arbitrary JSON, rejects empty bodies,
//! and forwards everything else to the store pipeline.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::pipeline::{PipelineError, StorePipeline};
use crate::storage::StoreReceipt;

/// State shared across handlers
pub struct AppState {
    pub pipeline: StorePipeline,
}

/// Error payload returned for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check routes
pub fn health_routes() -> Router {
    Router::new().route("/", get(root))
}

/// Payload intake routes
pub fn store_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/store", post(store_payload))
        .with_state(state)
}

async fn root() -> &'static str {
    "200OK"
}

/// POST /store - sanitize and persist one JSON payload
async fn store_payload(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<StoreReceipt>), (StatusCode, Json<ErrorResponse>)> {
    // Empty-body validation is this boundary's job, not the pipeline's.
    if payload.as_object().is_some_and(|map| map.is_empty()) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "empty JSON body is not allowed",
        ));
    }

    info!("storing payload");
    match state.pipeline.store(payload).await {
        Ok(receipt) => Ok((StatusCode::CREATED, Json(receipt))),
        Err(PipelineError::Sanitize(err)) => {
            Err(reject(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string()))
        }
        Err(PipelineError::Storage(err)) => Err(reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            &err.to_string(),
        )),
    }
}

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::storage::FileBackend;

    fn test_router(temp: &TempDir) -> Router {
        let backend = Arc::new(FileBackend::new(temp.path()).unwrap());
        let state = Arc::new(AppState {
            pipeline: StorePipeline::new(backend),
        });
        Router::new().merge(health_routes()).merge(store_routes(state))
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/store")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_returns_200ok() {
        let temp = TempDir::new().unwrap();
        let response = test_router(&temp)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"200OK");
    }

    #[tokio::test]
    async fn test_store_returns_created_with_receipt() {
        let temp = TempDir::new().unwrap();
        let response = test_router(&temp)
            .oneshot(json_request(r#"{"$username": "Joe"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let receipt: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(receipt["status"], "stored");
        assert!(receipt["filename"].as_str().unwrap().ends_with(".json"));
    }

    #[tokio::test]
    async fn test_empty_body_rejected() {
        let temp = TempDir::new().unwrap();
        let response = test_router(&temp).oneshot(json_request("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["error"], "empty JSON body is not allowed");
    }

    #[tokio::test]
    async fn test_non_object_payload_rejected() {
        let temp = TempDir::new().unwrap();
        let response = test_router(&temp)
            .oneshot(json_request("[1, 2, 3]"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
