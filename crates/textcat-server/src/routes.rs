//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::state::AppState;
use textcat_core::Error;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health_check))
        .route("/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/admin/reload", post(reload))
        .route("/admin/unload", post(unload))
        .fallback(fallback)
        .with_state(state)
}

/// Classification request body
#[derive(Debug, Deserialize)]
struct PredictRequest {
    text: String,
}

/// Classification response body
#[derive(Debug, Serialize)]
struct PredictResponse {
    prediction: String,
    confidence: f32,
}

async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    metrics::counter!("textcat_requests_total").increment(1);
    let started = Instant::now();

    let result = state.service.predict(&req.text).await;
    metrics::histogram!("textcat_predict_latency_us")
        .record(started.elapsed().as_micros() as f64);

    match result {
        Ok(prediction) => {
            metrics::counter!("textcat_predictions_total").increment(1);
            debug!(label = %prediction.label, confidence = prediction.confidence, "request served");
            Ok(Json(PredictResponse {
                prediction: prediction.label,
                confidence: prediction.confidence,
            }))
        }
        Err(err) => {
            metrics::counter!("textcat_errors_total").increment(1);
            Err(AppError::from(err))
        }
    }
}

async fn health_check() -> &'static str {
    "OK"
}

async fn readiness(State(state): State<AppState>) -> Response {
    if state.manager.is_loaded().await {
        (StatusCode::OK, "ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "artifacts not loaded").into_response()
    }
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

async fn reload(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    info!("reload requested");
    match state.manager.reload().await {
        Ok(()) => Ok(Json(json!({ "status": "reloaded" }))),
        Err(err) => {
            warn!(error = %err, "reload failed");
            Err(AppError::Unavailable(err.to_string()))
        }
    }
}

async fn unload(State(state): State<AppState>) -> Json<serde_json::Value> {
    info!("unload requested");
    state.manager.clear_cache().await;
    Json(json!({ "status": "unloaded" }))
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Error handling: maps the internal taxonomy to distinct client-visible
/// statuses so input errors and model unavailability are not collapsed.
#[derive(Debug)]
pub enum AppError {
    /// Client-caused input error (400)
    Validation(String),

    /// Model unavailable: artifacts missing or unreadable (503)
    Unavailable(String),

    /// Unexpected internal failure (500); details stay in the logs
    Internal,
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(msg) => AppError::Validation(msg),
            Error::Load(load) => AppError::Unavailable(load.to_string()),
            other => {
                error!(error = %other, "internal prediction failure");
                AppError::Internal
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
            AppError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "model_unavailable",
                format!("model unavailable: {msg}"),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "prediction failed".to_string(),
            ),
        };

        let body = json!({
            "error": {
                "message": message,
                "type": kind,
            }
        });

        (status, Json(body)).into_response()
    }
}
