//! Liveness and Health Routes

use axum::{extract::State, Json};
use chrono::DateTime;
use inference_engine::ModelSummary;
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Root banner
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelStatus,
}

/// Served model status
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
    #[serde(flatten)]
    pub summary: Option<ModelSummary>,
}

/// `GET /`
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Car Price Prediction API is running",
    })
}

/// `GET /api/v1/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let summary = state.slot.get().await.map(|engine| engine.summary());
    let trained_at = summary
        .as_ref()
        .and_then(|s| DateTime::from_timestamp_millis(s.trained_at_ms))
        .map(|t| t.to_rfc3339());

    Json(HealthResponse {
        status: if summary.is_some() { "healthy" } else { "degraded" },
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelStatus {
            loaded: summary.is_some(),
            trained_at,
            summary,
        },
    })
}
