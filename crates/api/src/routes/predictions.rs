//! Prediction Routes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{Datelike, Local};
use feature_engine::RawRecord;
use inference_engine::InferenceEngine;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Response for prediction endpoints
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    /// Price rounded to two decimals
    pub predicted_price: f64,
    pub currency: String,
    /// Normalized features, for raw listings only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<f64>>,
}

fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

async fn served_engine(
    state: &AppState,
    endpoint: &'static str,
) -> Result<Arc<InferenceEngine>, ApiError> {
    match state.slot.get().await {
        Some(engine) => Ok(engine),
        None => {
            metrics::counter!("carprice_predictions_total", "endpoint" => endpoint, "outcome" => "not_loaded")
                .increment(1);
            Err(ApiError::ModelNotLoaded)
        }
    }
}

fn respond(
    state: &AppState,
    engine: &InferenceEngine,
    endpoint: &'static str,
    row: Vec<f64>,
    echo_features: bool,
) -> Result<Json<PredictionResponse>, ApiError> {
    let start = Instant::now();
    let prediction = engine.predict_row(&row).map_err(|e| {
        metrics::counter!("carprice_predictions_total", "endpoint" => endpoint, "outcome" => "error")
            .increment(1);
        ApiError::from(e)
    })?;

    metrics::counter!("carprice_predictions_total", "endpoint" => endpoint, "outcome" => "ok")
        .increment(1);
    metrics::histogram!("carprice_prediction_latency_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
    debug!("{} predicted {:.4} from {:?}", endpoint, prediction.price, row);

    Ok(Json(PredictionResponse {
        predicted_price: round_price(prediction.price),
        currency: state.settings.prediction.currency.clone(),
        features: echo_features.then_some(row),
    }))
}

fn reject(endpoint: &'static str, error: ApiError) -> ApiError {
    metrics::counter!("carprice_predictions_total", "endpoint" => endpoint, "outcome" => "invalid")
        .increment(1);
    error
}

/// `POST /predict`: pre-encoded features keyed by schema column label
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    const ENDPOINT: &str = "predict";
    let engine = served_engine(&state, ENDPOINT).await?;

    let Json(body) = payload.map_err(|e| reject(ENDPOINT, e.into()))?;
    let row = state
        .validator
        .validate_request(engine.schema(), engine.vocabulary(), &body)
        .map_err(|e| reject(ENDPOINT, e.into()))?;

    respond(&state, &engine, ENDPOINT, row, false)
}

/// `POST /predict/raw`: a free-text listing, normalized with the served
/// model's own schema and vocabulary
pub async fn predict_raw(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RawRecord>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    const ENDPOINT: &str = "predict_raw";
    let engine = served_engine(&state, ENDPOINT).await?;

    let Json(record) = payload.map_err(|e| reject(ENDPOINT, e.into()))?;
    let current_year = state
        .settings
        .prediction
        .current_year
        .unwrap_or_else(|| Local::now().year());
    let vector = engine.normalize(&record, current_year);
    let row = state
        .validator
        .validate_vector(engine.schema(), engine.vocabulary(), &vector)
        .map_err(|e| reject(ENDPOINT, e.into()))?;

    respond(&state, &engine, ENDPOINT, row, true)
}
