//! API Error Responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationErrors;
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("model not loaded")]
    ModelNotLoaded,
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("malformed request body: {message}")]
    MalformedBody { status: StatusCode, message: String },
    #[error("prediction failed: {0}")]
    Prediction(#[from] InferenceError),
    #[error("model reload failed: {0}")]
    Reload(InferenceError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::ModelNotLoaded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "model not loaded".to_string(),
                Vec::new(),
            ),
            ApiError::Validation(errors) => {
                warn!("Rejected request: {}", errors);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "validation failed".to_string(),
                    errors.messages(),
                )
            }
            ApiError::MalformedBody { status, message } => {
                warn!("Malformed request body: {}", message);
                (status, "malformed request body".to_string(), vec![message])
            }
            ApiError::Prediction(e) => {
                error!("Prediction failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "prediction failed".to_string(),
                    vec![e.to_string()],
                )
            }
            ApiError::Reload(e) => {
                error!("Model reload failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "model reload failed".to_string(),
                    vec![e.to_string()],
                )
            }
            ApiError::Internal(message) => {
                error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                    vec![message],
                )
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}
