//! Model Management Routes

use axum::{extract::State, Json};
use inference_engine::{InferenceEngine, ModelSummary};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Response for a successful reload
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub reloaded: bool,
    pub previous: Option<ModelSummary>,
    pub current: ModelSummary,
}

/// `POST /api/v1/model/reload`: load the configured artifact and swap it in.
///
/// On failure the previously served model, if any, stays in place.
pub async fn reload(State(state): State<Arc<AppState>>) -> Result<Json<ReloadResponse>, ApiError> {
    let path = state.settings.model.path.clone();
    info!("Reloading model from {}", path);

    let loaded = tokio::task::spawn_blocking(move || InferenceEngine::load(path))
        .await
        .map_err(|e| ApiError::Internal(format!("reload task failed: {}", e)))?;

    let engine = match loaded {
        Ok(engine) => engine,
        Err(e) => {
            metrics::counter!("carprice_model_reloads_total", "outcome" => "error").increment(1);
            return Err(ApiError::Reload(e));
        }
    };

    let current = engine.summary();
    let previous = state.slot.swap(engine).await.map(|old| old.summary());
    metrics::counter!("carprice_model_reloads_total", "outcome" => "ok").increment(1);
    metrics::gauge!("carprice_model_loaded").set(1.0);

    Ok(Json(ReloadResponse {
        reloaded: true,
        previous,
        current,
    }))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::test_support::{body_json, fixture_artifact, post_json, state_with};
    use axum::http::StatusCode;
    use inference_engine::ModelSlot;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_reload_swaps_in_artifact() {
        let dir = std::env::temp_dir().join("api-reload-test");
        let path = dir.join("model.bin");
        model_store::save_artifact(&fixture_artifact(), &path).unwrap();

        let state = state_with(ModelSlot::empty(), path.to_str().unwrap());
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/model/reload", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["reloaded"], json!(true));
        assert_eq!(body["previous"], json!(null));
        assert_eq!(body["current"]["schema"], json!("basic"));
        assert!(state.slot.is_loaded().await);

        let response = app
            .oneshot(post_json(
                "/predict",
                json!({
                    "km_driven": 1000, "fuel": 1, "seller_type": 0,
                    "transmission": 1, "owner": 1, "age": 2
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_current_model() {
        let state = crate::test_support::test_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(post_json("/api/v1/model/reload", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], json!("model reload failed"));
        assert!(state.slot.is_loaded().await);
    }
}
