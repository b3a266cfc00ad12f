//! Car Price Prediction API Server
//!
//! HTTP boundary over the served price model: encoded and raw-listing
//! prediction, health, explicit model reload and Prometheus metrics.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use data_validator::Validator;
use inference_engine::{InferenceEngine, InferenceError, ModelSlot};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use model_store::StorageError;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
mod settings;

pub use error::{ApiError, ErrorBody};
pub use settings::{LoggingSettings, ModelSettings, PredictionSettings, ServerSettings, Settings};

/// Application state shared across handlers
pub struct AppState {
    /// Served model
    pub slot: ModelSlot,
    /// Request validation
    pub validator: Validator,
    /// Effective settings
    pub settings: Settings,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus renderer; `None` when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, slot: ModelSlot, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            slot,
            validator: Validator::new(settings.validation.clone()),
            settings,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics,
        }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::health::root))
        .route("/api/v1/health", get(routes::health::health))
        .route("/predict", post(routes::predictions::predict))
        .route("/predict/raw", post(routes::predictions::predict_raw))
        .route("/api/v1/model/reload", post(routes::model::reload))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}

/// Load the configured model into a slot.
///
/// A missing or unreadable artifact is an error when
/// `require_loaded` is set; otherwise the slot starts empty and every
/// prediction answers "model not loaded".
pub fn load_model_slot(settings: &ModelSettings) -> Result<ModelSlot, InferenceError> {
    match InferenceEngine::load(&settings.path) {
        Ok(engine) => Ok(ModelSlot::with_engine(engine)),
        Err(e) if settings.require_loaded => Err(e),
        Err(InferenceError::ModelLoadError(StorageError::NotFound(path))) => {
            warn!("No model at {}; serving without a model", path);
            Ok(ModelSlot::empty())
        }
        Err(e) => {
            warn!("Model failed to load ({}); serving without a model", e);
            Ok(ModelSlot::empty())
        }
    }
}

/// Initialize logging
pub fn init_logging(level: Level, json: bool) -> anyhow::Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

/// Run the server
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let recorder = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {}", e))?;

    let slot = load_model_slot(&settings.model)?;
    let loaded = slot.is_loaded().await;
    metrics::gauge!("carprice_model_loaded").set(if loaded { 1.0 } else { 0.0 });

    let addr = settings.server.addr();
    let state = Arc::new(AppState::new(settings, slot, Some(recorder)));
    let app = create_router(state);

    info!("Starting API server on {} (model loaded: {})", addr, loaded);

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_root_banner() {
        let response = create_router(empty_state())
            .oneshot(get_request("/"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Car Price Prediction API is running" })
        );
    }

    #[tokio::test]
    async fn test_health_with_model() {
        let response = create_router(test_state())
            .oneshot(get_request("/api/v1/health"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], json!("healthy"));
        assert_eq!(body["model"]["loaded"], json!(true));
        assert_eq!(body["model"]["schema"], json!("basic"));
        assert_eq!(body["model"]["model_kind"], json!("LinearRegression"));
        assert_eq!(body["model"]["trained_at"], json!("2023-11-14T22:13:20+00:00"));
    }

    #[tokio::test]
    async fn test_health_without_model() {
        let response = create_router(empty_state())
            .oneshot(get_request("/api/v1/health"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], json!("degraded"));
        assert_eq!(body["model"], json!({ "loaded": false }));
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let response = create_router(empty_state())
            .oneshot(get_request("/metrics"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_required_model_missing_is_fatal() {
        let settings = ModelSettings {
            path: "/nonexistent/car_price_model.bin".to_string(),
            require_loaded: true,
        };
        assert!(matches!(
            load_model_slot(&settings),
            Err(InferenceError::ModelLoadError(StorageError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_optional_model_missing_starts_empty() {
        let settings = ModelSettings {
            path: "/nonexistent/car_price_model.bin".to_string(),
            require_loaded: false,
        };
        let slot = load_model_slot(&settings).unwrap();
        assert!(!slot.is_loaded().await);
    }
}
