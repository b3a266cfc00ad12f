//! Price Inference Engine
//!
//! Wraps a loaded model artifact for serving. An engine is immutable once
//! built; replacing the served model means swapping the engine held by a
//! [`ModelSlot`].

mod engine;
mod slot;

pub use engine::{InferenceEngine, ModelSummary, Prediction};
pub use slot::ModelSlot;

use estimators::EstimatorError;
use model_store::StorageError;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(#[from] StorageError),
    #[error("Inference failed: {0}")]
    InferenceFailed(#[from] EstimatorError),
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Artifact is inconsistent: schema has {schema} features but model expects {model}")]
    SchemaMismatch { schema: usize, model: usize },
}
