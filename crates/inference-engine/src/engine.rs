//! Inference Engine Implementation

use crate::InferenceError;
use estimators::ModelKind;
use feature_engine::{FeatureSchema, FeatureVector, RawRecord, RecordNormalizer, Vocabulary};
use model_store::{load_artifact, ModelArtifact};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// A single price prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Raw model output
    pub price: f64,
    /// Time spent in the model, in microseconds
    pub latency_us: u64,
}

/// What is being served, for health reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub model_kind: ModelKind,
    pub schema: String,
    pub features: Vec<String>,
    pub vocabulary_version: u32,
    pub holdout_r2: Option<f64>,
    pub trained_at_ms: i64,
    pub source: String,
}

/// A loaded model artifact ready to answer predictions
pub struct InferenceEngine {
    artifact: ModelArtifact,
    source: String,
}

impl InferenceEngine {
    /// Load an artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let artifact = load_artifact(path)?;
        let engine = Self::from_artifact(artifact, path.display().to_string())?;
        info!(
            "Inference engine ready: {} over schema {} from {}",
            engine.artifact.model.kind().display_name(),
            engine.artifact.schema.name,
            engine.source
        );
        Ok(engine)
    }

    /// Wrap an in-memory artifact; `source` labels it in summaries
    pub fn from_artifact(
        artifact: ModelArtifact,
        source: impl Into<String>,
    ) -> Result<Self, InferenceError> {
        if artifact.schema.len() != artifact.model.n_features() {
            return Err(InferenceError::SchemaMismatch {
                schema: artifact.schema.len(),
                model: artifact.model.n_features(),
            });
        }
        Ok(Self {
            artifact,
            source: source.into(),
        })
    }

    /// Feature layout requests must follow
    pub fn schema(&self) -> &FeatureSchema {
        &self.artifact.schema
    }

    /// Categorical codes the model was trained with
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.artifact.vocabulary
    }

    /// The underlying artifact
    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Predict from a dense row in schema order
    pub fn predict_row(&self, row: &[f64]) -> Result<Prediction, InferenceError> {
        let expected = self.artifact.schema.len();
        if row.len() != expected {
            return Err(InferenceError::InvalidInputShape {
                expected,
                actual: row.len(),
            });
        }

        let start = Instant::now();
        let price = self.artifact.model.predict_one(row)?;
        let latency_us = start.elapsed().as_micros() as u64;
        debug!("Inference completed in {}us", latency_us);

        Ok(Prediction { price, latency_us })
    }

    /// Normalize a raw listing with this artifact's schema and vocabulary
    pub fn normalize(&self, record: &RawRecord, current_year: i32) -> FeatureVector {
        RecordNormalizer::new(
            self.artifact.schema.clone(),
            self.artifact.vocabulary.clone(),
            current_year,
        )
        .normalize(record)
    }

    /// Summary for health reporting
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            model_kind: self.artifact.model.kind(),
            schema: self.artifact.schema.name.clone(),
            features: self.artifact.schema.labels().map(String::from).collect(),
            vocabulary_version: self.artifact.vocabulary.version,
            holdout_r2: self.artifact.report.best_score().map(|s| s.r2),
            trained_at_ms: self.artifact.trained_at_ms,
            source: self.source.clone(),
        }
    }
}
