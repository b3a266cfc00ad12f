//! Model Artifact

use estimators::{ModelKind, TrainedModel};
use feature_engine::{FeatureSchema, Vocabulary};
use serde::{Deserialize, Serialize};

/// Bumped whenever the encoded layout of [`ModelArtifact`] changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Holdout score of one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub kind: ModelKind,
    pub r2: f64,
    pub mae: f64,
}

/// Outcome of a model selection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionReport {
    /// Scores in candidate order
    pub candidates: Vec<CandidateScore>,
    /// Winning model family
    pub best: ModelKind,
    pub train_rows: usize,
    pub test_rows: usize,
    pub seed: u64,
    pub test_size: f64,
}

impl SelectionReport {
    /// Score of the winning candidate
    pub fn best_score(&self) -> Option<&CandidateScore> {
        self.candidates.iter().find(|c| c.kind == self.best)
    }
}

/// Everything persisted for one trained model
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub schema: FeatureSchema,
    pub vocabulary: Vocabulary,
    pub model: TrainedModel,
    pub report: SelectionReport,
    /// Unix milliseconds
    pub trained_at_ms: i64,
}

impl ModelArtifact {
    /// Bundle a freshly trained model at the current format version
    pub fn new(
        schema: FeatureSchema,
        vocabulary: Vocabulary,
        model: TrainedModel,
        report: SelectionReport,
        trained_at_ms: i64,
    ) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            schema,
            vocabulary,
            model,
            report,
            trained_at_ms,
        }
    }
}
