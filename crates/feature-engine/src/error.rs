//! Feature Engine Error Types

use thiserror::Error;

/// Errors raised outside the per-field parsers.
///
/// Field parsing itself never fails; these cover I/O and caller mistakes.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Feature vectors and targets were not paired one-to-one
    #[error("Length mismatch: {vectors} feature vectors but {targets} targets")]
    LengthMismatch { vectors: usize, targets: usize },

    /// Vocabulary file could not be read or parsed
    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// Unknown schema name
    #[error("Unknown feature schema: {0} (expected full, basic or legacy)")]
    UnknownSchema(String),

    /// Dataset could not be opened or its header read
    #[error("Dataset error in {path}: {message}")]
    Dataset { path: String, message: String },
}

