//! Model Store
//!
//! Persists the trained model together with everything needed to query it:
//! feature schema, categorical vocabulary and the selection report.

mod artifact;
mod store;

pub use artifact::{CandidateScore, ModelArtifact, SelectionReport, ARTIFACT_FORMAT_VERSION};
pub use store::{load_artifact, save_artifact, DEFAULT_MODEL_PATH};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Model artifact not found: {0}")]
    NotFound(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Incompatible artifact format: expected version {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },
}
