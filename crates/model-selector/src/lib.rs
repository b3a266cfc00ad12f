//! Model Selection
//!
//! Splits a cleaned dataset into train and holdout partitions, scores
//! every candidate regressor by R² on the holdout, and refits the winner
//! on all rows.

mod scoring;
mod selector;
mod split;

pub use scoring::{mean_absolute_error, r2_score};
pub use selector::{training_arrays, ModelSelector, Selection, SelectorConfig};
pub use split::train_test_split;

use estimators::EstimatorError;
use thiserror::Error;

/// Model selection errors
#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("Insufficient data: {rows} rows cannot fill both a train and a test partition")]
    InsufficientData { rows: usize },
    #[error("Test size must be in (0, 1), got {0}")]
    InvalidTestSize(f64),
    #[error("No candidate models configured")]
    NoCandidates,
    #[error("Row count mismatch: {rows} feature rows but {targets} targets")]
    ShapeMismatch { rows: usize, targets: usize },
    #[error("Estimator error: {0}")]
    Estimator(#[from] EstimatorError),
}
