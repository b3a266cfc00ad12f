//! Price Regressors
//!
//! Candidate estimators the model selector compares. Fitting is delegated
//! to `linfa` (least squares), `smartcore` (random forest) and `gbdt`
//! (boosted trees); the wrappers here share input checks and serialize
//! with serde so the winner can be persisted as part of a model artifact.

mod boosting;
mod forest;
mod linear;
mod model;

pub use boosting::{BoostingParams, GradientBoostingRegressor};
pub use forest::RandomForestRegressor;
pub use linear::LinearRegression;
pub use model::{ModelKind, TrainedModel};

use ndarray::{Array1, ArrayView1, ArrayView2};
use thiserror::Error;

/// Errors during fitting or prediction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("Cannot fit with zero samples")]
    EmptyInput,
    #[error("Sample count mismatch: {samples} rows in X but {targets} targets")]
    ShapeMismatch { samples: usize, targets: usize },
    #[error("Feature count mismatch: model expects {expected}, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },
    #[error("Input contains NaN or infinite values")]
    NonFiniteInput,
    #[error("{model} failed to fit: {reason}")]
    FitFailed { model: &'static str, reason: String },
    #[error("{model} failed to predict: {reason}")]
    PredictFailed { model: &'static str, reason: String },
    #[error("Unknown model kind: {0}")]
    UnknownModel(String),
}

/// A fitted regressor over a dense design matrix
pub trait Regressor {
    /// Feature count the model was fit on
    fn n_features(&self) -> usize;

    /// Predict one value per row of `x`
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, EstimatorError>;
}

/// Shared validation for `fit` inputs
pub(crate) fn check_fit_input(
    x: &ArrayView2<'_, f64>,
    y: &ArrayView1<'_, f64>,
) -> Result<(), EstimatorError> {
    if x.nrows() != y.len() {
        return Err(EstimatorError::ShapeMismatch {
            samples: x.nrows(),
            targets: y.len(),
        });
    }
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(EstimatorError::EmptyInput);
    }
    if !x.iter().chain(y.iter()).all(|v| v.is_finite()) {
        return Err(EstimatorError::NonFiniteInput);
    }
    Ok(())
}

/// Shared validation for `predict` inputs
pub(crate) fn check_predict_input(
    x: &ArrayView2<'_, f64>,
    n_features: usize,
) -> Result<(), EstimatorError> {
    if x.ncols() != n_features {
        return Err(EstimatorError::FeatureCountMismatch {
            expected: n_features,
            actual: x.ncols(),
        });
    }
    if !x.iter().all(|v| v.is_finite()) {
        return Err(EstimatorError::NonFiniteInput);
    }
    Ok(())
}
