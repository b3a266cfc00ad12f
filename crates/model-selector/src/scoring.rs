//! Regression Scores
//!
//! Thin wrappers over `smartcore::metrics` that pin down the degenerate
//! holdouts the library leaves undefined.

use ndarray::ArrayView1;
use smartcore::metrics;

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Returns 0.0 for an empty holdout or when the targets have no variance.
pub fn r2_score(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
    let n = y_true.len();
    if n == 0 {
        return 0.0;
    }
    let mean = y_true.sum() / n as f64;
    if y_true.iter().all(|t| *t == mean) {
        return 0.0;
    }
    metrics::r2(&y_true.to_vec(), &y_pred.to_vec())
}

/// Mean absolute error; 0.0 for an empty holdout
pub fn mean_absolute_error(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    metrics::mean_absolute_error(&y_true.to_vec(), &y_pred.to_vec())
}
