//! Ordinary Least Squares

use crate::{check_fit_input, check_predict_input, EstimatorError, Regressor};
use linfa::traits::Fit;
use linfa::Dataset;
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

const MODEL: &str = "linear regression";

/// Linear regression with intercept, fit by `linfa-linear`.
///
/// Only the coefficients are kept, so the encoded model does not depend
/// on linfa's own layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fit by least squares on `x` (`n_samples x n_features`) and `y`
    pub fn fit(x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<Self, EstimatorError> {
        check_fit_input(&x, &y)?;

        let dataset = Dataset::new(x.to_owned(), y.to_owned());
        let fitted = linfa_linear::LinearRegression::new()
            .fit(&dataset)
            .map_err(|e| EstimatorError::FitFailed {
                model: MODEL,
                reason: e.to_string(),
            })?;

        let coefficients = fitted.params().to_vec();
        let intercept = fitted.intercept();
        if !intercept.is_finite() || !coefficients.iter().all(|c| c.is_finite()) {
            return Err(EstimatorError::FitFailed {
                model: MODEL,
                reason: "least squares produced non-finite coefficients".to_string(),
            });
        }

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    /// Coefficients in feature order
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Intercept term
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, EstimatorError> {
        check_predict_input(&x, self.coefficients.len())?;

        let coefficients = ArrayView1::from(self.coefficients.as_slice());
        Ok(x.dot(&coefficients) + self.intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Axis};

    #[test]
    fn test_recovers_exact_coefficients() {
        // y = 3 + 2*x0 - 0.5*x1
        let x = array![
            [1.0, 10.0],
            [2.0, 4.0],
            [3.0, 7.0],
            [4.0, 1.0],
            [5.0, 12.0],
            [6.0, 3.0],
        ];
        let y = x.map_axis(Axis(1), |row| 3.0 + 2.0 * row[0] - 0.5 * row[1]);

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();

        assert!((model.intercept() - 3.0).abs() < 1e-6);
        assert!((model.coefficients()[0] - 2.0).abs() < 1e-6);
        assert!((model.coefficients()[1] + 0.5).abs() < 1e-6);

        let predicted = model.predict(array![[10.0, 2.0]].view()).unwrap();
        assert!((predicted[0] - 22.0).abs() < 1e-6);
    }

    #[test]
    fn test_feature_count_checked() {
        let model =
            LinearRegression::fit(array![[1.0], [2.0], [3.0]].view(), array![1.0, 2.0, 4.0].view())
                .unwrap();
        assert_eq!(model.n_features(), 1);
        assert_eq!(
            model.predict(array![[1.0, 2.0]].view()),
            Err(EstimatorError::FeatureCountMismatch { expected: 1, actual: 2 })
        );
    }

    #[test]
    fn test_shape_mismatch() {
        assert_eq!(
            LinearRegression::fit(array![[1.0], [2.0]].view(), array![1.0].view()),
            Err(EstimatorError::ShapeMismatch { samples: 2, targets: 1 })
        );
    }
}
