//! Candidate Models

use crate::boosting::{BoostingParams, GradientBoostingRegressor};
use crate::forest::RandomForestRegressor;
use crate::linear::LinearRegression;
use crate::{EstimatorError, Regressor};
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of candidate model families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    LinearRegression,
    RandomForest,
    GradientBoosting,
    XGBoost,
}

impl ModelKind {
    /// All candidates in comparison order
    pub const ALL: [ModelKind; 4] = [
        ModelKind::LinearRegression,
        ModelKind::RandomForest,
        ModelKind::GradientBoosting,
        ModelKind::XGBoost,
    ];

    /// Stable identifier used on the command line and in configs
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "linear-regression",
            ModelKind::RandomForest => "random-forest",
            ModelKind::GradientBoosting => "gradient-boosting",
            ModelKind::XGBoost => "xgboost",
        }
    }

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "Linear Regression",
            ModelKind::RandomForest => "Random Forest",
            ModelKind::GradientBoosting => "Gradient Boosting",
            ModelKind::XGBoost => "XGBoost",
        }
    }

    /// Fit a fresh model of this kind with default hyperparameters.
    ///
    /// `seed` drives bootstrap sampling; the other candidates are
    /// deterministic without it.
    pub fn fit(
        self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        seed: u64,
    ) -> Result<TrainedModel, EstimatorError> {
        let estimator = match self {
            ModelKind::LinearRegression => Estimator::Linear(LinearRegression::fit(x, y)?),
            ModelKind::RandomForest => Estimator::Forest(RandomForestRegressor::fit(x, y, seed)?),
            ModelKind::GradientBoosting => Estimator::Boosting(GradientBoostingRegressor::fit(
                x,
                y,
                BoostingParams::gradient_boosting(),
            )?),
            ModelKind::XGBoost => Estimator::Boosting(GradientBoostingRegressor::fit(
                x,
                y,
                BoostingParams::xgboost(),
            )?),
        };

        Ok(TrainedModel {
            kind: self,
            n_features: x.ncols(),
            estimator,
        })
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "linear-regression" | "linear" => Ok(ModelKind::LinearRegression),
            "random-forest" | "forest" => Ok(ModelKind::RandomForest),
            "gradient-boosting" | "gbm" => Ok(ModelKind::GradientBoosting),
            "xgboost" | "xgb" => Ok(ModelKind::XGBoost),
            _ => Err(EstimatorError::UnknownModel(s.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
enum Estimator {
    Linear(LinearRegression),
    Forest(RandomForestRegressor),
    Boosting(GradientBoostingRegressor),
}

/// A fitted candidate, ready to persist or serve
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainedModel {
    kind: ModelKind,
    n_features: usize,
    estimator: Estimator,
}

impl TrainedModel {
    /// Which model family this is
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Feature count the model was fit on
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    fn regressor(&self) -> &dyn Regressor {
        match &self.estimator {
            Estimator::Linear(m) => m,
            Estimator::Forest(m) => m,
            Estimator::Boosting(m) => m,
        }
    }

    /// Predict one value per row of `x`
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, EstimatorError> {
        self.regressor().predict(x)
    }

    /// Predict a single feature row
    pub fn predict_one(&self, features: &[f64]) -> Result<f64, EstimatorError> {
        let row = ArrayView2::from_shape((1, features.len()), features).map_err(|_| {
            EstimatorError::FeatureCountMismatch {
                expected: self.n_features,
                actual: features.len(),
            }
        })?;
        let predicted = self.predict(row)?;
        predicted.first().copied().ok_or(EstimatorError::EmptyInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Axis};

    fn linear_data() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((25, 2), |(i, j)| if j == 0 { i as f64 } else { (i % 5) as f64 });
        let y = x.map_axis(Axis(1), |r| 1.0 + 3.0 * r[0] + r[1]);
        (x, y)
    }

    #[test]
    fn test_parse_model_kind() {
        assert_eq!("xgboost".parse::<ModelKind>().unwrap(), ModelKind::XGBoost);
        assert_eq!(
            "Random_Forest".parse::<ModelKind>().unwrap(),
            ModelKind::RandomForest
        );
        assert_eq!(
            "linear regression".parse::<ModelKind>().unwrap(),
            ModelKind::LinearRegression
        );
        assert!(matches!(
            "svm".parse::<ModelKind>(),
            Err(EstimatorError::UnknownModel(_))
        ));
        for kind in ModelKind::ALL {
            assert_eq!(kind.as_str().parse::<ModelKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_every_kind_fits_and_predicts() {
        let (x, y) = linear_data();
        for kind in ModelKind::ALL {
            let model = kind.fit(x.view(), y.view(), 42).unwrap();
            assert_eq!(model.kind(), kind);
            assert_eq!(model.n_features(), 2);
            let p = model.predict_one(&[12.0, 2.0]).unwrap();
            assert!(p.is_finite());
            assert!((p - 39.0).abs() < 10.0, "{} predicted {}", kind, p);
        }
    }

    #[test]
    fn test_predict_one_checks_width() {
        let (x, y) = linear_data();
        let model = ModelKind::LinearRegression.fit(x.view(), y.view(), 0).unwrap();
        assert_eq!(
            model.predict_one(&[1.0]),
            Err(EstimatorError::FeatureCountMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_fit_is_reproducible_for_seed() {
        let (x, y) = linear_data();
        for kind in ModelKind::ALL {
            let a = kind.fit(x.view(), y.view(), 9).unwrap();
            let b = kind.fit(x.view(), y.view(), 9).unwrap();
            assert_eq!(a.predict(x.view()).unwrap(), b.predict(x.view()).unwrap(), "{}", kind);
        }
    }
}
