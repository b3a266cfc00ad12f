//! Gradient Boosted Trees
//!
//! Squared-error boosting fit by `gbdt`. The classic gradient boosting
//! machine and the XGBoost-style booster run the same learner and differ
//! only in their hyperparameters.

use crate::{check_fit_input, check_predict_input, EstimatorError, Regressor};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

const MODEL: &str = "gradient boosting";
const SQUARED_ERROR: &str = "SquaredError";

/// Boosting hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostingParams {
    /// Number of boosting stages
    pub n_estimators: usize,
    /// Shrinkage applied to each tree
    pub learning_rate: f32,
    /// Maximum depth of each tree
    pub max_depth: u32,
    /// Minimum samples in each leaf
    pub min_leaf_size: usize,
}

impl BoostingParams {
    /// Gradient boosting machine: 100 depth-3 trees, learning rate 0.1
    pub fn gradient_boosting() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            min_leaf_size: 1,
        }
    }

    /// XGBoost defaults: 100 depth-6 trees, eta 0.3
    pub fn xgboost() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.3,
            max_depth: 6,
            min_leaf_size: 1,
        }
    }

    fn to_config(self, n_features: usize) -> Config {
        let mut config = Config::new();
        config.set_feature_size(n_features);
        config.set_iterations(self.n_estimators);
        config.set_shrinkage(self.learning_rate);
        config.set_max_depth(self.max_depth);
        config.set_min_leaf_size(self.min_leaf_size);
        config.set_loss(SQUARED_ERROR);
        config
    }
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self::gradient_boosting()
    }
}

/// Additive ensemble of shrunken regression trees
#[derive(Serialize, Deserialize)]
pub struct GradientBoostingRegressor {
    params: BoostingParams,
    n_features: usize,
    booster: GBDT,
}

impl GradientBoostingRegressor {
    /// Fit a booster on `x` (`n_samples x n_features`) and `y`
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        params: BoostingParams,
    ) -> Result<Self, EstimatorError> {
        check_fit_input(&x, &y)?;
        if params.n_estimators == 0 {
            return Err(EstimatorError::FitFailed {
                model: MODEL,
                reason: "at least one boosting stage is required".to_string(),
            });
        }

        let mut training: DataVec = x
            .rows()
            .into_iter()
            .zip(y.iter())
            .map(|(row, &target)| Data::new_training_data(features(row), 1.0, target as f32, None))
            .collect();

        let mut booster = GBDT::new(&params.to_config(x.ncols()));
        booster.fit(&mut training);

        debug!(
            "Fitted boosting ensemble: {} stages, lr={}, depth={}",
            params.n_estimators, params.learning_rate, params.max_depth
        );
        Ok(Self {
            params,
            n_features: x.ncols(),
            booster,
        })
    }

    /// Hyperparameters
    pub fn params(&self) -> &BoostingParams {
        &self.params
    }
}

impl Regressor for GradientBoostingRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, EstimatorError> {
        check_predict_input(&x, self.n_features)?;

        let rows: DataVec = x
            .rows()
            .into_iter()
            .map(|row| Data::new_test_data(features(row), None))
            .collect();
        let predicted: Array1<f64> = self
            .booster
            .predict(&rows)
            .into_iter()
            .map(f64::from)
            .collect();

        if !predicted.iter().all(|p| p.is_finite()) {
            return Err(EstimatorError::PredictFailed {
                model: MODEL,
                reason: "booster produced a non-finite value".to_string(),
            });
        }
        Ok(predicted)
    }
}

impl fmt::Debug for GradientBoostingRegressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientBoostingRegressor")
            .field("params", &self.params)
            .field("n_features", &self.n_features)
            .finish_non_exhaustive()
    }
}

fn features(row: ArrayView1<'_, f64>) -> Vec<f32> {
    row.iter().map(|&v| v as f32).collect()
}
