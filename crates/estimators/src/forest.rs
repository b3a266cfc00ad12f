//! Random Forest Regressor

use crate::{check_fit_input, check_predict_input, EstimatorError, Regressor};
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor as Forest, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fmt;
use tracing::debug;

const MODEL: &str = "random forest";

type DenseForest = Forest<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Bagged ensemble of fully grown regression trees, fit by `smartcore`.
///
/// Every split considers all features and bootstrap sampling is driven
/// by `seed`, so a forest is reproducible from its seed.
#[derive(Serialize, Deserialize)]
pub struct RandomForestRegressor {
    n_trees: u16,
    seed: u64,
    n_features: usize,
    forest: DenseForest,
}

impl RandomForestRegressor {
    /// Trees grown by [`RandomForestRegressor::fit`]
    pub const DEFAULT_TREES: u16 = 100;

    /// Fit a forest of [`Self::DEFAULT_TREES`] trees
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        seed: u64,
    ) -> Result<Self, EstimatorError> {
        Self::fit_with_trees(x, y, Self::DEFAULT_TREES, seed)
    }

    /// Fit a forest of `n_trees` trees
    pub fn fit_with_trees(
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        n_trees: u16,
        seed: u64,
    ) -> Result<Self, EstimatorError> {
        check_fit_input(&x, &y)?;
        let n_trees = n_trees.max(1);

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(n_trees.into())
            .with_m(x.ncols())
            .with_seed(seed);
        let targets = y.to_vec();
        let forest = Forest::fit(&dense(x), &targets, params).map_err(|e| {
            EstimatorError::FitFailed {
                model: MODEL,
                reason: e.to_string(),
            }
        })?;

        debug!(
            "Fitted random forest: {} trees on {} rows (seed {})",
            n_trees,
            x.nrows(),
            seed
        );
        Ok(Self {
            n_trees,
            seed,
            n_features: x.ncols(),
            forest,
        })
    }

    /// Number of trees in the ensemble
    pub fn n_trees(&self) -> u16 {
        self.n_trees
    }

    /// Seed used for bootstrap sampling
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Regressor for RandomForestRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, EstimatorError> {
        check_predict_input(&x, self.n_features)?;
        if x.nrows() == 0 {
            return Ok(Array1::zeros(0));
        }

        let predicted = self
            .forest
            .predict(&dense(x))
            .map_err(|e| EstimatorError::PredictFailed {
                model: MODEL,
                reason: e.to_string(),
            })?;
        Ok(Array1::from(predicted))
    }
}

impl fmt::Debug for RandomForestRegressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomForestRegressor")
            .field("n_trees", &self.n_trees)
            .field("seed", &self.seed)
            .field("n_features", &self.n_features)
            .finish_non_exhaustive()
    }
}

fn dense(x: ArrayView2<'_, f64>) -> DenseMatrix<f64> {
    let rows: Vec<Vec<f64>> = x.rows().into_iter().map(|row| row.to_vec()).collect();
    DenseMatrix::from_2d_vec(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn step_data() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((40, 2), |(i, j)| if j == 0 { i as f64 } else { (i % 3) as f64 });
        let y = Array1::from_shape_fn(40, |i| if i < 20 { 10.0 } else { 50.0 });
        (x, y)
    }

    #[test]
    fn test_forest_learns_step() {
        let (x, y) = step_data();
        let forest = RandomForestRegressor::fit_with_trees(x.view(), y.view(), 20, 7).unwrap();

        let predicted = forest.predict(x.view()).unwrap();
        let max_error = predicted
            .iter()
            .zip(y.iter())
            .map(|(p, t)| (p - t).abs())
            .fold(0.0, f64::max);
        assert!(max_error < 20.0, "max error {}", max_error);
        assert!(predicted[0] < 20.0);
        assert!(predicted[39] > 40.0);
    }

    #[test]
    fn test_same_seed_same_predictions() {
        let (x, y) = step_data();
        let a = RandomForestRegressor::fit_with_trees(x.view(), y.view(), 5, 42).unwrap();
        let b = RandomForestRegressor::fit_with_trees(x.view(), y.view(), 5, 42).unwrap();
        assert_eq!(a.predict(x.view()).unwrap(), b.predict(x.view()).unwrap());
        assert_eq!(a.n_trees(), 5);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_predictions_stay_within_target_range() {
        let (x, y) = step_data();
        let forest = RandomForestRegressor::fit_with_trees(x.view(), y.view(), 10, 3).unwrap();
        let far = Array2::from_shape_vec((2, 2), vec![-100.0, 0.0, 500.0, 2.0]).unwrap();
        for p in forest.predict(far.view()).unwrap().iter() {
            assert!((10.0..=50.0).contains(p), "prediction {} outside targets", p);
        }
    }

    #[test]
    fn test_feature_count_checked() {
        let (x, y) = step_data();
        let forest = RandomForestRegressor::fit_with_trees(x.view(), y.view(), 3, 0).unwrap();
        assert_eq!(
            forest.predict(Array2::<f64>::zeros((1, 3)).view()).unwrap_err(),
            EstimatorError::FeatureCountMismatch { expected: 2, actual: 3 }
        );
    }
}
