//! Holdout Model Selector

use crate::scoring::{mean_absolute_error, r2_score};
use crate::split::train_test_split;
use crate::SelectorError;
use estimators::{EstimatorError, ModelKind, TrainedModel};
use feature_engine::FilteredDataset;
use model_store::{CandidateScore, SelectionReport};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::time::Instant;
use tracing::{info, warn};

/// Selection settings
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    /// Fraction of rows held out for scoring
    pub test_size: f64,
    /// Seed for the split and for seeded estimators
    pub seed: u64,
    /// Candidates in comparison order; earlier wins ties
    pub candidates: Vec<ModelKind>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
            candidates: ModelKind::ALL.to_vec(),
        }
    }
}

/// Winning model refit on every row, plus how it won
#[derive(Debug)]
pub struct Selection {
    pub model: TrainedModel,
    pub report: SelectionReport,
}

/// Picks the candidate with the best holdout R²
pub struct ModelSelector {
    config: SelectorConfig,
}

impl ModelSelector {
    /// Create a selector
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Score every candidate on a seeded holdout split and refit the best
    /// one on all of `x`/`y`.
    ///
    /// A candidate that fails to fit is logged and left out of the report;
    /// selection only fails if none of them fit.
    pub fn select(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
    ) -> Result<Selection, SelectorError> {
        if self.config.candidates.is_empty() {
            return Err(SelectorError::NoCandidates);
        }
        if x.nrows() != y.len() {
            return Err(SelectorError::ShapeMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }

        let (train, test) = train_test_split(x.nrows(), self.config.test_size, self.config.seed)?;
        let x_train = x.select(Axis(0), &train);
        let y_train = y.select(Axis(0), &train);
        let x_test = x.select(Axis(0), &test);
        let y_test = y.select(Axis(0), &test);

        info!(
            "Comparing {} candidates on {} train / {} test rows",
            self.config.candidates.len(),
            train.len(),
            test.len()
        );

        let mut scores: Vec<CandidateScore> = Vec::with_capacity(self.config.candidates.len());
        let mut timings = Vec::with_capacity(self.config.candidates.len());
        let mut first_error: Option<EstimatorError> = None;

        for &kind in &self.config.candidates {
            let started = Instant::now();
            let scored = kind
                .fit(x_train.view(), y_train.view(), self.config.seed)
                .and_then(|model| model.predict(x_test.view()));

            match scored {
                Ok(predicted) => {
                    scores.push(CandidateScore {
                        kind,
                        r2: r2_score(y_test.view(), predicted.view()),
                        mae: mean_absolute_error(y_test.view(), predicted.view()),
                    });
                    timings.push(started.elapsed().as_millis());
                }
                Err(e) => {
                    warn!("Candidate {} failed: {}", kind.display_name(), e);
                    first_error.get_or_insert(e);
                }
            }
        }

        let best = match best_candidate(&scores) {
            Some(best) => best.kind,
            None => {
                return Err(first_error.map_or(SelectorError::NoCandidates, SelectorError::from))
            }
        };

        log_comparison(&scores, &timings, best);

        let model = best.fit(x, y, self.config.seed)?;
        info!(
            "Refit {} on all {} rows",
            best.display_name(),
            x.nrows()
        );

        Ok(Selection {
            model,
            report: SelectionReport {
                candidates: scores,
                best,
                train_rows: train.len(),
                test_rows: test.len(),
                seed: self.config.seed,
                test_size: self.config.test_size,
            },
        })
    }
}

/// Highest R²; the earlier candidate wins a tie
fn best_candidate(scores: &[CandidateScore]) -> Option<&CandidateScore> {
    scores.iter().fold(None, |best: Option<&CandidateScore>, s| match best {
        Some(b) if s.r2 <= b.r2 || s.r2.is_nan() => Some(b),
        _ => Some(s),
    })
}

fn log_comparison(scores: &[CandidateScore], timings: &[u128], best: ModelKind) {
    info!("Model performance comparison:");
    info!("{:<20} {:>10} {:>14} {:>10}", "Model", "R2", "MAE", "Time (ms)");
    for (score, ms) in scores.iter().zip(timings) {
        let marker = if score.kind == best { " *" } else { "" };
        info!(
            "{:<20} {:>10.4} {:>14.2} {:>10}{}",
            score.kind.display_name(),
            score.r2,
            score.mae,
            ms,
            marker
        );
    }
}

/// Dense training arrays from filtered rows.
///
/// Every row must have `n_features` values.
pub fn training_arrays(
    dataset: &FilteredDataset,
    n_features: usize,
) -> Result<(Array2<f64>, Array1<f64>), SelectorError> {
    if let Some(row) = dataset.rows.iter().find(|r| r.len() != n_features) {
        return Err(EstimatorError::FeatureCountMismatch {
            expected: n_features,
            actual: row.len(),
        }
        .into());
    }
    if dataset.rows.len() != dataset.targets.len() {
        return Err(SelectorError::ShapeMismatch {
            rows: dataset.rows.len(),
            targets: dataset.targets.len(),
        });
    }

    let flat: Vec<f64> = dataset.rows.iter().flatten().copied().collect();
    let x = Array2::from_shape_vec((dataset.rows.len(), n_features), flat).map_err(|_| {
        SelectorError::ShapeMismatch {
            rows: dataset.rows.len(),
            targets: dataset.targets.len(),
        }
    })?;
    Ok((x, Array1::from(dataset.targets.clone())))
}
