//! Complete-Case Dataset Filter

use crate::error::FeatureError;
use crate::features::FeatureVector;
use tracing::debug;

/// Rows that survived filtering, plus what was dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredDataset {
    /// Dense feature rows, in input order
    pub rows: Vec<Vec<f64>>,
    /// Targets paired with `rows`
    pub targets: Vec<f64>,
    /// Number of pairs removed
    pub dropped: usize,
    /// Per-feature count of missing entries across all input vectors
    pub missing_by_feature: Vec<usize>,
}

impl FilteredDataset {
    /// Number of retained rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing was retained
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keep only the `(vector, target)` pairs with no missing entry.
///
/// Relative order is preserved. A pair is dropped if and only if its
/// vector has at least one `None`.
pub fn filter_complete(
    vectors: Vec<FeatureVector>,
    targets: Vec<f64>,
) -> Result<FilteredDataset, FeatureError> {
    if vectors.len() != targets.len() {
        return Err(FeatureError::LengthMismatch {
            vectors: vectors.len(),
            targets: targets.len(),
        });
    }

    let width = vectors.iter().map(FeatureVector::len).max().unwrap_or(0);
    let mut filtered = FilteredDataset {
        rows: Vec::with_capacity(vectors.len()),
        targets: Vec::with_capacity(targets.len()),
        dropped: 0,
        missing_by_feature: vec![0; width],
    };

    for (vector, target) in vectors.into_iter().zip(targets) {
        for idx in vector.missing_indices() {
            filtered.missing_by_feature[idx] += 1;
        }

        match vector.to_dense() {
            Some(row) => {
                filtered.rows.push(row);
                filtered.targets.push(target);
            }
            None => filtered.dropped += 1,
        }
    }

    debug!(
        "Filtered dataset: kept {}, dropped {}",
        filtered.rows.len(),
        filtered.dropped
    );

    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fv(values: &[Option<f64>]) -> FeatureVector {
        FeatureVector::new(values.to_vec())
    }

    #[test]
    fn test_drops_incomplete_rows_in_order() {
        let vectors = vec![
            fv(&[Some(1.0), Some(2.0)]),
            fv(&[None, Some(2.0)]),
            fv(&[Some(3.0), Some(4.0)]),
            fv(&[Some(5.0), None]),
        ];
        let targets = vec![10.0, 20.0, 30.0, 40.0];

        let filtered = filter_complete(vectors, targets).unwrap();

        assert_eq!(filtered.rows, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(filtered.targets, vec![10.0, 30.0]);
        assert_eq!(filtered.dropped, 2);
        assert_eq!(filtered.missing_by_feature, vec![1, 1]);
    }

    #[test]
    fn test_length_mismatch() {
        let result = filter_complete(vec![fv(&[Some(1.0)])], vec![]);
        assert!(matches!(
            result,
            Err(FeatureError::LengthMismatch { vectors: 1, targets: 0 })
        ));
    }

    #[test]
    fn test_empty_input() {
        let filtered = filter_complete(vec![], vec![]).unwrap();
        assert!(filtered.is_empty());
        assert_eq!(filtered.dropped, 0);
    }

    proptest! {
        #[test]
        fn prop_filter_invariants(
            rows in proptest::collection::vec(
                proptest::collection::vec(proptest::option::weighted(0.8, -1e6f64..1e6), 3),
                0..40,
            )
        ) {
            let vectors: Vec<_> = rows.iter().map(|r| FeatureVector::new(r.clone())).collect();
            let targets: Vec<f64> = (0..rows.len()).map(|i| i as f64).collect();
            let filtered = filter_complete(vectors, targets).unwrap();

            prop_assert!(filtered.len() <= rows.len());
            prop_assert_eq!(filtered.len() + filtered.dropped, rows.len());

            // Targets are row indices, so they identify which inputs survived.
            let kept: Vec<usize> = filtered.targets.iter().map(|&t| t as usize).collect();
            prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));
            for (i, row) in rows.iter().enumerate() {
                let complete = row.iter().all(Option::is_some);
                prop_assert_eq!(kept.contains(&i), complete);
            }
        }
    }
}
