//! Train/Test Split

use crate::SelectorError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Partition `0..n_samples` into `(train, test)` row indices.
///
/// Indices are shuffled with a seeded RNG and the first
/// `ceil(n_samples * test_size)` go to the test partition. The same seed
/// always yields the same partition.
pub fn train_test_split(
    n_samples: usize,
    test_size: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>), SelectorError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SelectorError::InvalidTestSize(test_size));
    }

    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(SelectorError::InsufficientData { rows: n_samples });
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok((train, indices))
}
