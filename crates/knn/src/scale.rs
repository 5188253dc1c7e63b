//! Feature standardization.

use crate::dataset::Dataset;

/// Returns a copy of `dataset` with every feature column z-scored.
///
/// Each column is centered on its mean and divided by its sample standard
/// deviation. Columns with zero variance become all zeros. Targets are left
/// untouched.
pub fn standardize(dataset: &Dataset) -> Dataset {
    let n_features = dataset.n_features();
    let mut features = vec![0.0; dataset.features().len()];
    for j in 0..n_features {
        let scaled = proxima_stats::z_scores(&dataset.column(j));
        for (i, z) in scaled.into_iter().enumerate() {
            features[i * n_features + j] = z;
        }
    }
    dataset.with_features(features)
}
