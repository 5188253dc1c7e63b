//! KNN prediction entry points, scratch buffers and the regressor handle.

use std::collections::BinaryHeap;

use crate::aggregate::aggregate;
use crate::config::KnnConfig;
use crate::cv;
use crate::dataset::Dataset;
use crate::error::KnnError;
use crate::result::CrossValidationResult;
use crate::select::{NeighborEntry, select_k_nearest};

/// Pre-allocated scratch buffers for KNN prediction.
///
/// Reuse across multiple calls to [`predict_with_scratch`] to avoid repeated
/// heap allocation when predicting a whole validation fold.
///
/// # Example
///
/// ```
/// use proxima_knn::KnnScratch;
///
/// let mut scratch = KnnScratch::new(5);
/// // Use with predict_with_scratch() in a loop...
/// ```
#[derive(Debug, Clone)]
pub struct KnnScratch {
    /// Bounded max-heap of the nearest rows found so far.
    pub(crate) heap: BinaryHeap<NeighborEntry>,
    /// Targets of the selected neighbors.
    pub(crate) targets: Vec<f64>,
    /// Distances of the selected neighbors.
    pub(crate) distances: Vec<f64>,
}

impl KnnScratch {
    /// Creates a new scratch buffer sized for `k` neighbors.
    pub fn new(k: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(k + 1),
            targets: Vec::with_capacity(k),
            distances: Vec::with_capacity(k),
        }
    }
}

/// Validates configuration and query shape against the training set.
fn validate_inputs(training: &Dataset, query: &[f64], config: &KnnConfig) -> Result<(), KnnError> {
    config.validate()?;

    if training.is_empty() {
        return Err(KnnError::EmptyTrainingSet);
    }
    if query.len() != training.n_features() {
        return Err(KnnError::DimensionMismatch {
            expected: training.n_features(),
            got: query.len(),
        });
    }
    if query.iter().any(|v| !v.is_finite()) {
        return Err(KnnError::NonFiniteInput { input: "query" });
    }
    Ok(())
}

/// Internal implementation that assumes all inputs are validated.
fn predict_inner(
    training: &Dataset,
    query: &[f64],
    config: &KnnConfig,
    scratch: &mut KnnScratch,
) -> Result<f64, KnnError> {
    // Step 1: Select k nearest neighbors
    select_k_nearest(query, training, config, &mut scratch.heap);
    if scratch.heap.is_empty() {
        return Err(KnnError::NoNeighbors);
    }

    // Step 2: Gather neighbor targets and distances
    scratch.targets.clear();
    scratch.distances.clear();
    for entry in scratch.heap.drain() {
        scratch.targets.push(training.targets()[entry.index()]);
        scratch.distances.push(entry.distance());
    }

    // Step 3: Aggregate
    Ok(aggregate(
        &scratch.targets,
        &scratch.distances,
        config.weighting(),
        config.k(),
    ))
}

/// Returns the k training rows nearest to `query`, closest first.
///
/// # Errors
///
/// Returns [`KnnError`] if the configuration is invalid, the query's feature
/// count differs from the training set's, or the query is non-finite.
pub fn k_nearest(
    training: &Dataset,
    query: &[f64],
    config: &KnnConfig,
) -> Result<Vec<NeighborEntry>, KnnError> {
    validate_inputs(training, query, config)?;
    let mut heap = BinaryHeap::with_capacity(config.k() + 1);
    select_k_nearest(query, training, config, &mut heap);
    Ok(heap.into_sorted_vec())
}

/// Predicts the target for `query` from `training`, allocating scratch
/// buffers internally.
///
/// For prediction loops, use [`predict_with_scratch`] to reuse allocations.
///
/// # Errors
///
/// Returns [`KnnError`] if inputs are invalid (see [`k_nearest`]) or every
/// training row was excluded as identical to the query.
pub fn predict(training: &Dataset, query: &[f64], config: &KnnConfig) -> Result<f64, KnnError> {
    validate_inputs(training, query, config)?;
    let mut scratch = KnnScratch::new(config.k());
    predict_inner(training, query, config, &mut scratch)
}

/// Predicts the target for `query` from `training`, reusing `scratch`.
///
/// # Errors
///
/// Returns [`KnnError`] under the same conditions as [`predict`].
pub fn predict_with_scratch(
    training: &Dataset,
    query: &[f64],
    config: &KnnConfig,
    scratch: &mut KnnScratch,
) -> Result<f64, KnnError> {
    validate_inputs(training, query, config)?;
    predict_inner(training, query, config, scratch)
}

/// Mean absolute error of predictions for every row of `validation`,
/// using `training` as the neighbor pool.
///
/// # Errors
///
/// Returns the first prediction error encountered; nothing is skipped.
pub fn mean_absolute_error(
    training: &Dataset,
    validation: &Dataset,
    config: &KnnConfig,
) -> Result<f64, KnnError> {
    if validation.n_features() != training.n_features() {
        return Err(KnnError::DimensionMismatch {
            expected: training.n_features(),
            got: validation.n_features(),
        });
    }

    let mut scratch = KnnScratch::new(config.k());
    let mut predictions = Vec::with_capacity(validation.len());
    for instance in validation.iter() {
        predictions.push(predict_with_scratch(
            training,
            instance.features(),
            config,
            &mut scratch,
        )?);
    }
    Ok(proxima_stats::mean_abs_diff(
        &predictions,
        validation.targets(),
    ))
}

/// A configured KNN regressor holding a borrowed training set.
///
/// Cross-validation runs on an explicit dataset argument and never touches
/// the fitted training set.
///
/// # Example
///
/// ```
/// use proxima_knn::{Dataset, KnnConfig, KnnRegressor};
///
/// let data = Dataset::new(vec![1.0, 2.0, 3.0, 10.0], vec![1.0, 2.0, 3.0, 10.0], 1).unwrap();
/// let mut knn = KnnRegressor::new(KnnConfig::new(2));
/// knn.fit(&data);
///
/// // Neighbors of 2.2 are 2.0 and 3.0
/// assert_eq!(knn.predict(&[2.2]).unwrap(), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct KnnRegressor<'a> {
    config: KnnConfig,
    training: Option<&'a Dataset>,
}

impl<'a> KnnRegressor<'a> {
    /// Creates an unfitted regressor.
    pub fn new(config: KnnConfig) -> Self {
        Self {
            config,
            training: None,
        }
    }

    /// Replaces the whole configuration.
    ///
    /// The fitted training set is kept.
    pub fn setup(&mut self, config: KnnConfig) {
        self.config = config;
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &KnnConfig {
        &self.config
    }

    /// Stores `training` as the neighbor pool, replacing any previous one.
    pub fn fit(&mut self, training: &'a Dataset) {
        self.training = Some(training);
    }

    /// Returns the fitted training set, if any.
    pub fn training(&self) -> Option<&'a Dataset> {
        self.training
    }

    /// Predicts the target for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptyTrainingSet`] if not fitted, and otherwise the
    /// errors of [`predict`].
    pub fn predict(&self, query: &[f64]) -> Result<f64, KnnError> {
        let training = self.training.ok_or(KnnError::EmptyTrainingSet)?;
        predict(training, query, &self.config)
    }

    /// Mean absolute error over `dataset` against the fitted training set.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptyTrainingSet`] if not fitted, and otherwise the
    /// errors of [`mean_absolute_error`].
    pub fn mean_absolute_error(&self, dataset: &Dataset) -> Result<f64, KnnError> {
        let training = self.training.ok_or(KnnError::EmptyTrainingSet)?;
        mean_absolute_error(training, dataset, &self.config)
    }

    /// Runs `folds`-fold cross-validation over `dataset` with the active
    /// configuration.
    ///
    /// # Errors
    ///
    /// See [`cv::cross_validate`](crate::cross_validate).
    pub fn cross_validate(
        &self,
        dataset: &Dataset,
        folds: usize,
    ) -> Result<CrossValidationResult, KnnError> {
        cv::cross_validate(dataset, folds, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DistanceCheck, LpDistance, Weighting};
    use approx::assert_abs_diff_eq;

    fn line(values: &[f64], targets: &[f64]) -> Dataset {
        Dataset::new(values.to_vec(), targets.to_vec(), 1).unwrap()
    }

    #[test]
    fn test_predict_uniform() {
        let ds = line(&[0.0, 1.0, 2.0, 10.0], &[2.0, 4.0, 6.0, 100.0]);
        let got = predict(&ds, &[1.0], &KnnConfig::new(3)).unwrap();
        assert_abs_diff_eq!(got, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_predict_weighted() {
        // Neighbors of 0: row 0 at distance 1 (target 10), row 1 at distance 2 (target 20)
        let ds = line(&[1.0, -2.0, 50.0], &[10.0, 20.0, 0.0]);
        let cfg = KnnConfig::new(2).with_weighting(Weighting::Weighted);
        assert_abs_diff_eq!(predict(&ds, &[0.0], &cfg).unwrap(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_predict_k_greater_than_n_divides_by_k() {
        let ds = line(&[0.0, 1.0], &[3.0, 5.0]);
        let got = predict(&ds, &[0.5], &KnnConfig::new(4)).unwrap();
        assert_abs_diff_eq!(got, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scratch_matches_allocating() {
        let values: Vec<f64> = (0..30).map(|i| (i as f64 * 1.7).sin() * 10.0).collect();
        let targets: Vec<f64> = (0..15).map(|i| i as f64).collect();
        let ds = Dataset::new(values, targets, 2).unwrap();
        let cfg = KnnConfig::new(4)
            .with_distance(LpDistance::L3)
            .with_weighting(Weighting::Weighted);

        let mut scratch = KnnScratch::new(1);
        for q in [[0.0, 0.0], [5.0, -3.0], [-8.0, 9.0]] {
            let a = predict(&ds, &q, &cfg).unwrap();
            let b = predict_with_scratch(&ds, &q, &cfg, &mut scratch).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_k_nearest_sorted() {
        let ds = line(&[4.0, 1.0, 9.0, 0.0], &[0.0; 4]);
        let nn = k_nearest(&ds, &[0.0], &KnnConfig::new(3)).unwrap();
        let indices: Vec<usize> = nn.iter().map(|e| e.index()).collect();
        assert_eq!(indices, vec![3, 1, 0]);
        assert_abs_diff_eq!(nn[2].distance(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_error_dimension_mismatch() {
        let ds = line(&[1.0, 2.0], &[0.0, 0.0]);
        let result = predict(&ds, &[1.0, 2.0], &KnnConfig::new(1));
        assert!(matches!(
            result,
            Err(KnnError::DimensionMismatch {
                expected: 1,
                got: 2
            })
        ));
    }

    #[test]
    fn test_error_invalid_k() {
        let ds = line(&[1.0], &[0.0]);
        let result = predict(&ds, &[1.0], &KnnConfig::new(0));
        assert!(matches!(result, Err(KnnError::InvalidK { k: 0 })));
    }

    #[test]
    fn test_error_nan_query() {
        let ds = line(&[1.0], &[0.0]);
        let result = predict(&ds, &[f64::NAN], &KnnConfig::new(1));
        assert!(matches!(
            result,
            Err(KnnError::NonFiniteInput { input: "query" })
        ));
    }

    #[test]
    fn test_error_no_neighbors() {
        let ds = line(&[1.0, 1.0], &[0.0, 0.0]);
        let cfg = KnnConfig::new(1).with_check(DistanceCheck::Efficient);
        assert!(matches!(
            predict(&ds, &[1.0], &cfg),
            Err(KnnError::NoNeighbors)
        ));
    }

    #[test]
    fn test_mean_absolute_error() {
        // k=1: each validation row takes the target of its nearest training row
        let training = line(&[0.0, 10.0], &[0.0, 10.0]);
        let validation = line(&[1.0, 9.0, 4.0], &[2.0, 10.0, 0.0]);
        // predictions 0, 10, 0 -> errors 2, 0, 0
        let mae = mean_absolute_error(&training, &validation, &KnnConfig::new(1)).unwrap();
        assert_abs_diff_eq!(mae, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_absolute_error_dimension_mismatch() {
        let training = line(&[0.0], &[0.0]);
        let validation = Dataset::new(vec![0.0, 0.0], vec![0.0], 2).unwrap();
        assert!(matches!(
            mean_absolute_error(&training, &validation, &KnnConfig::new(1)),
            Err(KnnError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_regressor_unfitted() {
        let knn = KnnRegressor::new(KnnConfig::new(1));
        assert!(knn.training().is_none());
        assert!(matches!(
            knn.predict(&[0.0]),
            Err(KnnError::EmptyTrainingSet)
        ));
        let ds = line(&[0.0], &[0.0]);
        assert!(matches!(
            knn.mean_absolute_error(&ds),
            Err(KnnError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn test_regressor_fit_replaces() {
        let a = line(&[0.0], &[1.0]);
        let b = line(&[0.0], &[7.0]);
        let mut knn = KnnRegressor::new(KnnConfig::new(1));
        knn.fit(&a);
        assert_abs_diff_eq!(knn.predict(&[0.0]).unwrap(), 1.0, epsilon = 1e-12);
        knn.fit(&b);
        assert_abs_diff_eq!(knn.predict(&[0.0]).unwrap(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_regressor_setup_replaces_config() {
        let ds = line(&[0.0, 1.0, 2.0], &[2.0, 4.0, 6.0]);
        let mut knn = KnnRegressor::new(KnnConfig::new(1));
        knn.fit(&ds);
        assert_abs_diff_eq!(knn.predict(&[0.1]).unwrap(), 2.0, epsilon = 1e-12);

        knn.setup(KnnConfig::new(3).with_distance(LpDistance::L1));
        assert_eq!(knn.config().k(), 3);
        assert_eq!(knn.config().distance(), LpDistance::L1);
        assert_abs_diff_eq!(knn.predict(&[0.1]).unwrap(), 4.0, epsilon = 1e-12);
    }
}
