//! Error types for the proxima-knn crate.

/// Error type for all fallible operations in the proxima-knn crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KnnError {
    /// Returned when a dataset is built with no instances.
    #[error("dataset has no instances")]
    EmptyDataset,

    /// Returned when a dataset is built with zero features per instance.
    #[error("instances must have at least one feature")]
    NoFeatures,

    /// Returned when a row's feature count differs from the first row's.
    #[error("instance {row} has {got} features, expected {expected}")]
    RaggedDataset {
        /// Index of the offending row.
        row: usize,
        /// Feature count of the first row.
        expected: usize,
        /// Feature count of the offending row.
        got: usize,
    },

    /// Returned when a flat feature buffer does not match the target count.
    #[error("features length {len} does not match {n_targets} targets × {n_features} features")]
    ShapeMismatch {
        /// Length of the flat feature buffer.
        len: usize,
        /// Number of targets.
        n_targets: usize,
        /// Features per instance.
        n_features: usize,
    },

    /// Returned when predicting before a training set has been fitted, or
    /// against an empty training subset.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Returned when a query's feature count does not match the training set.
    #[error("query has {got} features, training set has {expected}")]
    DimensionMismatch {
        /// Feature count of the training set.
        expected: usize,
        /// Feature count of the query.
        got: usize,
    },

    /// Returned when k is zero.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// Returned when the fold count is outside `2..=n_instances`.
    #[error("folds must be in 2..={n_instances}, got {folds}")]
    InvalidFolds {
        /// The invalid fold count.
        folds: usize,
        /// Number of instances in the dataset.
        n_instances: usize,
    },

    /// Returned when every training candidate was excluded as identical to
    /// the query, leaving nothing to aggregate.
    #[error("no eligible neighbors: every training instance matches the query")]
    NoNeighbors,

    /// Returned when a required input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned when a search space has nothing to try.
    #[error("search space is empty: {reason}")]
    EmptySearchSpace {
        /// Which axis of the search space is empty.
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_dataset() {
        assert_eq!(KnnError::EmptyDataset.to_string(), "dataset has no instances");
    }

    #[test]
    fn error_ragged_dataset() {
        let e = KnnError::RaggedDataset {
            row: 3,
            expected: 4,
            got: 2,
        };
        assert_eq!(e.to_string(), "instance 3 has 2 features, expected 4");
    }

    #[test]
    fn error_shape_mismatch() {
        let e = KnnError::ShapeMismatch {
            len: 7,
            n_targets: 2,
            n_features: 3,
        };
        assert_eq!(
            e.to_string(),
            "features length 7 does not match 2 targets × 3 features"
        );
    }

    #[test]
    fn error_empty_training_set() {
        assert_eq!(KnnError::EmptyTrainingSet.to_string(), "training set is empty");
    }

    #[test]
    fn error_dimension_mismatch() {
        let e = KnnError::DimensionMismatch {
            expected: 5,
            got: 3,
        };
        assert_eq!(e.to_string(), "query has 3 features, training set has 5");
    }

    #[test]
    fn error_invalid_k() {
        let e = KnnError::InvalidK { k: 0 };
        assert_eq!(e.to_string(), "k must be >= 1, got 0");
    }

    #[test]
    fn error_invalid_folds() {
        let e = KnnError::InvalidFolds {
            folds: 1,
            n_instances: 10,
        };
        assert_eq!(e.to_string(), "folds must be in 2..=10, got 1");
    }

    #[test]
    fn error_non_finite_input() {
        let e = KnnError::NonFiniteInput { input: "query" };
        assert_eq!(e.to_string(), "non-finite value in query");
    }

    #[test]
    fn error_empty_search_space() {
        let e = KnnError::EmptySearchSpace {
            reason: "no distances",
        };
        assert_eq!(e.to_string(), "search space is empty: no distances");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<KnnError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<KnnError>();
    }
}
