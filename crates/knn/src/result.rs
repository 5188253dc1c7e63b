//! Output types for cross-validation runs.

use std::time::Duration;

use crate::config::DistanceCheck;

/// Outcome of one cross-validation fold.
#[derive(Debug, Clone)]
pub struct FoldReport {
    /// Zero-based fold index.
    fold: usize,
    /// Training instances used for this fold.
    n_train: usize,
    /// Held-out instances evaluated in this fold.
    n_validation: usize,
    /// Mean absolute error on the held-out instances.
    mae: f64,
    /// Wall-clock time spent on this fold.
    elapsed: Duration,
}

impl FoldReport {
    pub(crate) fn new(
        fold: usize,
        n_train: usize,
        n_validation: usize,
        mae: f64,
        elapsed: Duration,
    ) -> Self {
        Self {
            fold,
            n_train,
            n_validation,
            mae,
            elapsed,
        }
    }

    /// Returns the zero-based fold index.
    pub fn fold(&self) -> usize {
        self.fold
    }

    /// Returns the training set size.
    pub fn n_train(&self) -> usize {
        self.n_train
    }

    /// Returns the validation set size.
    pub fn n_validation(&self) -> usize {
        self.n_validation
    }

    /// Returns the mean absolute error on the validation set.
    pub fn mae(&self) -> f64 {
        self.mae
    }

    /// Returns the sum of absolute errors on the validation set.
    pub fn abs_error_sum(&self) -> f64 {
        self.mae * self.n_validation as f64
    }

    /// Returns the wall-clock time spent on this fold.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Result of a k-fold cross-validation run.
#[derive(Debug, Clone)]
pub struct CrossValidationResult {
    folds: Vec<FoldReport>,
}

impl CrossValidationResult {
    pub(crate) fn new(folds: Vec<FoldReport>) -> Self {
        Self { folds }
    }

    /// Returns the per-fold reports in fold order.
    pub fn folds(&self) -> &[FoldReport] {
        &self.folds
    }

    /// Returns the number of folds.
    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }

    /// Returns the cross-validation error: the mean of the fold MAEs.
    pub fn error(&self) -> f64 {
        let maes: Vec<f64> = self.folds.iter().map(FoldReport::mae).collect();
        proxima_stats::mean(&maes)
    }

    /// Returns the wall-clock time summed over all folds.
    pub fn total_elapsed(&self) -> Duration {
        self.folds.iter().map(FoldReport::elapsed).sum()
    }

    /// Returns the mean wall-clock time per fold.
    pub fn average_elapsed(&self) -> Duration {
        u32::try_from(self.folds.len())
            .ok()
            .and_then(|n| self.total_elapsed().checked_div(n))
            .unwrap_or_default()
    }
}

/// Cross-validation of one configuration under one distance check.
#[derive(Debug, Clone)]
pub struct CheckTiming {
    /// Requested fold count.
    folds: usize,
    /// Search strategy used.
    check: DistanceCheck,
    /// Full cross-validation result.
    result: CrossValidationResult,
}

impl CheckTiming {
    pub(crate) fn new(folds: usize, check: DistanceCheck, result: CrossValidationResult) -> Self {
        Self {
            folds,
            check,
            result,
        }
    }

    /// Returns the fold count.
    pub fn folds(&self) -> usize {
        self.folds
    }

    /// Returns the search strategy.
    pub fn check(&self) -> DistanceCheck {
        self.check
    }

    /// Returns the cross-validation result.
    pub fn result(&self) -> &CrossValidationResult {
        &self.result
    }
}
