//! k-fold cross-validation and search-strategy timing.

use std::ops::Range;
use std::time::Instant;

use tracing::debug;

use crate::config::{DistanceCheck, KnnConfig};
use crate::dataset::Dataset;
use crate::error::KnnError;
use crate::knn::mean_absolute_error;
use crate::result::{CheckTiming, CrossValidationResult, FoldReport};

/// Splits `0..n` into `folds` contiguous ranges.
///
/// The first `n % folds` ranges hold one extra row, so 10 rows in 3 folds
/// give sizes 4, 3, 3.
///
/// # Errors
///
/// Returns [`KnnError::InvalidFolds`] unless `2 <= folds <= n`.
pub fn fold_ranges(n: usize, folds: usize) -> Result<Vec<Range<usize>>, KnnError> {
    if folds < 2 || folds > n {
        return Err(KnnError::InvalidFolds {
            folds,
            n_instances: n,
        });
    }

    let base = n / folds;
    let extra = n % folds;
    let mut ranges = Vec::with_capacity(folds);
    let mut start = 0;
    for fold in 0..folds {
        let len = base + usize::from(fold < extra);
        ranges.push(start..start + len);
        start += len;
    }
    Ok(ranges)
}

/// Runs `folds`-fold cross-validation of `config` over `dataset`.
///
/// Each fold in turn is held out as the validation set while the remaining
/// rows serve as the neighbor pool. The reported error is the mean of the
/// per-fold mean absolute errors; each fold is timed separately.
///
/// # Errors
///
/// Returns [`KnnError::InvalidFolds`] for a fold count outside `2..=n`,
/// [`KnnError::InvalidK`] for `k == 0`, and any prediction error raised
/// while evaluating a fold.
#[tracing::instrument(level = "debug", skip(dataset), fields(n = dataset.len()))]
pub fn cross_validate(
    dataset: &Dataset,
    folds: usize,
    config: &KnnConfig,
) -> Result<CrossValidationResult, KnnError> {
    config.validate()?;
    let ranges = fold_ranges(dataset.len(), folds)?;

    let mut reports = Vec::with_capacity(ranges.len());
    for (fold, range) in ranges.into_iter().enumerate() {
        let start = Instant::now();

        let held_out: Vec<usize> = range.clone().collect();
        let kept: Vec<usize> = (0..range.start).chain(range.end..dataset.len()).collect();
        let validation = dataset.select(&held_out)?;
        let training = dataset.select(&kept)?;
        let mae = mean_absolute_error(&training, &validation, config)?;

        let elapsed = start.elapsed();
        debug!(
            fold,
            n_train = training.len(),
            n_validation = validation.len(),
            mae,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "fold evaluated"
        );
        reports.push(FoldReport::new(
            fold,
            training.len(),
            validation.len(),
            mae,
            elapsed,
        ));
    }

    Ok(CrossValidationResult::new(reports))
}

/// Cross-validates `config` under both search strategies for each fold count.
///
/// A fold count of 0 stands for leave-one-out (`folds = n`). Results come
/// back in input order, regular before efficient for each fold count.
///
/// # Errors
///
/// Returns the first error from [`cross_validate`].
pub fn compare_checks(
    dataset: &Dataset,
    config: &KnnConfig,
    fold_counts: &[usize],
) -> Result<Vec<CheckTiming>, KnnError> {
    let mut timings = Vec::with_capacity(fold_counts.len() * DistanceCheck::ALL.len());
    for &requested in fold_counts {
        let folds = if requested == 0 {
            dataset.len()
        } else {
            requested
        };
        for check in DistanceCheck::ALL {
            let cfg = config.with_check(check);
            let result = cross_validate(dataset, folds, &cfg)?;
            debug!(
                folds,
                %check,
                error = result.error(),
                avg_ms = result.average_elapsed().as_secs_f64() * 1e3,
                "check timed"
            );
            timings.push(CheckTiming::new(folds, check, result));
        }
    }
    Ok(timings)
}
