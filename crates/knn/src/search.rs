//! Exhaustive hyper-parameter search over weighting, Lp distance and k.

use tracing::{debug, info};

use crate::config::{DistanceCheck, KnnConfig, LpDistance, Weighting};
use crate::cv::cross_validate;
use crate::dataset::Dataset;
use crate::error::KnnError;

/// Candidate values explored by [`grid_search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
    weightings: Vec<Weighting>,
    distances: Vec<LpDistance>,
    max_k: usize,
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self {
            weightings: Weighting::ALL.to_vec(),
            distances: LpDistance::ALL.to_vec(),
            max_k: 20,
        }
    }
}

impl SearchSpace {
    /// Sets the weighting schemes to try.
    pub fn with_weightings(mut self, weightings: Vec<Weighting>) -> Self {
        self.weightings = weightings;
        self
    }

    /// Sets the distances to try.
    pub fn with_distances(mut self, distances: Vec<LpDistance>) -> Self {
        self.distances = distances;
        self
    }

    /// Sets the largest k; every k in `1..=max_k` is tried.
    pub fn with_max_k(mut self, max_k: usize) -> Self {
        self.max_k = max_k;
        self
    }

    /// Returns the weighting schemes to try.
    pub fn weightings(&self) -> &[Weighting] {
        &self.weightings
    }

    /// Returns the distances to try.
    pub fn distances(&self) -> &[LpDistance] {
        &self.distances
    }

    /// Returns the largest k tried.
    pub fn max_k(&self) -> usize {
        self.max_k
    }

    /// Number of configurations in the grid.
    pub fn len(&self) -> usize {
        self.weightings.len() * self.distances.len() * self.max_k
    }

    /// Returns `true` if the grid has no configurations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> Result<(), KnnError> {
        if self.weightings.is_empty() {
            return Err(KnnError::EmptySearchSpace {
                reason: "no weighting schemes",
            });
        }
        if self.distances.is_empty() {
            return Err(KnnError::EmptySearchSpace {
                reason: "no distances",
            });
        }
        if self.max_k == 0 {
            return Err(KnnError::EmptySearchSpace {
                reason: "max_k is zero",
            });
        }
        Ok(())
    }
}

/// One evaluated configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    config: KnnConfig,
    error: f64,
}

impl Trial {
    /// Returns the evaluated configuration.
    pub fn config(&self) -> &KnnConfig {
        &self.config
    }

    /// Cross-validation error of this configuration.
    pub fn error(&self) -> f64 {
        self.error
    }
}

/// Result of [`grid_search`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    best: Trial,
    trials: Vec<Trial>,
}

impl SearchOutcome {
    /// The configuration with the lowest error; the first one found wins ties.
    pub fn best(&self) -> &Trial {
        &self.best
    }

    /// Every evaluated configuration in search order.
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }
}

/// Strictly lower error wins; any number beats a NaN best.
fn improves(error: f64, best: f64) -> bool {
    error < best || (best.is_nan() && !error.is_nan())
}

/// Cross-validates every configuration in `space` and keeps the best.
///
/// Search order is weighting, then distance, then k ascending. A trial
/// replaces the current best only when its error is strictly lower.
///
/// # Errors
///
/// Returns [`KnnError::EmptySearchSpace`] if any axis of `space` is empty,
/// and otherwise the first error from [`cross_validate`].
#[tracing::instrument(level = "info", skip(dataset, space), fields(n = dataset.len(), grid = space.len()))]
pub fn grid_search(
    dataset: &Dataset,
    space: &SearchSpace,
    folds: usize,
    check: DistanceCheck,
) -> Result<SearchOutcome, KnnError> {
    space.validate()?;

    let mut trials = Vec::with_capacity(space.len());
    let mut best: Option<Trial> = None;
    for &weighting in &space.weightings {
        for &distance in &space.distances {
            for k in 1..=space.max_k {
                let config = KnnConfig::new(k)
                    .with_distance(distance)
                    .with_weighting(weighting)
                    .with_check(check);
                let error = cross_validate(dataset, folds, &config)?.error();
                let trial = Trial { config, error };
                debug!(%config, error, "trial");

                if best.is_none_or(|b| improves(error, b.error)) {
                    info!(%config, error, "new best");
                    best = Some(trial);
                }
                trials.push(trial);
            }
        }
    }

    let best = best.ok_or(KnnError::EmptySearchSpace {
        reason: "no configurations evaluated",
    })?;
    Ok(SearchOutcome { best, trials })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Dataset {
        let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
        Dataset::new(values.clone(), values, 1).unwrap()
    }

    #[test]
    fn test_default_space() {
        let space = SearchSpace::default();
        assert_eq!(space.max_k(), 20);
        assert_eq!(space.len(), 2 * 4 * 20);
        assert!(!space.is_empty());
    }

    #[test]
    fn test_trial_count_and_order() {
        let space = SearchSpace::default()
            .with_weightings(vec![Weighting::Uniform])
            .with_distances(vec![LpDistance::L1, LpDistance::L2])
            .with_max_k(3);
        let outcome = grid_search(&line(12), &space, 4, DistanceCheck::Regular).unwrap();
        let order: Vec<(LpDistance, usize)> = outcome
            .trials()
            .iter()
            .map(|t| (t.config().distance(), t.config().k()))
            .collect();
        assert_eq!(
            order,
            vec![
                (LpDistance::L1, 1),
                (LpDistance::L1, 2),
                (LpDistance::L1, 3),
                (LpDistance::L2, 1),
                (LpDistance::L2, 2),
                (LpDistance::L2, 3),
            ]
        );
    }

    #[test]
    fn test_best_is_minimum_first_wins_ties() {
        let space = SearchSpace::default().with_max_k(4);
        let outcome = grid_search(&line(15), &space, 5, DistanceCheck::Regular).unwrap();
        let min = outcome
            .trials()
            .iter()
            .map(Trial::error)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(outcome.best().error(), min);

        let first = outcome
            .trials()
            .iter()
            .find(|t| t.error() == min)
            .unwrap();
        assert_eq!(outcome.best(), first);
    }

    #[test]
    fn test_check_is_propagated() {
        let space = SearchSpace::default().with_max_k(2);
        let outcome = grid_search(&line(10), &space, 5, DistanceCheck::Efficient).unwrap();
        assert!(
            outcome
                .trials()
                .iter()
                .all(|t| t.config().check() == DistanceCheck::Efficient)
        );
    }

    #[test]
    fn test_empty_axes() {
        let ds = line(6);
        let no_k = SearchSpace::default().with_max_k(0);
        assert!(matches!(
            grid_search(&ds, &no_k, 3, DistanceCheck::Regular),
            Err(KnnError::EmptySearchSpace { reason: "max_k is zero" })
        ));
        let no_p = SearchSpace::default().with_distances(Vec::new());
        assert!(matches!(
            grid_search(&ds, &no_p, 3, DistanceCheck::Regular),
            Err(KnnError::EmptySearchSpace { .. })
        ));
        let no_w = SearchSpace::default().with_weightings(Vec::new());
        assert!(matches!(
            grid_search(&ds, &no_w, 3, DistanceCheck::Regular),
            Err(KnnError::EmptySearchSpace { .. })
        ));
    }

    #[test]
    fn test_improves() {
        assert!(improves(1.0, 2.0));
        assert!(!improves(2.0, 2.0));
        assert!(!improves(3.0, 2.0));
        assert!(improves(5.0, f64::NAN));
        assert!(improves(f64::INFINITY, f64::NAN));
        assert!(!improves(f64::NAN, f64::NAN));
        assert!(!improves(f64::NAN, 2.0));
    }

    #[test]
    fn test_weighted_search_on_underflowing_distances() {
        // Rows 1e-170 apart: squared distances underflow to zero
        let features: Vec<f64> = (0..12).map(|i| i as f64 * 1e-170).collect();
        let targets: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let ds = Dataset::new(features, targets, 1).unwrap();
        let space = SearchSpace::default()
            .with_weightings(vec![Weighting::Weighted])
            .with_distances(vec![LpDistance::L1])
            .with_max_k(3);
        let outcome = grid_search(&ds, &space, 4, DistanceCheck::Regular).unwrap();
        assert!(outcome.trials().iter().all(|t| t.error().is_finite()));
        assert!(outcome.best().error().is_finite());
    }

    #[test]
    fn test_bad_folds_propagate() {
        let space = SearchSpace::default().with_max_k(1);
        assert!(matches!(
            grid_search(&line(3), &space, 10, DistanceCheck::Regular),
            Err(KnnError::InvalidFolds { .. })
        ));
    }
}
