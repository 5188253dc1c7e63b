//! Integration tests for hyper-parameter grid search.

use proxima_knn::{
    Dataset, DistanceCheck, LpDistance, SearchSpace, Weighting, cross_validate, grid_search,
    standardize,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Target depends on the first feature only; the second is large noise.
fn one_informative(seed: u64, n: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n);
    let mut targets = Vec::with_capacity(n);
    for _ in 0..n {
        let x: f64 = rng.random_range(0.0..1.0);
        let noise: f64 = rng.random_range(0.0..1000.0);
        rows.push(vec![x, noise]);
        targets.push(x * 100.0);
    }
    Dataset::from_rows(&rows, targets).unwrap()
}

#[test]
fn best_error_matches_direct_cross_validation() {
    let ds = one_informative(1, 60);
    let space = SearchSpace::default().with_max_k(5);
    let outcome = grid_search(&ds, &space, 10, DistanceCheck::Regular).unwrap();
    assert_eq!(outcome.trials().len(), 2 * 4 * 5);

    let best = outcome.best();
    let direct = cross_validate(&ds, 10, best.config()).unwrap().error();
    assert_eq!(best.error(), direct);
    assert!(outcome.trials().iter().all(|t| t.error() >= best.error()));
}

#[test]
fn restricted_space_is_respected() {
    let ds = one_informative(2, 40);
    let space = SearchSpace::default()
        .with_weightings(vec![Weighting::Weighted])
        .with_distances(vec![LpDistance::L3])
        .with_max_k(6);
    let outcome = grid_search(&ds, &space, 5, DistanceCheck::Efficient).unwrap();
    assert_eq!(outcome.trials().len(), 6);
    let best = outcome.best().config();
    assert_eq!(best.weighting(), Weighting::Weighted);
    assert_eq!(best.distance(), LpDistance::L3);
    assert!((1..=6).contains(&best.k()));
}

/// Search runs the same way on standardized features.
#[test]
fn search_on_standardized_data() {
    let ds = one_informative(3, 80);
    let scaled = standardize(&ds);
    let space = SearchSpace::default().with_max_k(4);
    let raw = grid_search(&ds, &space, 8, DistanceCheck::Regular).unwrap();
    let std = grid_search(&scaled, &space, 8, DistanceCheck::Regular).unwrap();
    assert_eq!(raw.trials().len(), std.trials().len());
    assert!(std.best().error().is_finite());
    assert_eq!(scaled.targets(), ds.targets());
}
