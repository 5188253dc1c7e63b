//! Reduction of a neighbor set to a predicted value.

use crate::config::Weighting;

/// Sum of neighbor targets divided by the configured `k`.
///
/// The divisor is `k`, not `targets.len()`: when fewer than k neighbors are
/// available the result is scaled down accordingly.
pub fn average(targets: &[f64], k: usize) -> f64 {
    let sum: f64 = targets.iter().sum();
    sum / k as f64
}

/// Inverse squared distance weighted mean of neighbor targets.
///
/// ```text
/// Σᵢ (tᵢ / dᵢ²) / Σᵢ (1 / dᵢ²)
/// ```
///
/// Neighbors at distance zero are left out of both sums. If every neighbor
/// is at distance zero, returns the plain mean of their targets.
///
/// Weights are computed relative to the smallest positive distance, so
/// distances whose square underflows still give finite weights.
///
/// # Panics
///
/// Debug-asserts that `targets.len() == distances.len()`.
pub fn weighted_average(targets: &[f64], distances: &[f64]) -> f64 {
    debug_assert_eq!(targets.len(), distances.len());

    let usable = |d: f64| d > 0.0 && d.is_finite();
    let Some(d_min) = distances
        .iter()
        .copied()
        .filter(|&d| usable(d))
        .min_by(f64::total_cmp)
    else {
        // Only exact matches: fall back to their mean
        return targets.iter().sum::<f64>() / targets.len() as f64;
    };

    // (d_min / d)² is 1 for the closest neighbor and at most 1 for the rest
    let mut num = 0.0;
    let mut den = 0.0;
    for (&t, &d) in targets.iter().zip(distances.iter()) {
        if !usable(d) {
            continue;
        }
        let r = d_min / d;
        let w = r * r;
        num += t * w;
        den += w;
    }
    num / den
}

/// Applies `weighting` to the neighbor set.
pub(crate) fn aggregate(targets: &[f64], distances: &[f64], weighting: Weighting, k: usize) -> f64 {
    match weighting {
        Weighting::Uniform => average(targets, k),
        Weighting::Weighted => weighted_average(targets, distances),
    }
}
