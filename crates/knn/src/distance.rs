//! Lp distances between feature vectors.
//!
//! Callers pass feature slices only; the target never reaches these functions.

use crate::config::LpDistance;

/// Computes the Lp distance between `a` and `b`.
///
/// ```text
/// finite p:  (Σᵢ |aᵢ − bᵢ|^p)^(1/p)
/// p = ∞:     maxᵢ |aᵢ − bᵢ|
/// ```
///
/// # Panics
///
/// Debug-asserts that `a.len() == b.len()`.
pub fn lp_distance(a: &[f64], b: &[f64], p: LpDistance) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let Some(e) = p.exponent() else {
        return chebyshev(a, b);
    };
    let mut acc = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        acc += term((x - y).abs(), e);
    }
    root(acc, p)
}

/// Computes the Lp distance between `a` and `b`, giving up once it is known
/// to exceed `threshold`.
///
/// Returns `Some(d)` with `d == lp_distance(a, b, p)` when `d <= threshold`,
/// and `None` otherwise. For finite p the partial sum is compared against
/// `threshold^p` after every attribute, so far candidates stop early without
/// taking the final root.
///
/// # Panics
///
/// Debug-asserts that `a.len() == b.len()`.
pub fn lp_distance_bounded(a: &[f64], b: &[f64], threshold: f64, p: LpDistance) -> Option<f64> {
    debug_assert_eq!(a.len(), b.len());
    let Some(e) = p.exponent() else {
        return chebyshev_bounded(a, b, threshold);
    };

    let bound = threshold.powi(e);
    let mut acc = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        acc += term((x - y).abs(), e);
        // The root is monotone and the partial sum only grows, so a partial
        // root above the threshold settles it.
        if acc > bound && root(acc, p) > threshold {
            return None;
        }
    }

    let d = root(acc, p);
    (d <= threshold).then_some(d)
}

/// `|aᵢ − bᵢ|^p` for one attribute.
#[inline]
fn term(abs_diff: f64, e: i32) -> f64 {
    match e {
        1 => abs_diff,
        2 => abs_diff * abs_diff,
        _ => abs_diff * abs_diff * abs_diff,
    }
}

/// Inverse of the per-attribute power.
#[inline]
fn root(acc: f64, p: LpDistance) -> f64 {
    match p {
        LpDistance::L1 | LpDistance::Infinity => acc,
        LpDistance::L2 => acc.sqrt(),
        LpDistance::L3 => acc.cbrt(),
    }
}

#[inline]
fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[inline]
fn chebyshev_bounded(a: &[f64], b: &[f64], threshold: f64) -> Option<f64> {
    let mut max = 0.0_f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let d = (x - y).abs();
        if d > threshold {
            return None;
        }
        max = max.max(d);
    }
    Some(max)
}
