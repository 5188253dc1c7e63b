//! Statistical helper functions for proxima.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Z-scores of `data`: `(x - mean) / sd` with the sample standard deviation.
///
/// A constant (or single-element) input has no spread to divide by and maps
/// to all zeros.
pub fn z_scores(data: &[f64]) -> Vec<f64> {
    let m = mean(data);
    let s = sd(data);
    if s == 0.0 || !s.is_finite() {
        return vec![0.0; data.len()];
    }
    data.iter().map(|&x| (x - m) / s).collect()
}

/// Mean absolute difference between paired values.
///
/// Pairs beyond the shorter slice are ignored. Returns 0.0 if either is empty.
pub fn mean_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum();
    sum / n as f64
}
