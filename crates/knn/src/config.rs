//! Configuration for KNN regression.

use std::fmt;

use crate::error::KnnError;

/// Distance family used to compare feature vectors.
///
/// A closed set: three finite Lp norms and the L∞ (Chebyshev) norm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LpDistance {
    /// Manhattan distance, `Σ|aᵢ − bᵢ|`.
    L1,
    /// Euclidean distance, `(Σ|aᵢ − bᵢ|²)^(1/2)`.
    #[default]
    L2,
    /// `(Σ|aᵢ − bᵢ|³)^(1/3)`.
    L3,
    /// Chebyshev distance, `max |aᵢ − bᵢ|`.
    Infinity,
}

impl LpDistance {
    /// Every variant, in ascending order of p.
    pub const ALL: [LpDistance; 4] = [
        LpDistance::L1,
        LpDistance::L2,
        LpDistance::L3,
        LpDistance::Infinity,
    ];

    /// Returns the exponent p for finite norms, `None` for L∞.
    pub fn exponent(self) -> Option<i32> {
        match self {
            LpDistance::L1 => Some(1),
            LpDistance::L2 => Some(2),
            LpDistance::L3 => Some(3),
            LpDistance::Infinity => None,
        }
    }
}

impl fmt::Display for LpDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LpDistance::L1 => f.write_str("L1"),
            LpDistance::L2 => f.write_str("L2"),
            LpDistance::L3 => f.write_str("L3"),
            LpDistance::Infinity => f.write_str("Infinity"),
        }
    }
}

/// How neighbor targets are reduced to a prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Weighting {
    /// Sum of neighbor targets divided by the configured k.
    #[default]
    Uniform,
    /// Inverse squared distance weighting: `Σ(tᵢ/dᵢ²) / Σ(1/dᵢ²)`.
    Weighted,
}

impl Weighting {
    /// Every variant.
    pub const ALL: [Weighting; 2] = [Weighting::Uniform, Weighting::Weighted];
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weighting::Uniform => f.write_str("uniform"),
            Weighting::Weighted => f.write_str("weighted"),
        }
    }
}

/// Neighbor search strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DistanceCheck {
    /// Full distance for every candidate.
    #[default]
    Regular,
    /// Once k neighbors are held, abandon a candidate as soon as its partial
    /// distance exceeds the current farthest neighbor.
    Efficient,
}

impl DistanceCheck {
    /// Every variant.
    pub const ALL: [DistanceCheck; 2] = [DistanceCheck::Regular, DistanceCheck::Efficient];
}

impl fmt::Display for DistanceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceCheck::Regular => f.write_str("regular"),
            DistanceCheck::Efficient => f.write_str("efficient"),
        }
    }
}

/// Configuration for a KNN regressor.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use proxima_knn::{DistanceCheck, KnnConfig, LpDistance, Weighting};
///
/// let config = KnnConfig::new(5)
///     .with_distance(LpDistance::L1)
///     .with_weighting(Weighting::Weighted)
///     .with_check(DistanceCheck::Efficient);
///
/// assert!(config.validate().is_ok());
/// assert!(config.excludes_identical());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnnConfig {
    /// Number of nearest neighbors.
    k: usize,
    /// Distance family.
    distance: LpDistance,
    /// Aggregation scheme.
    weighting: Weighting,
    /// Neighbor search strategy.
    check: DistanceCheck,
    /// Explicit identical-candidate exclusion; `None` follows the check.
    exclude_identical: Option<bool>,
}

impl KnnConfig {
    /// Creates a new configuration with the given k.
    ///
    /// Defaults: `distance = L2`, `weighting = Uniform`, `check = Regular`,
    /// identical-candidate exclusion following the check.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            distance: LpDistance::L2,
            weighting: Weighting::Uniform,
            check: DistanceCheck::Regular,
            exclude_identical: None,
        }
    }

    /// Sets the number of nearest neighbors.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the distance family.
    pub fn with_distance(mut self, distance: LpDistance) -> Self {
        self.distance = distance;
        self
    }

    /// Sets the aggregation scheme.
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Sets the neighbor search strategy.
    pub fn with_check(mut self, check: DistanceCheck) -> Self {
        self.check = check;
        self
    }

    /// Forces identical-candidate exclusion on or off for both strategies.
    ///
    /// Without this, training instances whose features equal the query's are
    /// skipped by [`DistanceCheck::Efficient`] and kept by
    /// [`DistanceCheck::Regular`].
    pub fn with_exclude_identical(mut self, exclude: bool) -> Self {
        self.exclude_identical = Some(exclude);
        self
    }

    /// Returns the number of nearest neighbors.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the distance family.
    pub fn distance(&self) -> LpDistance {
        self.distance
    }

    /// Returns the aggregation scheme.
    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Returns the neighbor search strategy.
    pub fn check(&self) -> DistanceCheck {
        self.check
    }

    /// Returns whether candidates identical to the query are skipped.
    pub fn excludes_identical(&self) -> bool {
        self.exclude_identical
            .unwrap_or(self.check == DistanceCheck::Efficient)
    }

    /// Validates this configuration.
    ///
    /// Returns an error if k < 1.
    pub fn validate(&self) -> Result<(), KnnError> {
        if self.k < 1 {
            return Err(KnnError::InvalidK { k: self.k });
        }
        Ok(())
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Display for KnnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "k={}, lp={}, weighting={}, check={}",
            self.k, self.distance, self.weighting, self.check
        )
    }
}
