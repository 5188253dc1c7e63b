//! Tabular numeric datasets: a feature matrix plus one target per row.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::KnnError;

/// A borrowed view of one dataset row.
///
/// The target never takes part in distance computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance<'a> {
    features: &'a [f64],
    target: f64,
}

impl<'a> Instance<'a> {
    /// Creates a view over `features` with the given target value.
    pub fn new(features: &'a [f64], target: f64) -> Self {
        Self { features, target }
    }

    /// Returns the feature values.
    pub fn features(&self) -> &'a [f64] {
        self.features
    }

    /// Returns the target value.
    pub fn target(&self) -> f64 {
        self.target
    }
}

/// An immutable collection of instances sharing one feature dimensionality.
///
/// Features are stored row-major in a flat buffer `[n_instances × n_features]`.
/// Every operation that reorders, subsets or rescales returns a new dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<f64>,
    targets: Vec<f64>,
    n_features: usize,
}

impl Dataset {
    /// Builds a dataset from a flat row-major feature buffer and targets.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError`] if there are no targets, `n_features` is zero, the
    /// buffer length is not `targets.len() * n_features`, or any value is
    /// non-finite.
    pub fn new(features: Vec<f64>, targets: Vec<f64>, n_features: usize) -> Result<Self, KnnError> {
        if targets.is_empty() {
            return Err(KnnError::EmptyDataset);
        }
        if n_features == 0 {
            return Err(KnnError::NoFeatures);
        }
        if features.len() != targets.len() * n_features {
            return Err(KnnError::ShapeMismatch {
                len: features.len(),
                n_targets: targets.len(),
                n_features,
            });
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(KnnError::NonFiniteInput { input: "features" });
        }
        if targets.iter().any(|v| !v.is_finite()) {
            return Err(KnnError::NonFiniteInput { input: "targets" });
        }
        Ok(Self {
            features,
            targets,
            n_features,
        })
    }

    /// Builds a dataset from per-row feature vectors and targets.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::RaggedDataset`] if rows differ in length, and
    /// otherwise the same errors as [`Dataset::new`].
    pub fn from_rows(rows: &[Vec<f64>], targets: Vec<f64>) -> Result<Self, KnnError> {
        let n_features = rows.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(rows.len() * n_features);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n_features {
                return Err(KnnError::RaggedDataset {
                    row,
                    expected: n_features,
                    got: values.len(),
                });
            }
            flat.extend_from_slice(values);
        }
        if rows.len() != targets.len() {
            return Err(KnnError::ShapeMismatch {
                len: flat.len(),
                n_targets: targets.len(),
                n_features,
            });
        }
        Self::new(flat, targets, n_features)
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Always `false`; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Features per instance.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// The flat row-major feature buffer.
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// All target values in row order.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Feature values of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.features[i * self.n_features..(i + 1) * self.n_features]
    }

    /// Row `i` as an [`Instance`].
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn instance(&self, i: usize) -> Instance<'_> {
        Instance::new(self.row(i), self.targets[i])
    }

    /// Iterates over all rows in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Instance<'_>> + '_ {
        self.features
            .chunks_exact(self.n_features)
            .zip(self.targets.iter())
            .map(|(f, &t)| Instance::new(f, t))
    }

    /// Values of feature column `j` in row order.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.n_features()`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        assert!(j < self.n_features, "column {j} out of range");
        self.features
            .iter()
            .skip(j)
            .step_by(self.n_features)
            .copied()
            .collect()
    }

    /// A new dataset holding the given rows, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptyDataset`] if `rows` is empty.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of range.
    pub fn select(&self, rows: &[usize]) -> Result<Self, KnnError> {
        if rows.is_empty() {
            return Err(KnnError::EmptyDataset);
        }
        let mut features = Vec::with_capacity(rows.len() * self.n_features);
        let mut targets = Vec::with_capacity(rows.len());
        for &i in rows {
            features.extend_from_slice(self.row(i));
            targets.push(self.targets[i]);
        }
        Ok(Self {
            features,
            targets,
            n_features: self.n_features,
        })
    }

    /// A new dataset with rows in a random order drawn from `rng`.
    ///
    /// Fold membership in cross-validation follows row order, so a seeded
    /// shuffle gives reproducible folds.
    pub fn shuffled(&self, rng: &mut impl Rng) -> Self {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);
        let mut features = Vec::with_capacity(self.features.len());
        let mut targets = Vec::with_capacity(self.len());
        for &i in &order {
            features.extend_from_slice(self.row(i));
            targets.push(self.targets[i]);
        }
        Self {
            features,
            targets,
            n_features: self.n_features,
        }
    }

    /// A new dataset with the same targets and a replacement feature buffer.
    pub(crate) fn with_features(&self, features: Vec<f64>) -> Self {
        debug_assert_eq!(features.len(), self.features.len());
        Self {
            features,
            targets: self.targets.clone(),
            n_features: self.n_features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample() -> Dataset {
        // 3 rows × 2 features
        Dataset::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![10.0, 20.0, 30.0], 2).unwrap()
    }

    #[test]
    fn test_accessors() {
        let ds = sample();
        assert_eq!(ds.len(), 3);
        assert!(!ds.is_empty());
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.row(1), &[3.0, 4.0]);
        assert_eq!(ds.instance(2).target(), 30.0);
        assert_eq!(ds.instance(2).features(), &[5.0, 6.0]);
        assert_eq!(ds.targets(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_iter_matches_rows() {
        let ds = sample();
        let rows: Vec<_> = ds.iter().collect();
        assert_eq!(rows.len(), 3);
        for (i, inst) in rows.iter().enumerate() {
            assert_eq!(inst.features(), ds.row(i));
            assert_eq!(inst.target(), ds.targets()[i]);
        }
    }

    #[test]
    fn test_column() {
        let ds = sample();
        assert_eq!(ds.column(0), vec![1.0, 3.0, 5.0]);
        assert_eq!(ds.column(1), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_from_rows() {
        let ds = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]], vec![0.5, 1.5]).unwrap();
        assert_eq!(ds.features(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(ds.n_features(), 2);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0]], vec![0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            KnnError::RaggedDataset {
                row: 1,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_new_errors() {
        assert!(matches!(
            Dataset::new(vec![], vec![], 2),
            Err(KnnError::EmptyDataset)
        ));
        assert!(matches!(
            Dataset::new(vec![], vec![1.0], 0),
            Err(KnnError::NoFeatures)
        ));
        assert!(matches!(
            Dataset::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0], 2),
            Err(KnnError::ShapeMismatch { len: 3, .. })
        ));
        assert!(matches!(
            Dataset::new(vec![f64::NAN], vec![1.0], 1),
            Err(KnnError::NonFiniteInput { input: "features" })
        ));
        assert!(matches!(
            Dataset::new(vec![1.0], vec![f64::INFINITY], 1),
            Err(KnnError::NonFiniteInput { input: "targets" })
        ));
    }

    #[test]
    fn test_select_leaves_source_untouched() {
        let ds = sample();
        let before = ds.clone();
        let sub = ds.select(&[2, 0]).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.row(0), &[5.0, 6.0]);
        assert_eq!(sub.targets(), &[30.0, 10.0]);
        assert_eq!(ds, before);
    }

    #[test]
    fn test_select_empty() {
        assert!(matches!(sample().select(&[]), Err(KnnError::EmptyDataset)));
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let ds = Dataset::new(
            (0..20).map(|i| i as f64).collect(),
            (0..10).map(|i| i as f64 * 100.0).collect(),
            2,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let sh = ds.shuffled(&mut rng);
        assert_eq!(sh.len(), ds.len());

        // Rows keep their targets attached
        for inst in sh.iter() {
            let row = (inst.target() / 100.0) as usize;
            assert_eq!(inst.features(), ds.row(row));
        }

        let mut targets = sh.targets().to_vec();
        targets.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(targets, ds.targets());
    }

    #[test]
    fn test_shuffled_seeded_reproducibility() {
        let ds = Dataset::new((0..30).map(|i| i as f64).collect(), vec![0.0; 30], 1).unwrap();
        let a = ds.shuffled(&mut StdRng::seed_from_u64(7));
        let b = ds.shuffled(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
