//! Bounded top-k nearest neighbor selection.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::config::{DistanceCheck, KnnConfig};
use crate::dataset::Dataset;
use crate::distance::{lp_distance, lp_distance_bounded};

/// A training row and its distance to the query.
///
/// Ordered by distance, then by row index. Rows are scanned in order, so the
/// index doubles as insertion order: among equal distances the later row
/// ranks as farther and is the one evicted from a full heap.
#[derive(Debug, Clone, Copy)]
pub struct NeighborEntry {
    index: usize,
    distance: f64,
}

impl NeighborEntry {
    pub(crate) fn new(index: usize, distance: f64) -> Self {
        Self { index, distance }
    }

    /// Row index into the training set.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Distance from the query.
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

impl PartialEq for NeighborEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NeighborEntry {}

impl PartialOrd for NeighborEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NeighborEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Fills `heap` with the (at most) k training rows nearest to `query`.
///
/// The heap is a max-heap: its top is the farthest neighbor kept so far.
/// Every candidate is pushed and the top popped whenever the heap grows past
/// k. With [`DistanceCheck::Efficient`], once k neighbors are held each new
/// candidate is measured with [`lp_distance_bounded`] against the current
/// top and dropped as soon as it is known to be farther; the surviving set is
/// the same as the regular scan's.
///
/// Rows whose features equal `query` are skipped when
/// [`KnnConfig::excludes_identical`] is set.
///
/// # Panics
///
/// Debug-asserts that `k >= 1` and `query.len() == training.n_features()`.
pub(crate) fn select_k_nearest(
    query: &[f64],
    training: &Dataset,
    config: &KnnConfig,
    heap: &mut BinaryHeap<NeighborEntry>,
) {
    let k = config.k();
    debug_assert!(k >= 1);
    debug_assert_eq!(query.len(), training.n_features());

    heap.clear();
    let exclude_identical = config.excludes_identical();
    let p = config.distance();

    for (index, row) in training
        .features()
        .chunks_exact(training.n_features())
        .enumerate()
    {
        if exclude_identical && row == query {
            continue;
        }

        let bound = match config.check() {
            DistanceCheck::Efficient if heap.len() >= k => heap.peek().map(|w| w.distance),
            _ => None,
        };
        let distance = match bound {
            Some(threshold) => match lp_distance_bounded(query, row, threshold, p) {
                Some(d) => d,
                None => continue,
            },
            None => lp_distance(query, row, p),
        };

        heap.push(NeighborEntry::new(index, distance));
        if heap.len() > k {
            heap.pop();
        }
    }
}
