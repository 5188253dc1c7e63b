//! K-nearest-neighbor regression with Lp distances and k-fold cross-validation.
//!
//! A prediction is the aggregate of the targets of the k training rows nearest
//! to the query, under one of four distances and one of two weighting schemes:
//!
//! | Weighting | Formula | Notes |
//! |-----------|---------|-------|
//! | Uniform | `Σ tᵢ / k` | Divides by the configured k |
//! | Weighted | `Σ (tᵢ/dᵢ²) / Σ (1/dᵢ²)` | Zero distances skipped |
//!
//! Two neighbor-search strategies produce the same neighbor set. The regular
//! scan computes every distance in full. The efficient scan stops
//! accumulating a candidate's distance once it exceeds the current k-th
//! nearest, and by default skips training rows identical to the query.
//!
//! # Quick start
//!
//! ```
//! use proxima_knn::{Dataset, DistanceCheck, KnnConfig, LpDistance, Weighting, cross_validate};
//!
//! let rows: Vec<Vec<f64>> = (0..12).map(|i| vec![i as f64, (i % 3) as f64]).collect();
//! let targets: Vec<f64> = (0..12).map(|i| 2.0 * i as f64).collect();
//! let data = Dataset::from_rows(&rows, targets).unwrap();
//!
//! let config = KnnConfig::new(3)
//!     .with_distance(LpDistance::L1)
//!     .with_weighting(Weighting::Weighted)
//!     .with_check(DistanceCheck::Efficient);
//!
//! let cv = cross_validate(&data, 4, &config).unwrap();
//! assert_eq!(cv.n_folds(), 4);
//! assert!(cv.error() >= 0.0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! grid_search()                  (search.rs)
//!   └─ cross_validate()          (cv.rs)
//!        ├─ fold_ranges()
//!        └─ mean_absolute_error() (knn.rs)
//!             └─ predict_with_scratch()
//!                  ├─ validate inputs
//!                  ├─ select_k_nearest()     (select.rs)
//!                  │    └─ lp_distance[_bounded]() (distance.rs)
//!                  └─ aggregate()            (aggregate.rs)
//! ```
//!
//! For prediction loops, use [`predict_with_scratch`] with a reusable
//! [`KnnScratch`] to avoid per-call heap allocation.

pub mod aggregate;
pub mod config;
pub mod cv;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod knn;
pub mod result;
pub mod scale;
pub mod search;

pub(crate) mod select;

pub use aggregate::{average, weighted_average};
pub use config::{DistanceCheck, KnnConfig, LpDistance, Weighting};
pub use cv::{compare_checks, cross_validate, fold_ranges};
pub use dataset::{Dataset, Instance};
pub use distance::{lp_distance, lp_distance_bounded};
pub use error::KnnError;
pub use knn::{
    KnnRegressor, KnnScratch, k_nearest, mean_absolute_error, predict, predict_with_scratch,
};
pub use result::{CheckTiming, CrossValidationResult, FoldReport};
pub use scale::standardize;
pub use search::{SearchOutcome, SearchSpace, Trial, grid_search};
pub use select::NeighborEntry;
