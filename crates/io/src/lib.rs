//! # proxima-io
//!
//! Read numeric regression datasets from CSV and ARFF files into
//! [`proxima_knn::Dataset`]. One column is the target (the last by default);
//! the rest are features.

mod arff_read;
mod csv_read;
mod error;
mod reader;

pub use arff_read::read_arff;
pub use csv_read::read_csv;
pub use error::IoError;
pub use reader::{ReadOptions, read_dataset};
