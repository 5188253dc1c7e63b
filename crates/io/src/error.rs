//! Error types for proxima-io.

use std::path::PathBuf;

use proxima_knn::KnnError;

/// Error type for all fallible operations in the proxima-io crate.
///
/// Covers missing files, malformed CSV and ARFF content, unsupported ARFF
/// attribute types, and datasets rejected on construction.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a failure reading the file from disk.
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    /// Wraps an error originating from the CSV reader.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when a line cannot be interpreted.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        /// File being read.
        path: PathBuf,
        /// One-based line number.
        line: u64,
        /// What was wrong with the line.
        reason: String,
    },

    /// Returned when an ARFF attribute is not numeric.
    #[error("attribute '{name}' has unsupported type '{kind}'")]
    UnsupportedAttribute {
        /// Attribute name.
        name: String,
        /// Declared type.
        kind: String,
    },

    /// Returned when the target column index is past the last column.
    #[error("target column {column} out of range for {n_columns} columns")]
    TargetColumn {
        /// Requested column.
        column: usize,
        /// Columns present in the file.
        n_columns: usize,
    },

    /// Returned when a file has fewer than two columns, leaving no features.
    #[error("{} has {n_columns} column(s); need a target and at least one feature", path.display())]
    TooFewColumns {
        /// File being read.
        path: PathBuf,
        /// Columns present in the file.
        n_columns: usize,
    },

    /// Returned when the parsed rows do not form a valid dataset.
    #[error("invalid dataset: {0}")]
    Dataset(#[from] KnnError),
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}
