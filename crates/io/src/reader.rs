//! Reader options, format dispatch and row-to-dataset assembly.

use std::path::Path;

use proxima_knn::{Dataset, KnnError};
use tracing::info;

use crate::arff_read;
use crate::csv_read;
use crate::error::IoError;

/// Options shared by the CSV and ARFF readers.
///
/// The [`Default`] implementation expects a CSV header row and takes the
/// last column as the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Whether the first CSV record is a header. Ignored for ARFF.
    has_header: bool,
    /// Zero-based target column; `None` selects the last column.
    target_column: Option<usize>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            target_column: None,
        }
    }
}

impl ReadOptions {
    /// Set whether the first CSV record is a header.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the target column, or `None` for the last column.
    pub fn with_target_column(mut self, column: Option<usize>) -> Self {
        self.target_column = column;
        self
    }

    /// Returns whether the first CSV record is a header.
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Returns the target column, `None` meaning the last one.
    pub fn target_column(&self) -> Option<usize> {
        self.target_column
    }
}

/// Read a dataset, choosing the format from the file extension.
///
/// `.arff` (any case) is read as ARFF; everything else as CSV.
///
/// # Errors
///
/// Returns [`IoError`] from the selected reader.
pub fn read_dataset(path: &Path, options: &ReadOptions) -> Result<Dataset, IoError> {
    let is_arff = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("arff"));
    if is_arff {
        arff_read::read_arff(path, options)
    } else {
        csv_read::read_csv(path, options)
    }
}

/// Fails with [`IoError::FileNotFound`] when `path` does not exist.
pub(crate) fn ensure_exists(path: &Path) -> Result<(), IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Splits equal-width numeric rows into features and a target column.
pub(crate) fn assemble(
    path: &Path,
    rows: Vec<Vec<f64>>,
    n_columns: usize,
    options: &ReadOptions,
) -> Result<Dataset, IoError> {
    if rows.is_empty() {
        return Err(KnnError::EmptyDataset.into());
    }
    if n_columns < 2 {
        return Err(IoError::TooFewColumns {
            path: path.to_path_buf(),
            n_columns,
        });
    }
    let target = options.target_column.unwrap_or(n_columns - 1);
    if target >= n_columns {
        return Err(IoError::TargetColumn {
            column: target,
            n_columns,
        });
    }

    let n_features = n_columns - 1;
    let mut features = Vec::with_capacity(rows.len() * n_features);
    let mut targets = Vec::with_capacity(rows.len());
    for row in rows {
        for (j, v) in row.into_iter().enumerate() {
            if j == target {
                targets.push(v);
            } else {
                features.push(v);
            }
        }
    }

    let dataset = Dataset::new(features, targets, n_features)?;
    info!(
        path = %path.display(),
        instances = dataset.len(),
        features = dataset.n_features(),
        target,
        "dataset loaded"
    );
    Ok(dataset)
}
