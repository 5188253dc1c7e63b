//! Numeric CSV reading.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use proxima_knn::Dataset;
use tracing::debug;

use crate::error::IoError;
use crate::reader::{ReadOptions, assemble, ensure_exists};

/// Read a numeric CSV file into a [`Dataset`].
///
/// Every field must parse as a finite `f64`. Fields are trimmed, and blank
/// lines are skipped.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::Csv`] for malformed CSV (including rows of unequal length),
/// [`IoError::Parse`] for a non-numeric field, and [`IoError::Dataset`] if
/// the rows do not form a valid dataset.
pub fn read_csv(path: &Path, options: &ReadOptions) -> Result<Dataset, IoError> {
    ensure_exists(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(options.has_header())
        .trim(Trim::All)
        .from_path(path)?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut width = 0;
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let mut row = Vec::with_capacity(record.len());
        for field in record.iter() {
            let value: f64 = field.parse().map_err(|_| IoError::Parse {
                path: path.to_path_buf(),
                line,
                reason: format!("not a number: {field:?}"),
            })?;
            row.push(value);
        }
        width = row.len();
        rows.push(row);
    }
    debug!(path = %path.display(), rows = rows.len(), columns = width, "csv parsed");

    assemble(path, rows, width, options)
}
