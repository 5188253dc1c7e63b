//! Numeric ARFF reading.
//!
//! Supports the dense subset of the format: `@relation`, `@attribute` lines
//! of type `numeric`, `real` or `integer`, and comma-separated rows after
//! `@data`. Lines starting with `%` are comments. Keywords and types are
//! case-insensitive. Missing values (`?`) and sparse rows are rejected.

use std::path::Path;

use proxima_knn::Dataset;
use tracing::debug;

use crate::error::IoError;
use crate::reader::{ReadOptions, assemble, ensure_exists};

const NUMERIC_TYPES: [&str; 3] = ["numeric", "real", "integer"];

/// Read a numeric ARFF file into a [`Dataset`].
///
/// The CSV header option is ignored; the target column option applies.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::UnsupportedAttribute`] for a non-numeric attribute,
/// [`IoError::Parse`] for a malformed header or data line, and
/// [`IoError::Dataset`] if the rows do not form a valid dataset.
pub fn read_arff(path: &Path, options: &ReadOptions) -> Result<Dataset, IoError> {
    ensure_exists(path)?;
    let text = std::fs::read_to_string(path)?;

    let parse_error = |line: usize, reason: String| IoError::Parse {
        path: path.to_path_buf(),
        line: line as u64,
        reason,
    };

    let mut attributes: Vec<String> = Vec::new();
    let mut in_data = false;
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if in_data {
            if line.starts_with('{') {
                return Err(parse_error(line_no, "sparse rows are not supported".into()));
            }
            let mut row = Vec::with_capacity(attributes.len());
            for field in line.split(',').map(str::trim) {
                if field == "?" {
                    return Err(parse_error(
                        line_no,
                        "missing values are not supported".into(),
                    ));
                }
                let value: f64 = field
                    .parse()
                    .map_err(|_| parse_error(line_no, format!("not a number: {field:?}")))?;
                row.push(value);
            }
            if row.len() != attributes.len() {
                return Err(parse_error(
                    line_no,
                    format!("expected {} values, got {}", attributes.len(), row.len()),
                ));
            }
            rows.push(row);
            continue;
        }

        let (keyword, rest) = split_keyword(line);
        match keyword.to_ascii_lowercase().as_str() {
            "@relation" => {
                debug!(relation = rest, "arff relation");
            }
            "@attribute" => {
                let (name, kind) = parse_attribute(rest)
                    .ok_or_else(|| parse_error(line_no, format!("malformed attribute: {line:?}")))?;
                if !NUMERIC_TYPES.contains(&kind.to_ascii_lowercase().as_str()) {
                    return Err(IoError::UnsupportedAttribute {
                        name: name.to_string(),
                        kind: kind.to_string(),
                    });
                }
                attributes.push(name.to_string());
            }
            "@data" => {
                if attributes.is_empty() {
                    return Err(parse_error(line_no, "@data before any @attribute".into()));
                }
                in_data = true;
            }
            _ => {
                return Err(parse_error(line_no, format!("unexpected line: {line:?}")));
            }
        }
    }

    if !in_data {
        return Err(parse_error(text.lines().count(), "no @data section".into()));
    }
    debug!(
        path = %path.display(),
        attributes = ?attributes,
        rows = rows.len(),
        "arff parsed"
    );

    assemble(path, rows, attributes.len(), options)
}

/// Splits a header line into its `@keyword` and the trimmed remainder.
fn split_keyword(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    }
}

/// Parses `name type` where the name may be single- or double-quoted.
fn parse_attribute(rest: &str) -> Option<(&str, &str)> {
    let (name, kind) = match rest.chars().next()? {
        quote @ ('\'' | '"') => {
            let body = &rest[1..];
            let end = body.find(quote)?;
            (&body[..end], body[end + 1..].trim())
        }
        _ => {
            let (name, kind) = rest.split_once(char::is_whitespace)?;
            (name, kind.trim())
        }
    };
    if name.is_empty() || kind.is_empty() {
        return None;
    }
    Some((name, kind))
}
