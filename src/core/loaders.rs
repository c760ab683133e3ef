//! Loaders for numeric series stored as CSV columns.
//!
//! Every selected column is parsed as `f64`. Cells that are blank or not
//! numbers are reported with their row and column rather than replaced, since
//! a silently substituted value would shift every median around it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

use crate::config::{ConfigError, CsvConfig};

/// Errors that can occur during file loading.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Empty file: {0}")]
    EmptyFile(PathBuf),

    #[error("Missing required columns: {0}")]
    MissingColumns(String),

    #[error("Parse error at row {row}, column '{column}': {value:?} is not a number")]
    ParseError {
        row: usize,
        column: String,
        value: String,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// A named sequence of samples, one CSV column.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Column name (header value, or `column_<index>` without headers).
    pub name: String,
    /// Samples in file order.
    pub values: Vec<f64>,
}

impl Series {
    /// Creates a series from a name and its values.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Load numeric series from a CSV file.
///
/// With `config.columns` empty every column is returned in file order,
/// otherwise exactly the named columns in the configured order.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has no data rows, lacks a
/// requested column, or contains a cell that is not a number.
pub fn load_series<P: AsRef<Path>>(path: P, config: &CsvConfig) -> Result<Vec<Series>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let series = read_series(BufReader::new(file), config)?;

    if series.iter().all(Series::is_empty) {
        return Err(LoaderError::EmptyFile(path.to_path_buf()));
    }
    Ok(series)
}

/// Load only the first column of a CSV file, ignoring `config.columns`.
///
/// Cells in the other columns are never parsed, so they may hold labels or
/// timestamps.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has no columns or data rows,
/// or its first column contains a cell that is not a number.
pub fn load_first_series<P: AsRef<Path>>(path: P, config: &CsvConfig) -> Result<Series> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let first = read_first_series(BufReader::new(file), config)?
        .filter(|s| !s.is_empty())
        .ok_or_else(|| LoaderError::EmptyFile(path.to_path_buf()))?;
    Ok(first)
}

/// Parse numeric series from any CSV reader.
///
/// Unlike [`load_series`], a source without data rows yields empty series.
pub fn read_series<R: Read>(source: R, config: &CsvConfig) -> Result<Vec<Series>> {
    read_columns(source, config, |names| select_columns(names, &config.columns))
}

/// Parse the first column of any CSV reader, or `None` if it has no columns.
pub fn read_first_series<R: Read>(source: R, config: &CsvConfig) -> Result<Option<Series>> {
    let series = read_columns(source, config, |names| {
        Ok(if names.is_empty() { Vec::new() } else { vec![0] })
    })?;
    Ok(series.into_iter().next())
}

/// Parse the columns picked by `select` from the column names.
fn read_columns<R, F>(source: R, config: &CsvConfig, select: F) -> Result<Vec<Series>>
where
    R: Read,
    F: FnOnce(&[String]) -> Result<Vec<usize>>,
{
    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(config.has_headers)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut names: Vec<String> = if config.has_headers {
        reader.headers()?.iter().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }

    // Headerless files are named after the widest row
    if !config.has_headers {
        let width = records.iter().map(|r| r.len()).max().unwrap_or(0);
        names = (0..width).map(|i| format!("column_{}", i)).collect();
    }

    let selected = select(&names)?;

    let mut series: Vec<Series> = selected
        .iter()
        .map(|&idx| Series::new(names[idx].clone(), Vec::with_capacity(records.len())))
        .collect();

    for (row_idx, record) in records.iter().enumerate() {
        // Row numbers are 1-based and count the header line
        let row = row_idx + 1 + usize::from(config.has_headers);
        for (out, &col_idx) in series.iter_mut().zip(&selected) {
            let raw = record.get(col_idx).unwrap_or("");
            let value = raw.parse::<f64>().map_err(|_| LoaderError::ParseError {
                row,
                column: out.name.clone(),
                value: raw.to_string(),
            })?;
            out.values.push(value);
        }
    }

    Ok(series)
}

/// Resolve requested column names to indices, keeping the requested order.
fn select_columns(names: &[String], requested: &[String]) -> Result<Vec<usize>> {
    if requested.is_empty() {
        return Ok((0..names.len()).collect());
    }

    let mut indices = Vec::with_capacity(requested.len());
    let mut missing = Vec::new();
    for wanted in requested {
        match names.iter().position(|name| name == wanted) {
            Some(idx) => indices.push(idx),
            None => missing.push(wanted.as_str()),
        }
    }

    if !missing.is_empty() {
        return Err(LoaderError::MissingColumns(missing.join(", ")));
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_load_all_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv(temp_dir.path(), "data.csv", "a,b\n1,10\n3,30\n8,80\n");

        let series = load_series(&path, &CsvConfig::default()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0], Series::new("a", vec![1.0, 3.0, 8.0]));
        assert_eq!(series[1], Series::new("b", vec![10.0, 30.0, 80.0]));
    }

    #[test]
    fn test_load_selected_columns_in_requested_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv(temp_dir.path(), "data.csv", "a,b,c\n1,2,3\n4,5,6\n");

        let config = CsvConfig {
            columns: vec!["c".to_string(), "a".to_string()],
            ..CsvConfig::default()
        };
        let series = load_series(&path, &config).unwrap();
        assert_eq!(series[0].name, "c");
        assert_eq!(series[0].values, vec![3.0, 6.0]);
        assert_eq!(series[1].name, "a");
        assert_eq!(series[1].values, vec![1.0, 4.0]);
    }

    #[test]
    fn test_load_without_headers() {
        let config = CsvConfig {
            has_headers: false,
            delimiter: ';',
            ..CsvConfig::default()
        };
        let series = read_series("1.5; 2\n3;4\n".as_bytes(), &config).unwrap();
        assert_eq!(series[0], Series::new("column_0", vec![1.5, 3.0]));
        assert_eq!(series[1], Series::new("column_1", vec![2.0, 4.0]));
    }

    #[test]
    fn test_missing_column() {
        let config = CsvConfig {
            columns: vec!["x".to_string(), "a".to_string(), "y".to_string()],
            ..CsvConfig::default()
        };
        let err = read_series("a\n1\n".as_bytes(), &config).unwrap_err();
        match err {
            LoaderError::MissingColumns(cols) => assert_eq!(cols, "x, y"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unparsable_cell_reports_position() {
        let err = read_series("a,b\n1,2\n3,oops\n".as_bytes(), &CsvConfig::default()).unwrap_err();
        match err {
            LoaderError::ParseError { row, column, value } => {
                assert_eq!(row, 3);
                assert_eq!(column, "b");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_blank_cell_is_error() {
        let result = read_series("a,b\n1,\n".as_bytes(), &CsvConfig::default());
        assert!(matches!(result, Err(LoaderError::ParseError { .. })));
    }

    #[test]
    fn test_load_first_series_skips_other_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv(
            temp_dir.path(),
            "labelled.csv",
            "signal,label\n1,low\n3,low\n8,high\n",
        );

        let config = CsvConfig {
            columns: vec!["label".to_string()],
            ..CsvConfig::default()
        };
        let first = load_first_series(&path, &config).unwrap();
        assert_eq!(first, Series::new("signal", vec![1.0, 3.0, 8.0]));

        // The full loader still rejects the label column
        assert!(matches!(
            load_series(&path, &CsvConfig::default()),
            Err(LoaderError::ParseError { .. })
        ));
    }

    #[test]
    fn test_read_first_series_without_columns() {
        let config = CsvConfig {
            has_headers: false,
            ..CsvConfig::default()
        };
        assert_eq!(read_first_series("".as_bytes(), &config).unwrap(), None);
    }

    #[test]
    fn test_load_first_series_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv(temp_dir.path(), "empty.csv", "signal,label\n");

        let result = load_first_series(&path, &CsvConfig::default());
        assert!(matches!(result, Err(LoaderError::EmptyFile(_))));
    }

    #[test]
    fn test_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv(temp_dir.path(), "empty.csv", "a,b\n");

        let result = load_series(&path, &CsvConfig::default());
        assert!(matches!(result, Err(LoaderError::EmptyFile(_))));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_series(temp_dir.path().join("nope.csv"), &CsvConfig::default());
        assert!(matches!(result, Err(LoaderError::Io(_))));
    }
}
