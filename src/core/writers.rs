//! CSV writers for filtered series and extracted windows.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;

use super::loaders::Series;

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to flush data to file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Creates a CSV writer over a buffered file at `path`.
fn create_csv_writer(path: &Path) -> Result<csv::Writer<BufWriter<File>>> {
    ensure_parent_dirs(path)?;
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(csv::Writer::from_writer(BufWriter::new(file)))
}

/// Write series side by side, one column each.
///
/// Rows run up to the longest series; shorter series leave blank cells, which
/// happens when a plain median filter shortens the columns.
///
/// # Arguments
///
/// * `path` - Output file path (parent directories will be created if needed)
/// * `series` - Columns to write, in order
/// * `precision` - Decimal places per value
pub fn write_series_csv(path: &Path, series: &[Series], precision: usize) -> Result<()> {
    let mut writer = create_csv_writer(path)?;
    let path_str = path.display().to_string();
    let csv_err = |e| WriteError::CsvError {
        path: path_str.clone(),
        source: e,
    };

    writer
        .write_record(series.iter().map(|s| s.name.as_str()))
        .map_err(csv_err)?;

    let rows = series.iter().map(Series::len).max().unwrap_or(0);
    for i in 0..rows {
        let row = series.iter().map(|s| match s.values.get(i) {
            Some(v) => format!("{:.*}", precision, v),
            None => String::new(),
        });
        writer.write_record(row).map_err(csv_err)?;
    }

    writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str.clone(),
        source: e,
    })?;

    Ok(())
}

/// Write extracted windows, one row per window.
///
/// The header is `start,w_0,...,w_{k-1}` where `k` is the window length and
/// `start` the index of the window's first element.
pub fn write_windows_csv(path: &Path, windows: &[Vec<f64>], precision: usize) -> Result<()> {
    let mut writer = create_csv_writer(path)?;
    let path_str = path.display().to_string();
    let csv_err = |e| WriteError::CsvError {
        path: path_str.clone(),
        source: e,
    };

    let width = windows.first().map_or(0, Vec::len);
    let header = std::iter::once("start".to_string()).chain((0..width).map(|i| format!("w_{}", i)));
    writer.write_record(header).map_err(csv_err)?;

    for (start, window) in windows.iter().enumerate() {
        let row = std::iter::once(start.to_string())
            .chain(window.iter().map(|v| format!("{:.*}", precision, v)));
        writer.write_record(row).map_err(csv_err)?;
    }

    writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str.clone(),
        source: e,
    })?;

    Ok(())
}
