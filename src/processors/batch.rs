//! File-level orchestration: load CSV columns, filter them, write the result.
//!
//! Columns are independent, so they are filtered in parallel with rayon;
//! the indexed collect keeps them in input order.

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use rayon::prelude::*;

use crate::config::{CsvConfig, FilterConfig, FilterMode, PipelineConfig};
use crate::core::loaders::{load_first_series, load_series, Series};
use crate::core::writers::{write_series_csv, write_windows_csv};

use super::median::median_filter;
use super::subset::extract_windows_par;
use super::zero_buffered::median_filter_preserving_length;

/// Outcome of filtering one CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    /// Number of columns filtered
    pub columns: usize,
    /// Samples per column before filtering (longest column)
    pub input_len: usize,
    /// Samples per column after filtering (longest column)
    pub output_len: usize,
}

/// Outcome of extracting windows from one CSV column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    /// Column the windows were taken from
    pub column: String,
    /// Samples in the column
    pub input_len: usize,
    /// Windows written
    pub windows: usize,
}

/// Filter one sequence according to `config`.
pub fn apply_filter(values: &[f64], config: &FilterConfig) -> Vec<f64> {
    match config.mode {
        FilterMode::Median => median_filter(values, config.kernel),
        FilterMode::ZeroBuffered => median_filter_preserving_length(values, config.kernel),
    }
}

/// Filter every series in parallel, keeping names and order.
pub fn filter_series(series: &[Series], config: &FilterConfig) -> Vec<Series> {
    series
        .par_iter()
        .map(|s| {
            let values = apply_filter(&s.values, config);
            debug!(
                "{}: {} -> {} samples (kernel {}, {:?})",
                s.name,
                s.len(),
                values.len(),
                config.kernel,
                config.mode
            );
            Series::new(s.name.clone(), values)
        })
        .collect()
}

/// Filter the configured columns of `input` and write them to `output`.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or the output written.
pub fn filter_csv(input: &Path, output: &Path, config: &PipelineConfig) -> Result<FilterReport> {
    let series = load_series(input, &config.csv)
        .with_context(|| format!("Failed to load series from {}", input.display()))?;

    let filtered = filter_series(&series, &config.filter);

    write_series_csv(output, &filtered, config.csv.precision)
        .with_context(|| format!("Failed to write filtered series to {}", output.display()))?;

    let report = FilterReport {
        columns: filtered.len(),
        input_len: series.iter().map(Series::len).max().unwrap_or(0),
        output_len: filtered.iter().map(Series::len).max().unwrap_or(0),
    };
    info!(
        "{} -> {}: {} columns, {} -> {} samples",
        input.display(),
        output.display(),
        report.columns,
        report.input_len,
        report.output_len
    );
    Ok(report)
}

/// Extract windows of `kernel` samples from one column and write them to `output`.
///
/// `column` selects the column by name; `None` takes the first configured
/// column, or the first column of the file when none is configured. Only the
/// chosen column is parsed.
pub fn extract_csv(
    input: &Path,
    output: &Path,
    column: Option<&str>,
    kernel: usize,
    csv: &CsvConfig,
) -> Result<ExtractReport> {
    let named = column.or_else(|| csv.columns.first().map(String::as_str));
    let source = match named {
        Some(name) => {
            let csv = CsvConfig {
                columns: vec![name.to_string()],
                ..csv.clone()
            };
            load_series(input, &csv)
                .with_context(|| format!("Failed to load series from {}", input.display()))?
                .into_iter()
                .next()
                .with_context(|| format!("No columns found in {}", input.display()))?
        }
        None => load_first_series(input, csv)
            .with_context(|| format!("Failed to load series from {}", input.display()))?,
    };

    let windows = extract_windows_par(&source.values, kernel);

    write_windows_csv(output, &windows, csv.precision)
        .with_context(|| format!("Failed to write windows to {}", output.display()))?;

    info!(
        "{} [{}] -> {}: {} windows of {}",
        input.display(),
        source.name,
        output.display(),
        windows.len(),
        kernel
    );
    Ok(ExtractReport {
        column: source.name,
        input_len: source.values.len(),
        windows: windows.len(),
    })
}
