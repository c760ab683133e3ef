//! Configuration types for the window filter pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("CSV delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),
}

/// Which filter the pipeline applies to each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Plain sliding median; output is `len - kernel + 1` values long.
    Median,
    /// Zero-padded sliding median; output length equals input length.
    ZeroBuffered,
}

/// Configuration for the sliding-window filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Window size
    #[serde(default = "default_kernel")]
    pub kernel: usize,

    /// Filter applied to each column
    #[serde(default = "default_mode")]
    pub mode: FilterMode,
}

fn default_kernel() -> usize {
    3
}

fn default_mode() -> FilterMode {
    FilterMode::ZeroBuffered
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kernel: default_kernel(),
            mode: default_mode(),
        }
    }
}

/// Configuration for reading and writing CSV series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Whether the first row holds column names
    #[serde(default = "default_has_headers")]
    pub has_headers: bool,

    /// Columns to process; empty means every column
    #[serde(default)]
    pub columns: Vec<String>,

    /// Decimal places written for each value
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_delimiter() -> char {
    ','
}

fn default_has_headers() -> bool {
    true
}

fn default_precision() -> usize {
    6
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            has_headers: default_has_headers(),
            columns: Vec::new(),
            precision: default_precision(),
        }
    }
}

impl CsvConfig {
    /// Delimiter as the single byte the csv crate expects.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConfigError::InvalidDelimiter(self.delimiter))
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub csv: CsvConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: PipelineConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.csv.delimiter_byte()?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).map_err(|e| ConfigError::Yaml {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_pipeline_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.filter.kernel, 3);
        assert_eq!(config.filter.mode, FilterMode::ZeroBuffered);
        assert_eq!(config.csv.delimiter, ',');
        assert!(config.csv.has_headers);
        assert!(config.csv.columns.is_empty());
        assert_eq!(config.csv.precision, 6);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "filter:\n  kernel: 5\n  mode: median\ncsv:\n  delimiter: ';'\n";
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.filter.kernel, 5);
        assert_eq!(config.filter.mode, FilterMode::Median);
        assert_eq!(config.csv.delimiter, ';');
        assert!(config.csv.has_headers);
        assert_eq!(config.csv.precision, 6);
    }

    #[test]
    fn test_yaml_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = PipelineConfig::default();
        config.filter.kernel = 7;
        config.csv.columns = vec!["signal".to_string()];
        config.to_yaml(&path).unwrap();

        let loaded = PipelineConfig::from_yaml(&path).unwrap();
        assert_eq!(loaded.filter.kernel, 7);
        assert_eq!(loaded.csv.columns, vec!["signal".to_string()]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = PipelineConfig::from_yaml(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "csv:\n  delimiter: 'é'\n").unwrap();

        let err = PipelineConfig::from_yaml(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDelimiter('é')));
    }
}
