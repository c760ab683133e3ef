//! Sliding-window order-statistic filters.
//!
//! This crate provides:
//! - A streaming median filter built on two balanced heaps
//! - A length-preserving, zero-padded variant for odd kernels
//! - Window extraction for custom per-window processing
//! - A CSV pipeline and CLI that apply these filters column by column
//!
//! # Example
//!
//! ```
//! use window_filter::processors::{median_filter, median_filter_preserving_length};
//!
//! let data = [1.0, 3.0, 8.0, 9.0, 5.0, 3.0, 2.0];
//! assert_eq!(median_filter(&data, 3), vec![3.0, 8.0, 8.0, 5.0, 3.0]);
//! assert_eq!(median_filter_preserving_length(&data, 5).len(), data.len());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;

pub use config::{CsvConfig, FilterConfig, FilterMode, PipelineConfig};
pub use self::core::loaders::Series;
pub use processors::{SlidingWindow, WindowTransform};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
