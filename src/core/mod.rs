//! Core data types and I/O operations.

pub mod loaders;
pub mod writers;

pub use loaders::{
    load_first_series, load_series, read_first_series, read_series, LoaderError, Series,
};
pub use writers::{write_series_csv, write_windows_csv, WriteError};
