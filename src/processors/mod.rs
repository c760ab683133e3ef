//! Sliding-window operators and the batch layer built on them.

pub mod batch;
pub mod heap;
pub mod median;
pub mod subset;
pub mod window;
pub mod zero_buffered;

// Re-export key types for convenience
pub use batch::{apply_filter, extract_csv, filter_csv, filter_series, ExtractReport, FilterReport};
pub use heap::{HeapOrder, RemovableHeap};
pub use median::{median_filter, DualHeap, SlidingWindowMedian};
pub use subset::{extract_windows, extract_windows_par, SubsetSlidingWindow};
pub use window::{window_count, SlidingWindow, WindowTransform};
pub use zero_buffered::{median_filter_preserving_length, ZeroBufferedSlidingWindowMedian};
