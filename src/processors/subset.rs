//! Window extraction: every run of `kernel` consecutive elements as its own vector.
//!
//! Extraction is purely structural and works for any `Clone` element type, so
//! callers can apply their own aggregation to each window. The parallel
//! variant uses rayon's indexed `par_windows`, which keeps the output in
//! ascending order of window start.

use rayon::prelude::*;

use super::window::{window_count, WindowTransform};

/// Window extractor producing owned copies of each window.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetSlidingWindow;

impl<T: Clone> WindowTransform<T> for SubsetSlidingWindow {
    type Output = Vec<T>;

    fn apply(&self, data: &[T], kernel: usize) -> Vec<Vec<T>> {
        extract_windows(data, kernel)
    }
}

/// Extract all windows of `kernel` consecutive elements.
///
/// Window `i` is `data[i..i + kernel]`, copied so that it is independent of
/// both the source and the other windows. A zero kernel or a kernel longer
/// than `data` yields no windows.
///
/// # Example
///
/// ```
/// use window_filter::processors::extract_windows;
///
/// let windows = extract_windows(&[1, 3, 8, 9], 3);
/// assert_eq!(windows, vec![vec![1, 3, 8], vec![3, 8, 9]]);
/// ```
pub fn extract_windows<T: Clone>(data: &[T], kernel: usize) -> Vec<Vec<T>> {
    if window_count(data.len(), kernel) == 0 {
        return Vec::new();
    }
    data.windows(kernel).map(<[T]>::to_vec).collect()
}

/// Parallel version of [`extract_windows`] with identical output.
pub fn extract_windows_par<T: Clone + Send + Sync>(data: &[T], kernel: usize) -> Vec<Vec<T>> {
    if window_count(data.len(), kernel) == 0 {
        return Vec::new();
    }
    data.par_windows(kernel).map(<[T]>::to_vec).collect()
}
