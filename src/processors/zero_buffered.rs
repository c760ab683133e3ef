//! Length-preserving median filter using symmetric zero padding.
//!
//! Only odd kernels are accepted. The input is padded with `kernel / 2` zeros
//! on each side before the median filter runs, so the output has exactly one
//! value per input sample. Values near either end are pulled toward zero.

use log::warn;

use super::median::median_filter;
use super::window::SlidingWindow;

/// Zero-buffered median filter whose output length equals its input length.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroBufferedSlidingWindowMedian;

impl SlidingWindow<f64> for ZeroBufferedSlidingWindowMedian {
    fn filter(&self, data: &[f64], kernel: usize) -> Vec<f64> {
        median_filter_preserving_length(data, kernel)
    }
}

/// Apply a median filter that keeps `data.len()` values.
///
/// An even kernel (including zero) logs a warning and yields an empty vector.
///
/// # Example
///
/// ```
/// use window_filter::processors::median_filter_preserving_length;
///
/// let data = [1.0, 3.0, 8.0, 9.0, 5.0, 3.0, 2.0];
/// let filtered = median_filter_preserving_length(&data, 3);
/// assert_eq!(filtered, vec![1.0, 3.0, 8.0, 8.0, 5.0, 3.0, 2.0]);
/// ```
pub fn median_filter_preserving_length(data: &[f64], kernel: usize) -> Vec<f64> {
    if kernel % 2 == 0 {
        warn!("Kernel needs to be odd, got {}", kernel);
        return Vec::new();
    }

    // Beyond 2n + 1 every window covers all data and a majority of zeros, so
    // the result no longer depends on the kernel
    let kernel = kernel.min(data.len().saturating_mul(2).saturating_add(1));
    let pad = kernel / 2;
    let mut buffered = Vec::with_capacity(data.len() + 2 * pad);
    buffered.resize(pad, 0.0);
    buffered.extend_from_slice(data);
    buffered.resize(data.len() + 2 * pad, 0.0);

    median_filter(&buffered, kernel)
}
