//! Sliding-window capability contracts.
//!
//! Two operator shapes:
//! - [`SlidingWindow`] reduces every window to one element of the input type.
//! - [`WindowTransform`] maps every window to an arbitrary output type.

/// A filter that groups the data into windows of `kernel` consecutive
/// elements and reduces each window to a single representative value.
///
/// The result is never longer than the input unless the implementation pads
/// the data first.
pub trait SlidingWindow<T> {
    /// Filter `data` with a window of `kernel` elements.
    ///
    /// Degenerate input (empty data, zero kernel, kernel longer than the data)
    /// yields an empty vector rather than an error.
    fn filter(&self, data: &[T], kernel: usize) -> Vec<T>;
}

/// A window operator that produces one value of `Self::Output` per window
/// position, in ascending order of the window's start index.
pub trait WindowTransform<I> {
    /// Value produced for each window.
    type Output;

    /// Apply the transform to every window of `kernel` elements in `data`.
    fn apply(&self, data: &[I], kernel: usize) -> Vec<Self::Output>;
}

/// Number of complete windows of `kernel` elements over `len` elements.
#[inline]
pub fn window_count(len: usize, kernel: usize) -> usize {
    if kernel == 0 || kernel > len {
        0
    } else {
        len - kernel + 1
    }
}
