//! Streaming sliding-window median built on two balanced heaps.
//!
//! The low-heap is a max-heap holding the smaller half of the window, the
//! high-heap a min-heap holding the larger half. The low-heap is allowed to
//! carry one extra element, so its top is always the window's lower median.
//!
//! For each input index `i`:
//! 1. insert `data[i]` into the low-heap if it is `<=` the low top, otherwise
//!    into the high-heap;
//! 2. once `i >= kernel`, evict `data[i - kernel]` from whichever heap holds it;
//! 3. rebalance until `low_len - high_len` is 0 or 1;
//! 4. once `i >= kernel - 1`, emit the low top.
//!
//! Even kernels therefore yield the lower of the two middle values, not their
//! average.

use log::warn;

use super::heap::{HeapOrder, RemovableHeap};
use super::window::SlidingWindow;

/// Two heaps partitioning the current window around its median.
#[derive(Debug, Clone)]
pub struct DualHeap<T> {
    low: RemovableHeap<T>,
    high: RemovableHeap<T>,
}

impl<T: PartialOrd> DualHeap<T> {
    /// Creates an empty pair of heaps sized for a window of `kernel` elements.
    pub fn with_capacity(kernel: usize) -> Self {
        let half = kernel / 2 + 1;
        Self {
            low: RemovableHeap::with_capacity(HeapOrder::Max, half),
            high: RemovableHeap::with_capacity(HeapOrder::Min, half),
        }
    }

    /// Places `value` on the side of the current low top it belongs to.
    pub fn insert(&mut self, value: T) {
        let goes_low = match self.low.peek() {
            None => true,
            Some(top) => value <= *top,
        };
        if goes_low {
            self.low.push(value);
        } else {
            self.high.push(value);
        }
    }

    /// Removes one occurrence of `outgoing`.
    ///
    /// Returns `false` if neither heap holds an equal element, which only
    /// happens for values without a total order (e.g. `NaN`).
    pub fn evict(&mut self, outgoing: &T) -> bool {
        let in_low = match self.low.peek() {
            Some(top) => outgoing <= top,
            None => false,
        };
        if in_low {
            self.low.remove(outgoing).is_some()
        } else {
            self.high.remove(outgoing).is_some()
        }
    }

    /// Moves elements across until `low_len - high_len` is 0 or 1.
    pub fn rebalance(&mut self) {
        while self.high.len() > self.low.len() {
            match self.high.pop() {
                Some(v) => self.low.push(v),
                None => break,
            }
        }
        while self.low.len() > self.high.len() + 1 {
            match self.low.pop() {
                Some(v) => self.high.push(v),
                None => break,
            }
        }
    }

    /// Lower median of the current contents.
    #[inline]
    pub fn median(&self) -> Option<&T> {
        self.low.peek()
    }

    #[inline]
    pub fn low_len(&self) -> usize {
        self.low.len()
    }

    #[inline]
    pub fn high_len(&self) -> usize {
        self.high.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.low.len() + self.high.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.low.is_empty() && self.high.is_empty()
    }
}

/// Sliding-window median filter over any partially ordered element type.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingWindowMedian;

impl<T: PartialOrd + Clone> SlidingWindow<T> for SlidingWindowMedian {
    fn filter(&self, data: &[T], kernel: usize) -> Vec<T> {
        median_filter(data, kernel)
    }
}

/// Apply a sliding lower-median filter with a window of `kernel` elements.
///
/// Returns `max(0, data.len() - kernel + 1)` values; empty data or a zero
/// kernel produce an empty vector.
///
/// Elements without a total order (e.g. `NaN`) cannot be evicted once they
/// leave the window. Each failed eviction is logged as a warning and the heaps
/// keep the stale element, so later medians are unspecified.
///
/// # Example
///
/// ```
/// use window_filter::processors::median_filter;
///
/// let filtered = median_filter(&[1.0, 3.0, 8.0, 9.0, 5.0, 3.0, 2.0], 3);
/// assert_eq!(filtered, vec![3.0, 8.0, 8.0, 5.0, 3.0]);
/// ```
pub fn median_filter<T: PartialOrd + Clone>(data: &[T], kernel: usize) -> Vec<T> {
    if data.is_empty() || kernel == 0 {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(data.len().saturating_sub(kernel) + 1);
    // Heaps never hold more than the data, whatever the kernel
    let mut heaps = DualHeap::with_capacity(kernel.min(data.len()));

    for (i, value) in data.iter().enumerate() {
        heaps.insert(value.clone());

        if i >= kernel && !heaps.evict(&data[i - kernel]) {
            warn!(
                "Could not evict element {} from the window; it has no total order",
                i - kernel
            );
        }

        heaps.rebalance();

        if i + 1 >= kernel {
            if let Some(median) = heaps.median() {
                result.push(median.clone());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [f64; 7] = [1.0, 3.0, 8.0, 9.0, 5.0, 3.0, 2.0];

    fn brute_force_lower_median(data: &[i64], kernel: usize) -> Vec<i64> {
        data.windows(kernel)
            .map(|w| {
                let mut sorted = w.to_vec();
                sorted.sort_unstable();
                sorted[(kernel - 1) / 2]
            })
            .collect()
    }

    #[test]
    fn test_filter() {
        let res = SlidingWindowMedian.filter(&DATA, 3);
        assert_eq!(res.len(), 5);
        assert_eq!(res, vec![3.0, 8.0, 8.0, 5.0, 3.0]);
    }

    #[test]
    fn test_filter_empty_data() {
        let data: Vec<f64> = Vec::new();
        assert!(median_filter(&data, 3).is_empty());
    }

    #[test]
    fn test_filter_no_kernel() {
        assert!(median_filter(&DATA, 0).is_empty());
    }

    #[test]
    fn test_filter_data_smaller_than_kernel() {
        assert!(median_filter(&[1.0, 3.0, 2.0], 5).is_empty());
    }

    #[test]
    fn test_filter_kernel_equals_length() {
        assert_eq!(median_filter(&DATA, 7), vec![5.0]);
    }

    #[test]
    fn test_filter_kernel_far_exceeds_length() {
        assert!(median_filter(&DATA, usize::MAX).is_empty());
        assert!(median_filter(&DATA, usize::MAX / 2).is_empty());
        assert!(median_filter(&DATA, DATA.len() + 1).is_empty());
    }

    #[test]
    fn test_unordered_elements_keep_output_length() {
        let data = [1.0, f64::NAN, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(median_filter(&data, 3).len(), 4);
    }

    #[test]
    fn test_filter_kernel_one_is_identity() {
        assert_eq!(median_filter(&DATA, 1), DATA.to_vec());
    }

    #[test]
    fn test_even_kernel_emits_lower_median() {
        // Windows: [1,3,8,9] [3,8,9,5] [8,9,5,3] [9,5,3,2]
        assert_eq!(median_filter(&DATA, 4), vec![3.0, 5.0, 5.0, 3.0]);
        assert_eq!(median_filter(&[4, 1], 2), vec![1]);
    }

    #[test]
    fn test_filter_with_duplicates() {
        let data = [5, 5, 5, 1, 5, 5, 9, 9, 9, 5];
        assert_eq!(median_filter(&data, 3), brute_force_lower_median(&data, 3));
        assert_eq!(median_filter(&data, 4), brute_force_lower_median(&data, 4));
    }

    #[test]
    fn test_matches_brute_force() {
        // Deterministic pseudo-random sequence with many repeats
        let data: Vec<i64> = (0..200).map(|i: i64| (i * 7919 + 13) % 31 - 15).collect();
        for kernel in 1..=12 {
            assert_eq!(
                median_filter(&data, kernel),
                brute_force_lower_median(&data, kernel),
                "kernel {}",
                kernel
            );
        }
    }

    #[test]
    fn test_non_numeric_elements() {
        let data = ["pear", "apple", "fig", "kiwi", "banana"];
        assert_eq!(median_filter(&data, 3), vec!["fig", "fig", "fig"]);
    }

    #[test]
    fn test_heap_invariant_holds_for_every_prefix() {
        let data: Vec<i64> = (0..100).map(|i: i64| (i * 31 + 7) % 17).collect();
        let kernel = 6;
        let mut heaps = DualHeap::with_capacity(kernel);

        for (i, &value) in data.iter().enumerate() {
            heaps.insert(value);
            if i >= kernel {
                assert!(heaps.evict(&data[i - kernel]));
            }
            heaps.rebalance();

            let diff = heaps.low_len() as isize - heaps.high_len() as isize;
            assert!(diff == 0 || diff == 1, "prefix {}: diff {}", i, diff);
            assert_eq!(heaps.len(), (i + 1).min(kernel));
        }
    }

    #[test]
    fn test_dual_heap_rebalance_moves_from_high() {
        let mut heaps = DualHeap::with_capacity(3);
        heaps.insert(1);
        heaps.insert(2);
        heaps.insert(3);
        // 2 and 3 land in the high-heap before rebalancing
        assert_eq!(heaps.low_len(), 1);
        assert_eq!(heaps.high_len(), 2);

        heaps.rebalance();
        assert_eq!(heaps.low_len(), 2);
        assert_eq!(heaps.high_len(), 1);
        assert_eq!(heaps.median(), Some(&2));
    }

    #[test]
    fn test_dual_heap_evict_missing_value() {
        let mut heaps = DualHeap::with_capacity(2);
        heaps.insert(1.0);
        assert!(!heaps.evict(&f64::NAN));
        assert!(heaps.evict(&1.0));
        assert!(heaps.is_empty());
    }
}
