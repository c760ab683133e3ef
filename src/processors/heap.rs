//! Binary heaps with arbitrary-element removal.
//!
//! `std::collections::BinaryHeap` only removes its top element, but the
//! sliding median must evict the element leaving the window wherever it sits.
//! [`RemovableHeap`] keeps the usual array layout and adds `remove`, which
//! finds the element by linear search (O(K)) and repairs the heap in O(log K).
//!
//! Elements only need `PartialOrd`. Incomparable values such as `NaN` do not
//! panic, but the resulting order is unspecified.

/// Which end of the ordering sits at the top of the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOrder {
    /// Largest element on top.
    Max,
    /// Smallest element on top.
    Min,
}

/// Array-backed binary heap supporting removal of any stored value.
#[derive(Debug, Clone)]
pub struct RemovableHeap<T> {
    items: Vec<T>,
    order: HeapOrder,
}

impl<T: PartialOrd> RemovableHeap<T> {
    /// Creates an empty heap.
    pub fn new(order: HeapOrder) -> Self {
        Self::with_capacity(order, 0)
    }

    /// Creates an empty heap with room for `capacity` elements.
    pub fn with_capacity(order: HeapOrder, capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            order,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the top element without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Adds a value to the heap.
    pub fn push(&mut self, value: T) {
        self.items.push(value);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the top element.
    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let top = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        top
    }

    /// Removes one element equal to `value`, returning it.
    ///
    /// Returns `None` when no stored element compares equal.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let idx = self.items.iter().position(|item| item == value)?;
        let last = self.items.len() - 1;
        self.items.swap(idx, last);
        let removed = self.items.pop();

        if idx < self.items.len() {
            // The element moved into `idx` may belong above or below it.
            self.sift_down(idx);
            self.sift_up(idx);
        }
        removed
    }

    /// True when `a` must sit above `b`.
    #[inline]
    fn precedes(&self, a: &T, b: &T) -> bool {
        match self.order {
            HeapOrder::Max => a > b,
            HeapOrder::Min => a < b,
        }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.precedes(&self.items[idx], &self.items[parent]) {
                break;
            }
            self.items.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;

            let mut best = idx;
            if self.precedes(&self.items[left], &self.items[best]) {
                best = left;
            }
            if right < len && self.precedes(&self.items[right], &self.items[best]) {
                best = right;
            }
            if best == idx {
                break;
            }
            self.items.swap(idx, best);
            idx = best;
        }
    }
}
