use crate::error::{Error, Result};

const INITIAL_CAPACITY: usize = 128;

/// Array-backed binary min-heap.
///
/// The root is always the smallest element under `T`'s ordering. Capacity
/// grows geometrically and never shrinks; a run's queue is bounded, so the
/// transient over-allocation is acceptable. Equal elements may be stored in
/// either relative order (the heap is not stable).
#[derive(Debug)]
pub struct MinHeap<T: Ord> {
    storage: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            storage: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Current number of elements. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Add an element in amortized O(log n).
    pub fn insert(&mut self, item: T) {
        self.storage.push(item);
        self.sift_up(self.storage.len() - 1);
    }

    /// Remove and return the minimum element in O(log n).
    ///
    /// Errors with [`Error::EmptyQueue`] when the heap is empty.
    pub fn extract_min(&mut self) -> Result<T> {
        let last = self.storage.len().checked_sub(1).ok_or(Error::EmptyQueue)?;
        self.storage.swap(0, last);
        let min = self.storage.pop().ok_or(Error::EmptyQueue)?;
        if !self.storage.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Move the element at `index` up until its parent is no larger.
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.storage[index] < self.storage[parent] {
                self.storage.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move the element at `index` down, always swapping with the smaller
    /// child, until neither child is smaller (or the node is a leaf).
    fn sift_down(&mut self, mut index: usize) {
        let len = self.storage.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smallest = if right < len && self.storage[right] < self.storage[left] {
                right
            } else {
                left
            };
            if self.storage[smallest] < self.storage[index] {
                self.storage.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
