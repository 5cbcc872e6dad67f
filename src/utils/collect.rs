//! Lock-free result collection for rayon workers.

use crossbeam::queue::SegQueue;

/// Collects items pushed from parallel workers.
///
/// Wraps `SegQueue` so workers never contend on a mutex. Order of the
/// drained items is unspecified; sort afterwards if it matters.
pub struct ParallelCollector<T> {
    queue: SegQueue<T>,
}

impl<T> ParallelCollector<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            queue: SegQueue::new(),
        }
    }

    /// Push an item (lock-free).
    #[inline]
    pub fn push(&self, item: T) {
        self.queue.push(item);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drain all items into a Vec.
    pub fn drain(self) -> Vec<T> {
        let mut results = Vec::with_capacity(self.queue.len());
        while let Some(item) = self.queue.pop() {
            results.push(item);
        }
        results
    }
}

impl<T> Default for ParallelCollector<T> {
    fn default() -> Self {
        Self::new()
    }
}
