//! Reusable scratch stack for temporary per-operation data.
//!
//! [`ScratchRegion`] is a bump stack over a `Vec<T>`. Callers take a
//! [`mark`](ScratchRegion::mark), push what they need, and
//! [`release`](ScratchRegion::release) back to the mark when done, so nested
//! users (e.g. a split that cascades into another split) share one
//! allocation. The backing storage is reused across steps.

/// Bump-allocated scratch space with stack discipline.
pub struct ScratchRegion<T> {
    /// Backing storage. Grows on demand, never shrinks during runtime.
    data: Vec<T>,
}

impl<T: Copy> ScratchRegion<T> {
    /// Create a new scratch region with the given initial capacity.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(initial_capacity),
        }
    }

    /// Current top of the stack. Pass to [`release`](Self::release) later.
    pub fn mark(&self) -> usize {
        self.data.len()
    }

    /// Push one element.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Copy out the element at absolute position `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.data.get(index).copied()
    }

    /// Pop everything pushed since `mark`.
    pub fn release(&mut self, mark: usize) {
        self.data.truncate(mark);
    }

    /// Drop all contents, keeping the allocation.
    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Number of elements currently held.
    pub fn used(&self) -> usize {
        self.data.len()
    }

    /// Allocated capacity in elements.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }
}

impl<T: Copy> Default for ScratchRegion<T> {
    fn default() -> Self {
        Self::new(0)
    }
}
