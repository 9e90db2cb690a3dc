//! Fixed-capacity transition history.

use std::collections::VecDeque;

/// Keeps the most recent `capacity` entries; older entries are evicted.
#[derive(Debug, Clone)]
pub struct TransitionRing<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> TransitionRing<T> {
    /// Creates an empty ring. Capacity is at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest entry, if any.
    pub fn last(&self) -> Option<&T> {
        self.entries.back()
    }

    /// Copies the retained entries, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}
