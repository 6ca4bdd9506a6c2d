//! Fixed-capacity, newest-first history
//!
//! Unlike a list that is trimmed after the fact, the history never holds more
//! than its capacity: pushing into a full history evicts the oldest entry
//! first and hands it back to the caller.

use std::collections::VecDeque;

/// Number of predictions kept on the dashboard
pub const RECENT_PREDICTIONS_CAPACITY: usize = 5;

/// Number of monitoring alerts kept on the dashboard
pub const RECENT_ALERTS_CAPACITY: usize = 20;

/// Bounded history ordered newest-first
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// Create an empty history. A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a new entry, returning the evicted oldest one if the history was full
    pub fn push(&mut self, entry: T) -> Option<T> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_back()
        } else {
            None
        };
        self.entries.push_front(entry);
        evicted
    }

    pub fn newest(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.entries.back()
    }

    /// Iterate newest-first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
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
}

impl<T: Clone> BoundedHistory<T> {
    /// Copy the entries out, newest-first
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}
