//! Bounded collection utilities for result and metric histories

use std::collections::VecDeque;

/// Helper trait for bounded VecDeque operations
pub(crate) trait BoundedPush<T> {
    fn push_bounded(&mut self, value: T, max_size: usize);
}

impl<T> BoundedPush<T> for VecDeque<T> {
    /// Push a value while keeping at most `max_size` entries, dropping the oldest
    #[inline]
    fn push_bounded(&mut self, value: T, max_size: usize) {
        let max_size = max_size.max(1);
        while self.len() >= max_size {
            self.pop_front();
        }
        self.push_back(value);
    }
}
