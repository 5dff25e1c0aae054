//! Non-overlapping chunks over an [`IndexedList`].
//!
//! Where [`sliding_windows`](IndexedList::sliding_windows) advances one item
//! at a time, partitioning advances a whole chunk: each item of the requested
//! span lands in exactly one chunk. Only the last chunk may be short.

use crate::error::{Result, TimesliceError};
use crate::{IndexedList, ListBatch};

impl<T> IndexedList<T> {
    /// Split `[index_start, index_end]` (inclusive, negative allowed) into
    /// consecutive chunks of at most `k` items.
    ///
    /// A span of `k` items or fewer comes back as a single chunk.
    ///
    /// # Errors
    /// - [`TimesliceError::Sizing`] if `k` is zero or the normalized
    ///   `index_start` is after `index_end`.
    /// - [`TimesliceError::Index`] if either index is out of range.
    pub fn chunked_partition(&self, k: usize, index_start: isize, index_end: isize) -> Result<Chunks<'_, T>> {
        if k == 0 {
            return Err(TimesliceError::sizing("chunk size must be positive"));
        }
        let (start, end) = self.normalize_span(index_start, index_end)?;
        Ok(Chunks {
            list: self,
            k,
            next_start: start,
            index_end: end,
        })
    }
}

#[derive(Debug)]
pub struct Chunks<'a, T> {
    list: &'a IndexedList<T>,
    k: usize,
    next_start: usize,
    index_end: usize,
}

impl<T> Clone for Chunks<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            k: self.k,
            next_start: self.next_start,
            index_end: self.index_end,
        }
    }
}

impl<'a, T> Iterator for Chunks<'a, T> {
    type Item = ListBatch<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_start > self.index_end {
            return None;
        }
        let first = self.next_start;
        let last = first.saturating_add(self.k - 1).min(self.index_end);
        self.next_start = last + 1;
        Some(ListBatch::of(self.list, first, last))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.next_start > self.index_end {
            0
        } else {
            (self.index_end - self.next_start + 1).div_ceil(self.k)
        };
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for Chunks<'_, T> {}

impl<T> std::iter::FusedIterator for Chunks<'_, T> {}
