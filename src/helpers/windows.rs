//! Overlapping, fixed-size windows over an [`IndexedList`].
//!
//! Window `w` holds the `k` items ending at index `w`, i.e. `[w-k+1, w]`.
//! The next window ends at `w+1`, so neighbours share `k-1` items. This is
//! the shape a sequence model wants: every window is "the latest snapshot
//! plus the `k-1` before it".

use crate::error::{Result, TimesliceError};
use crate::{IndexedList, ListBatch};

impl<T> IndexedList<T> {
    /// Windows of exactly `k` adjacent items, for window ends from
    /// `index_start` to `index_end` (both inclusive, negative allowed).
    ///
    /// A window cannot end before index `k-1`, so a smaller start is clamped
    /// up to `k-1` without error. The clamp is applied to the cursor, not to
    /// the requested span: when `index_end < k-1` exactly one window, ending
    /// at `k-1`, is produced.
    ///
    /// # Errors
    /// - [`TimesliceError::Sizing`] if `k` is zero or exceeds the list length,
    ///   or if the normalized `index_start` is after `index_end`.
    /// - [`TimesliceError::Index`] if either index is out of range.
    ///
    /// # Example
    /// ```
    /// use chrono::{TimeDelta, TimeZone, Utc};
    /// use timeslice::IndexedList;
    ///
    /// let t0 = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    /// let list = IndexedList::new((0..5).collect::<Vec<i32>>(), |i| Ok(t0 + TimeDelta::hours(*i as i64)))?;
    ///
    /// let ends: Vec<usize> = list.sliding_windows(3, 0, -1)?.map(|w| w.last_index()).collect();
    /// assert_eq!(ends, vec![2, 3, 4]);
    /// # Ok::<(), timeslice::TimesliceError>(())
    /// ```
    pub fn sliding_windows(&self, k: usize, index_start: isize, index_end: isize) -> Result<SlidingWindows<'_, T>> {
        if k == 0 {
            return Err(TimesliceError::sizing("window size must be positive"));
        }
        if k > self.len() {
            return Err(TimesliceError::sizing(format!(
                "window size {k} exceeds the number of list items ({})",
                self.len()
            )));
        }
        let (start, end) = self.normalize_span(index_start, index_end)?;
        if start < k - 1 {
            log::debug!("window start {start} clamped to {}", k - 1);
        }
        Ok(SlidingWindows {
            list: self,
            k,
            cursor: start,
            index_end: end,
        })
    }
}

#[derive(Debug)]
pub struct SlidingWindows<'a, T> {
    list: &'a IndexedList<T>,
    k: usize,
    cursor: usize,
    index_end: usize,
}

impl<T> Clone for SlidingWindows<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            k: self.k,
            cursor: self.cursor,
            index_end: self.index_end,
        }
    }
}

impl<'a, T> Iterator for SlidingWindows<'a, T> {
    type Item = ListBatch<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor > self.index_end {
            return None;
        }
        let last = self.cursor.max(self.k - 1);
        self.cursor = last + 1;
        Some(ListBatch::of(self.list, last + 1 - self.k, last))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.cursor > self.index_end {
            0
        } else {
            let last = self.cursor.max(self.k - 1);
            if last > self.index_end { 1 } else { self.index_end - last + 1 }
        };
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for SlidingWindows<'_, T> {}

impl<T> std::iter::FusedIterator for SlidingWindows<'_, T> {}
