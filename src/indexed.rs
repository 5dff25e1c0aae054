//! Ordered items paired with their timestamps.
//!
//! An [`IndexedList`] is built once from a sequence of opaque items and an
//! extraction function. Timestamps are extracted eagerly at construction and
//! kept in a parallel vector; nothing is ever inserted or removed afterwards.
//!
//! Querying lives in the `helpers` modules as further `impl` blocks:
//! - period filtering: [`IndexedList::filter`], [`IndexedList::filter_indices`]
//! - overlapping windows: [`IndexedList::sliding_windows`]
//! - non-overlapping chunks: [`IndexedList::chunked_partition`]
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use timeslice::{IndexedList, Period};
//! use timeslice::parser::RegexParser;
//!
//! let parser = RegexParser::new(r"_(\d{4})_(\d{2})_(\d{2})$")?;
//! let list = IndexedList::with_parser(vec!["a_2020_01_01", "a_2020_03_04"], &parser)?;
//!
//! let end = Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap();
//! assert_eq!(list.filter(&Period::ending_at(end)), vec![&"a_2020_01_01"]);
//! # Ok::<(), timeslice::TimesliceError>(())
//! ```

use std::fmt;

use crate::error::{ParseError, Result, TimesliceError};
use crate::parser::DateTimeParser;
use crate::Timestamp;

pub(crate) const EMPTY_LIST: &str = "List is empty and there are no items to query!";

#[derive(Clone, Debug)]
pub struct IndexedList<T> {
    pub(crate) items: Vec<T>,
    pub(crate) timestamps: Vec<Timestamp>,
}

impl<T> IndexedList<T> {
    /// Build the list, extracting every timestamp up front.
    ///
    /// # Errors
    /// - [`TimesliceError::Construction`] when `items` is empty.
    /// - [`TimesliceError::Parse`] for the first item `extract` rejects; the
    ///   error carries that item's position.
    pub fn new<F>(items: Vec<T>, extract: F) -> Result<Self>
    where
        F: Fn(&T) -> std::result::Result<Timestamp, ParseError>,
    {
        if items.is_empty() {
            return Err(TimesliceError::construction(EMPTY_LIST));
        }
        let timestamps = items
            .iter()
            .enumerate()
            .map(|(i, item)| extract(item).map_err(|e| e.at(i)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        log::debug!("indexed {} items", items.len());
        Ok(Self { items, timestamps })
    }

    /// Build from items that are already paired with their timestamps.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Timestamp, T)>,
    {
        let (timestamps, items): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        if items.is_empty() {
            return Err(TimesliceError::construction(EMPTY_LIST));
        }
        Ok(Self { items, timestamps })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`: construction rejects empty input.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn timestamp_at(&self, index: usize) -> Option<Timestamp> {
        self.timestamps.get(index).copied()
    }

    pub fn first_timestamp(&self) -> Timestamp {
        self.timestamps[0]
    }

    pub fn last_timestamp(&self) -> Timestamp {
        self.timestamps[self.timestamps.len() - 1]
    }

    /// Items paired with their timestamps, in list order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&T, Timestamp)> + '_ {
        self.items.iter().zip(self.timestamps.iter().copied())
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Resolve a possibly negative index against the list length.
    ///
    /// `-1` is the last item and `-len` the first.
    ///
    /// # Errors
    /// [`TimesliceError::Index`] when the resolved index is outside `[0, len)`.
    pub fn normalize_index(&self, index: isize) -> Result<usize> {
        let len = self.len();
        let resolved = if index < 0 {
            index.checked_add_unsigned(len)
        } else {
            Some(index)
        };
        match resolved {
            Some(i) if i >= 0 && (i as usize) < len => Ok(i as usize),
            _ => Err(TimesliceError::Index { index, len }),
        }
    }

    /// Normalize both ends of an inclusive index span.
    pub(crate) fn normalize_span(&self, index_start: isize, index_end: isize) -> Result<(usize, usize)> {
        let start = self.normalize_index(index_start)?;
        let end = self.normalize_index(index_end)?;
        if start > end {
            return Err(TimesliceError::sizing(format!(
                "index_start ({start}) cannot be greater than index_end ({end})"
            )));
        }
        Ok((start, end))
    }
}

impl<T: Clone> IndexedList<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T: AsRef<str>> IndexedList<T> {
    /// Build the list with a [`DateTimeParser`] applied to each item's text.
    pub fn with_parser<P>(items: Vec<T>, parser: &P) -> Result<Self>
    where
        P: DateTimeParser + ?Sized,
    {
        Self::new(items, |item| parser.parse(item.as_ref()))
    }
}

#[cfg(feature = "parallel")]
impl<T: Send + Sync> IndexedList<T> {
    /// Like [`IndexedList::new`], extracting timestamps on the rayon pool.
    ///
    /// The reported error is still the one for the lowest failing position.
    pub fn new_par<F>(items: Vec<T>, extract: F) -> Result<Self>
    where
        F: Fn(&T) -> std::result::Result<Timestamp, ParseError> + Send + Sync,
    {
        use rayon::prelude::*;

        if items.is_empty() {
            return Err(TimesliceError::construction(EMPTY_LIST));
        }
        let parsed: Vec<_> = items.par_iter().map(&extract).collect();
        let timestamps = parsed
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.map_err(|e| e.at(i)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { items, timestamps })
    }
}

impl<T: PartialEq> PartialEq for IndexedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: PartialEq> PartialEq<[T]> for IndexedList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for IndexedList<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        &self.items == other
    }
}

impl<T: fmt::Debug> fmt::Display for IndexedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a IndexedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A contiguous run of an [`IndexedList`], borrowed.
///
/// Sliding windows are identified by [`last_index`](ListBatch::last_index),
/// partition chunks by [`first_index`](ListBatch::first_index).
#[derive(Debug, PartialEq, Eq)]
pub struct ListBatch<'a, T> {
    pub(crate) first_index: usize,
    pub(crate) items: &'a [T],
    pub(crate) timestamps: &'a [Timestamp],
}

impl<T> Clone for ListBatch<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListBatch<'_, T> {}

impl<'a, T> ListBatch<'a, T> {
    pub(crate) fn of(list: &'a IndexedList<T>, first: usize, last: usize) -> Self {
        Self {
            first_index: first,
            items: &list.items[first..=last],
            timestamps: &list.timestamps[first..=last],
        }
    }

    #[inline]
    pub fn first_index(&self) -> usize {
        self.first_index
    }

    #[inline]
    pub fn last_index(&self) -> usize {
        self.first_index + self.items.len() - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    #[inline]
    pub fn timestamps(&self) -> &'a [Timestamp] {
        self.timestamps
    }
}

impl<T: Clone> ListBatch<'_, T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.to_vec()
    }
}

impl<T> std::ops::Deref for ListBatch<'_, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn list(n: usize) -> IndexedList<usize> {
        IndexedList::new((0..n).collect(), |i| {
            Ok(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + chrono::TimeDelta::hours(*i as i64))
        })
        .unwrap()
    }

    #[test]
    fn normalize_span_rejects_reversed() {
        let l = list(5);
        assert!(matches!(l.normalize_span(3, 1), Err(TimesliceError::Sizing(_))));
        assert_eq!(l.normalize_span(-5, -1).unwrap(), (0, 4));
    }

    #[test]
    fn batch_indices() {
        let l = list(5);
        let b = ListBatch::of(&l, 1, 3);
        assert_eq!(b.first_index(), 1);
        assert_eq!(b.last_index(), 3);
        assert_eq!(&*b, &[1, 2, 3]);
    }
}
