//! Assertions over windows and batches.

use std::fmt::Debug;

use crate::{ListBatch, Period};

/// Assert that each window has `k` items and consecutive windows share
/// exactly `k - 1` of them.
///
/// # Panics
/// When any window has the wrong size or two neighbours do not overlap.
pub fn assert_windows_overlap<T: PartialEq + Debug>(windows: &[ListBatch<'_, T>], k: usize) {
    for (i, w) in windows.iter().enumerate() {
        assert_eq!(w.len(), k, "window {i} has {} items, expected {k}", w.len());
    }
    for (i, pair) in windows.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        assert_eq!(
            &prev.items()[1..],
            &next.items()[..k - 1],
            "windows {i} and {} do not share {} items",
            i + 1,
            k - 1
        );
    }
}

/// Assert that `batches` tile `[start, end]` without gaps, in either
/// direction of travel.
///
/// # Panics
/// When a batch is unbounded, reversed, or not adjacent to its neighbour,
/// or the union is not exactly `[start, end]`.
pub fn assert_batches_tile(batches: &[Period], outer: &Period) {
    let Ok((lo, hi)) = outer.as_tuple(true) else {
        panic!("outer period {outer} must be bounded");
    };
    let mut spans: Vec<_> = batches
        .iter()
        .map(|b| match b.bounds() {
            Ok((s, e)) => {
                assert!(s <= e, "batch {b} is reversed");
                (s, e)
            }
            Err(e) => panic!("batch {b} is not bounded: {e}"),
        })
        .collect();
    spans.sort();
    assert!(!spans.is_empty(), "no batches for {outer}");
    assert_eq!(spans[0].0, lo, "first batch does not start at {lo}");
    assert_eq!(spans[spans.len() - 1].1, hi, "last batch does not end at {hi}");
    for pair in spans.windows(2) {
        assert_eq!(pair[0].1, pair[1].0, "gap or overlap between {:?} and {:?}", pair[0], pair[1]);
    }
}
