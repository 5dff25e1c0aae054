//! Period filtering for [`IndexedList`].
//!
//! The predicate depends on which bounds are present and on their order:
//!
//! | start | end        | keeps                      |
//! |-------|------------|----------------------------|
//! | none  | none       | everything                 |
//! | none  | `e`        | `t < e`                    |
//! | `s`   | none       | `t >= s`                   |
//! | `s`   | `e > s`    | `s <= t < e`               |
//! | `s`   | `e <= s`   | `e < t <= s` (reversed)    |
//!
//! The reversed row matches what a descending walk with a negative interval
//! produces: `start` is the later, inclusive edge and `end` the earlier,
//! exclusive one.

use crate::{IndexedList, Period, Timestamp};

#[inline]
fn keeps(period: &Period, t: Timestamp) -> bool {
    match (period.start, period.end) {
        (None, None) => true,
        (None, Some(e)) => t < e,
        (Some(s), None) => t >= s,
        (Some(s), Some(e)) if e > s => s <= t && t < e,
        (Some(s), Some(e)) => t <= s && t > e,
    }
}

impl<T> IndexedList<T> {
    /// Positions of the items whose timestamp falls in `period`.
    pub fn filter_indices(&self, period: &Period) -> Vec<usize> {
        self.timestamps
            .iter()
            .enumerate()
            .filter(|(_, t)| keeps(period, **t))
            .map(|(i, _)| i)
            .collect()
    }

    /// Items whose timestamp falls in `period`, in list order.
    pub fn filter(&self, period: &Period) -> Vec<&T> {
        self.items
            .iter()
            .zip(self.timestamps.iter())
            .filter(|(_, t)| keeps(period, **t))
            .map(|(item, _)| item)
            .collect()
    }

    /// Number of items in `period`, without collecting them.
    pub fn count_in(&self, period: &Period) -> usize {
        self.timestamps.iter().filter(|t| keeps(period, **t)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn d(day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2021, 3, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn reversed_bounds_flip_inclusivity() {
        let p = Period::new(d(5), d(2));
        assert!(keeps(&p, d(5)));
        assert!(keeps(&p, d(3)));
        assert!(!keeps(&p, d(2)));
        assert!(!keeps(&p, d(6)));
    }

    #[test]
    fn equal_bounds_take_reversed_branch_and_keep_nothing() {
        let p = Period::new(d(4), d(4));
        assert!(!keeps(&p, d(4)));
    }
}
