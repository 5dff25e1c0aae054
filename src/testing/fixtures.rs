//! Pre-built timestamps, item names and lists.

use chrono::{TimeDelta, TimeZone, Utc};

use crate::parser::FileNameParser;
use crate::{IndexedList, Timestamp};

/// A UTC timestamp on the hour.
///
/// # Panics
/// On an invalid calendar date or hour.
#[must_use]
pub fn timestamp(year: i32, month: u32, day: u32, hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture timestamp {year}-{month}-{day} {hour}:00"))
}

/// Names `seviri_<YYYYmmdd>_<HH>_<MM>.nc`, one per hour from `start`.
///
/// Every name parses with [`FileNameParser`].
///
/// # Example
///
/// ```
/// use timeslice::testing::{hourly_items, timestamp};
///
/// let names = hourly_items(timestamp(2020, 1, 1, 22), 3);
/// assert_eq!(names[2], "seviri_20200102_00_00.nc");
/// ```
#[must_use]
pub fn hourly_items(start: Timestamp, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let ts = start + TimeDelta::hours(i as i64);
            format!("seviri_{}.nc", ts.format("%Y%m%d_%H_%M"))
        })
        .collect()
}

/// An [`IndexedList`] of `n` hourly names starting at 2020-01-01T00:00Z.
///
/// # Panics
/// When `n` is zero.
#[must_use]
pub fn hourly_list(n: usize) -> IndexedList<String> {
    match IndexedList::with_parser(hourly_items(timestamp(2020, 1, 1, 0), n), &FileNameParser) {
        Ok(list) => list,
        Err(e) => panic!("hourly fixture list: {e}"),
    }
}

/// A SEVIRI product id for a snapshot taken at `ts`.
///
/// # Example
///
/// ```
/// use timeslice::testing::{product_id, timestamp};
///
/// assert_eq!(
///     product_id(timestamp(2015, 7, 31, 22)),
///     "MSG3-SEVI-MSG15-0100-NA-20150731220000.000000000Z-NA"
/// );
/// ```
#[must_use]
pub fn product_id(ts: Timestamp) -> String {
    format!("MSG3-SEVI-MSG15-0100-NA-{}.000000000Z-NA", ts.format("%Y%m%d%H%M%S"))
}

/// Product ids for `n` consecutive SEVIRI snapshots, the first at minute 12
/// past `hour`.
#[must_use]
pub fn seviri_product_ids(hour: Timestamp, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| product_id(hour + TimeDelta::minutes(12 + 15 * i as i64)))
        .collect()
}
