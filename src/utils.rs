//! Calendar helpers shared by the generators and query adaptors.

use chrono::{Datelike, NaiveDate, TimeDelta, TimeZone, Timelike, Utc};

use crate::error::{Result, TimesliceError};
use crate::Timestamp;

/// Fail with [`TimesliceError::Ordering`] when `start` is later than `end`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use timeslice::utils::assert_start_precedes_end;
///
/// let a = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
/// let b = Utc.with_ymd_and_hms(2020, 12, 31, 0, 0, 0).unwrap();
/// assert!(assert_start_precedes_end(a, b).is_ok());
/// assert!(assert_start_precedes_end(b, a).is_err());
/// ```
pub fn assert_start_precedes_end(start: Timestamp, end: Timestamp) -> Result<()> {
    if start > end {
        return Err(TimesliceError::Ordering { start, end });
    }
    Ok(())
}

/// Number of days in `month` (one-based) of `year`, leap years included.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| TimesliceError::construction(format!("invalid month {year}-{month}")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| TimesliceError::construction(format!("month {year}-{month} is out of range")))?;
    Ok((next - first).num_days() as u32)
}

/// Floor `ts` to the closest preceding minute listed in `snapshots`.
///
/// Seconds are dropped. A minute earlier than every snapshot rolls back into
/// the previous hour's last snapshot. An empty list returns `ts` unchanged.
///
/// # Errors
/// A snapshot minute of 60 or more.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use timeslice::utils::floor_to_snapshot_minutes;
///
/// let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 3, 0).unwrap();
/// let floored = floor_to_snapshot_minutes(ts, &[12, 27, 42, 57])?;
/// assert_eq!(floored, Utc.with_ymd_and_hms(2019, 12, 31, 23, 57, 0).unwrap());
/// # Ok::<(), timeslice::TimesliceError>(())
/// ```
pub fn floor_to_snapshot_minutes(ts: Timestamp, snapshots: &[u32]) -> Result<Timestamp> {
    if snapshots.is_empty() {
        return Ok(ts);
    }
    if let Some(bad) = snapshots.iter().find(|m| **m >= 60) {
        return Err(TimesliceError::construction(format!(
            "snapshot minute {bad} must be below 60"
        )));
    }

    let mut sorted = snapshots.to_vec();
    sorted.sort_unstable();

    let hour = Utc
        .with_ymd_and_hms(ts.year(), ts.month(), ts.day(), ts.hour(), 0, 0)
        .single()
        .ok_or_else(|| TimesliceError::construction(format!("cannot truncate {ts} to the hour")))?;

    let minute = ts.minute();
    let chosen = sorted.iter().rev().find(|m| **m <= minute);
    let floored = match chosen {
        Some(m) => hour.checked_add_signed(TimeDelta::minutes(i64::from(*m))),
        // before the first snapshot of the hour
        None => hour.checked_sub_signed(TimeDelta::minutes(60 - i64::from(sorted[sorted.len() - 1]))),
    };
    floored.ok_or_else(|| {
        TimesliceError::construction(format!("no snapshot at or before {ts} is representable"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2020, 1, 1, h, m, 0).unwrap()
    }

    #[test]
    fn floors_inside_hour() {
        let snaps = [12, 27, 42, 57];
        assert_eq!(floor_to_snapshot_minutes(at(0, 58), &snaps).unwrap(), at(0, 57));
        assert_eq!(floor_to_snapshot_minutes(at(1, 30), &snaps).unwrap(), at(1, 27));
        assert_eq!(floor_to_snapshot_minutes(at(1, 27), &snaps).unwrap(), at(1, 27));
    }

    #[test]
    fn floor_below_the_earliest_timestamp_is_an_error() {
        let ts = Timestamp::MIN_UTC + TimeDelta::minutes(3);
        assert!(matches!(
            floor_to_snapshot_minutes(ts, &[12, 27, 42, 57]),
            Err(TimesliceError::Construction(_))
        ));
        assert_eq!(
            floor_to_snapshot_minutes(Timestamp::MIN_UTC + TimeDelta::minutes(30), &[12, 27]).unwrap(),
            Timestamp::MIN_UTC + TimeDelta::minutes(27)
        );
    }

    #[test]
    fn unsorted_snapshots_are_sorted_first() {
        assert_eq!(
            floor_to_snapshot_minutes(at(1, 30), &[57, 12, 42, 27]).unwrap(),
            at(1, 27)
        );
    }

    #[test]
    fn empty_snapshots_keep_timestamp() {
        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 1, 26, 13).unwrap();
        assert_eq!(floor_to_snapshot_minutes(ts, &[]).unwrap(), ts);
    }

    #[test]
    fn rejects_minute_sixty() {
        assert!(floor_to_snapshot_minutes(at(1, 0), &[60]).is_err());
    }

    #[test]
    fn leap_year_february() {
        assert_eq!(days_in_month(2018, 2).unwrap(), 28);
        assert_eq!(days_in_month(2020, 2).unwrap(), 29);
        assert_eq!(days_in_month(2021, 12).unwrap(), 31);
        assert!(days_in_month(2021, 13).is_err());
    }
}
