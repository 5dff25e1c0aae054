//! Lazy timestamp ranges and period batches.
//!
//! Three generators live here:
//!
//! - [`datetime_range`] - equally spaced timestamps, end **exclusive**, like a
//!   numeric range with a (possibly negative) step.
//! - [`generate_batches`] - `(start, end)` pairs covering `[start, end]`, end
//!   **inclusive**, walking in an explicit [`Order`] with a positive width.
//! - [`BatchedPeriod`] - the same partitioning driven by a signed interval,
//!   yielding [`Period`]s.
//!
//! Every generator is a plain iterator over values it owns. Restarting means
//! building a new one; [`BatchedPeriod::iter`] does exactly that.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use timeslice::{datetime_range, Interval};
//!
//! let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2022, 1, 8, 0, 0, 0).unwrap();
//! let days: Vec<_> = datetime_range(start, end, Interval::days(2))?
//!     .map(|t| t.format("%m-%d").to_string())
//!     .collect();
//! assert_eq!(days, ["01-01", "01-03", "01-05", "01-07"]);
//! # Ok::<(), timeslice::TimesliceError>(())
//! ```

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimesliceError};
use crate::utils::assert_start_precedes_end;
use crate::{Interval, Period, Timestamp};

/// Walking direction for [`generate_batches`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Ascending,
    #[default]
    Descending,
}

// ---------------------------------------------------------------------------
// datetime_range
// ---------------------------------------------------------------------------

/// Timestamps `start, start + interval, ...` strictly before `end`.
///
/// With a negative interval "before" means "later than", so the range walks
/// backward and stops short of `end`. A step whose sign disagrees with
/// `end - start`, or `start == end`, gives an empty range.
///
/// # Errors
/// `interval` is zero.
pub fn datetime_range(start: Timestamp, end: Timestamp, interval: Interval) -> Result<DateTimeRange> {
    interval.ensure_non_zero()?;
    Ok(DateTimeRange {
        cursor: Some(start),
        end,
        step: interval.as_time_delta(),
        forward: !interval.is_negative(),
    })
}

#[derive(Clone, Debug)]
pub struct DateTimeRange {
    cursor: Option<Timestamp>,
    end: Timestamp,
    step: TimeDelta,
    forward: bool,
}

impl DateTimeRange {
    #[inline]
    fn precedes_end(&self, t: Timestamp) -> bool {
        if self.forward { t < self.end } else { t > self.end }
    }
}

impl Iterator for DateTimeRange {
    type Item = Timestamp;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        if !self.precedes_end(current) {
            self.cursor = None;
            return None;
        }
        // overflow past chrono's range ends the walk
        self.cursor = current.checked_add_signed(self.step);
        Some(current)
    }
}

impl std::iter::FusedIterator for DateTimeRange {}

// ---------------------------------------------------------------------------
// generate_batches
// ---------------------------------------------------------------------------

/// Split `[start, end]` into `(batch_start, batch_end)` pairs of width `batch_interval`.
///
/// `Order::Descending` walks back from `end`; `Order::Ascending` walks forward
/// from `start`. When the span is not a multiple of the width, one shorter
/// batch is emitted last, at the end opposite to where the walk began.
///
/// # Errors
/// - [`TimesliceError::Ordering`] if `start > end`.
/// - [`TimesliceError::Construction`] if `batch_interval` is not positive; the
///   direction comes from `order` here.
pub fn generate_batches(
    start: Timestamp,
    end: Timestamp,
    batch_interval: Interval,
    order: Order,
) -> Result<DateTimeBatches> {
    assert_start_precedes_end(start, end)?;
    if batch_interval.is_zero() || batch_interval.is_negative() {
        return Err(TimesliceError::construction(format!(
            "batch interval must be positive, got {batch_interval}"
        )));
    }
    Ok(DateTimeBatches {
        start,
        end,
        step: batch_interval.as_time_delta(),
        order,
        done: false,
    })
}

#[derive(Clone, Debug)]
pub struct DateTimeBatches {
    start: Timestamp,
    end: Timestamp,
    step: TimeDelta,
    order: Order,
    done: bool,
}

impl DateTimeBatches {
    fn remainder(&mut self) -> Option<(Timestamp, Timestamp)> {
        self.done = true;
        (self.start < self.end).then_some((self.start, self.end))
    }
}

impl Iterator for DateTimeBatches {
    type Item = (Timestamp, Timestamp);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.order {
            Order::Descending => match self.end.checked_sub_signed(self.step) {
                Some(next_start) if next_start >= self.start => {
                    let batch = (next_start, self.end);
                    self.end = next_start;
                    Some(batch)
                }
                _ => self.remainder(),
            },
            Order::Ascending => match self.start.checked_add_signed(self.step) {
                Some(next_end) if next_end < self.end => {
                    let batch = (self.start, next_end);
                    self.start = next_end;
                    Some(batch)
                }
                _ => self.remainder(),
            },
        }
    }
}

impl std::iter::FusedIterator for DateTimeBatches {}

// ---------------------------------------------------------------------------
// BatchedPeriod
// ---------------------------------------------------------------------------

/// A bounded period paired with a signed batch width.
///
/// Unlike [`generate_batches`], `end` is inclusive even when it equals
/// `start` (one zero-length batch), and a sign mismatch between the interval
/// and `end - start` produces no batches instead of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatchedPeriod {
    period: Period,
    batch_interval: Interval,
}

impl BatchedPeriod {
    /// # Errors
    /// The period is missing a bound, or the interval is zero.
    pub fn new(period: Period, batch_interval: Interval) -> Result<Self> {
        period.bounds()?;
        batch_interval.ensure_non_zero()?;
        Ok(Self {
            period,
            batch_interval,
        })
    }

    #[inline]
    pub fn period(&self) -> Period {
        self.period
    }

    #[inline]
    pub fn batch_interval(&self) -> Interval {
        self.batch_interval
    }

    /// Span of the outer period.
    pub fn span(&self) -> Result<Interval> {
        self.period.span()
    }

    /// A fresh iterator over the batches.
    pub fn iter(&self) -> PeriodBatches {
        // bounds were checked in `new`
        let (start, end) = match self.period.bounds() {
            Ok(b) => b,
            Err(_) => return PeriodBatches::empty(),
        };
        let negative = self.batch_interval.is_negative();
        let state = if start == end {
            BatchState::Single
        } else if negative ^ (end > start) {
            BatchState::Walking
        } else {
            BatchState::Done
        };
        PeriodBatches {
            start,
            end,
            step: self.batch_interval.as_time_delta(),
            negative,
            state,
        }
    }
}

impl<'a> IntoIterator for &'a BatchedPeriod {
    type Item = Period;
    type IntoIter = PeriodBatches;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Period {
    /// Pair this period with a batch width; see [`BatchedPeriod`].
    pub fn in_batches(&self, batch_interval: Interval) -> Result<BatchedPeriod> {
        BatchedPeriod::new(*self, batch_interval)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BatchState {
    Single,
    Walking,
    Done,
}

#[derive(Clone, Debug)]
pub struct PeriodBatches {
    start: Timestamp,
    end: Timestamp,
    step: TimeDelta,
    negative: bool,
    state: BatchState,
}

impl PeriodBatches {
    fn empty() -> Self {
        Self {
            start: Timestamp::MIN_UTC,
            end: Timestamp::MIN_UTC,
            step: TimeDelta::zero(),
            negative: false,
            state: BatchState::Done,
        }
    }
}

#[inline]
fn ordered(a: Timestamp, b: Timestamp) -> Period {
    Period::new(a.min(b), a.max(b))
}

impl Iterator for PeriodBatches {
    type Item = Period;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            BatchState::Done => None,
            BatchState::Single => {
                self.state = BatchState::Done;
                Some(Period::new(self.start, self.end))
            }
            BatchState::Walking => match self.start.checked_add_signed(self.step) {
                Some(next) if self.negative ^ (next <= self.end) => {
                    let batch = ordered(self.start, next);
                    self.start = next;
                    Some(batch)
                }
                _ => {
                    self.state = BatchState::Done;
                    (self.start != self.end).then(|| ordered(self.start, self.end))
                }
            },
        }
    }
}

impl std::iter::FusedIterator for PeriodBatches {}
