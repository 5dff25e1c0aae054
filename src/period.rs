use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimesliceError};
use crate::Interval;

/// Timezone-aware UTC timestamp.
pub type Timestamp = DateTime<Utc>;

/// A time span with optional bounds.
///
/// Operations that need an actual span (`span`, `as_tuple`, batching) require
/// both bounds. List filtering treats a missing bound as unbounded on that side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl Period {
    #[inline]
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    #[inline]
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    #[inline]
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    #[inline]
    pub fn ending_at(end: Timestamp) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    #[inline]
    pub fn from_bounds(start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Both bounds, or a construction error naming the missing side.
    pub fn bounds(&self) -> Result<(Timestamp, Timestamp)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Ok((s, e)),
            (None, None) => Err(TimesliceError::construction(
                "period has neither a start nor an end",
            )),
            (None, Some(_)) => Err(TimesliceError::construction("period has no start")),
            (Some(_), None) => Err(TimesliceError::construction("period has no end")),
        }
    }

    /// `end - start`. Negative when the period runs backward.
    pub fn span(&self) -> Result<Interval> {
        let (s, e) = self.bounds()?;
        Ok(Interval::from_time_delta(e - s))
    }

    /// The bounds as a pair; `sorted` returns `(earliest, latest)`.
    pub fn as_tuple(&self, sorted: bool) -> Result<(Timestamp, Timestamp)> {
        let (s, e) = self.bounds()?;
        if sorted && e < s {
            return Ok((e, s));
        }
        Ok((s, e))
    }

    /// Same period with its bounds in chronological order.
    pub fn sorted(&self) -> Result<Self> {
        let (s, e) = self.as_tuple(true)?;
        Ok(Self::new(s, e))
    }

    #[must_use]
    pub fn with_end(&self, end: Timestamp) -> Self {
        Self {
            start: self.start,
            end: Some(end),
        }
    }
}

impl From<(Timestamp, Timestamp)> for Period {
    fn from(value: (Timestamp, Timestamp)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |b: Option<Timestamp>| b.map_or_else(|| "..".to_string(), |t| t.to_rfc3339());
        write!(f, "['{}', '{}')", side(self.start), side(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2022, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn display_marks_open_sides() {
        let p = Period::ending_at(day(2));
        assert_eq!(p.to_string(), "['..', '2022-01-02T00:00:00+00:00')");
    }

    #[test]
    fn sorted_swaps_reversed_bounds() {
        let p = Period::new(day(5), day(1)).sorted().unwrap();
        assert_eq!(p, Period::new(day(1), day(5)));
    }
}
