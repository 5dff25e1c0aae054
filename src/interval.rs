//! Signed step sizes.
//!
//! An [`Interval`] is the step used by the range and batch generators. Its sign
//! decides the direction of travel: a negative interval walks backward in time.
//! [`IntervalSpec`] is the serde form used by configuration files, e.g.
//! `{"days": 30}` or `{"hours": 1, "minutes": 30}`.

use std::fmt;
use std::ops::Neg;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimesliceError};

/// A signed duration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(TimeDelta);

impl Interval {
    #[inline]
    pub fn from_time_delta(delta: TimeDelta) -> Self {
        Self(delta)
    }







    /// Step of `n` weeks.
    ///
    /// # Panics
    ///
    /// Panics when `n` weeks does not fit in a [`TimeDelta`]. Use
    /// [`Interval::try_weeks`] for caller-supplied values. The same holds for
    /// the other unit constructors.
    #[inline]
    pub fn weeks(n: i64) -> Self {
        Self(TimeDelta::weeks(n))
    }

    #[inline]
    pub fn days(n: i64) -> Self {
        Self(TimeDelta::days(n))
    }

    #[inline]
    pub fn hours(n: i64) -> Self {
        Self(TimeDelta::hours(n))
    }

    #[inline]
    pub fn minutes(n: i64) -> Self {
        Self(TimeDelta::minutes(n))
    }

    #[inline]
    pub fn seconds(n: i64) -> Self {
        Self(TimeDelta::seconds(n))
    }

    #[inline]
    pub fn milliseconds(n: i64) -> Self {
        Self(TimeDelta::milliseconds(n))
    }

    /// Fallible form of [`Interval::weeks`].
    pub fn try_weeks(n: i64) -> Result<Self> {
        Self::checked(TimeDelta::try_weeks(n), n, "weeks")
    }

    pub fn try_days(n: i64) -> Result<Self> {
        Self::checked(TimeDelta::try_days(n), n, "days")
    }

    pub fn try_hours(n: i64) -> Result<Self> {
        Self::checked(TimeDelta::try_hours(n), n, "hours")
    }

    pub fn try_minutes(n: i64) -> Result<Self> {
        Self::checked(TimeDelta::try_minutes(n), n, "minutes")
    }

    pub fn try_seconds(n: i64) -> Result<Self> {
        Self::checked(TimeDelta::try_seconds(n), n, "seconds")
    }

    pub fn try_milliseconds(n: i64) -> Result<Self> {
        Self::checked(TimeDelta::try_milliseconds(n), n, "milliseconds")
    }

    fn checked(delta: Option<TimeDelta>, n: i64, unit: &str) -> Result<Self> {
        delta
            .map(Self)
            .ok_or_else(|| TimesliceError::construction(format!("{n} {unit} is out of range")))
    }

    #[inline]
    pub fn as_time_delta(&self) -> TimeDelta {
        self.0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < TimeDelta::zero()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Fail with a construction error when the interval is zero.
    pub(crate) fn ensure_non_zero(&self) -> Result<()> {
        if self.is_zero() {
            return Err(TimesliceError::construction("interval must be non-zero"));
        }
        Ok(())
    }
}

impl From<TimeDelta> for Interval {
    fn from(value: TimeDelta) -> Self {
        Self(value)
    }
}

impl From<Interval> for TimeDelta {
    fn from(value: Interval) -> Self {
        value.0
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration form of an [`Interval`].
///
/// At least one field must be present. Values may be fractional and negative;
/// the sum is rounded to whole milliseconds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntervalSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<f64>,
}

impl IntervalSpec {
    pub fn to_interval(&self) -> Result<Interval> {
        let parts = [
            (self.weeks, 604_800.0),
            (self.days, 86_400.0),
            (self.hours, 3_600.0),
            (self.minutes, 60.0),
            (self.seconds, 1.0),
        ];
        if parts.iter().all(|(v, _)| v.is_none()) {
            return Err(TimesliceError::Config(
                "an interval needs at least one of weeks, days, hours, minutes or seconds".into(),
            ));
        }

        let total_secs: f64 = parts
            .iter()
            .filter_map(|(v, scale)| v.map(|x| x * scale))
            .sum();
        if !total_secs.is_finite() {
            return Err(TimesliceError::Config(format!(
                "interval is not a finite number of seconds: {total_secs}"
            )));
        }

        let millis = (total_secs * 1_000.0).round();
        if millis.abs() >= i64::MAX as f64 {
            return Err(TimesliceError::Config("interval is out of range".into()));
        }
        TimeDelta::try_milliseconds(millis as i64)
            .map(Interval)
            .ok_or_else(|| TimesliceError::Config("interval is out of range".into()))
    }
}

impl TryFrom<IntervalSpec> for Interval {
    type Error = TimesliceError;

    fn try_from(value: IntervalSpec) -> Result<Self> {
        value.to_interval()
    }
}

impl TryFrom<&IntervalSpec> for Interval {
    type Error = TimesliceError;

    fn try_from(value: &IntervalSpec) -> Result<Self> {
        value.to_interval()
    }
}
